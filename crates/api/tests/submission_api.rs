//! HTTP-level integration tests for the `/batches` submission gateway.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the
//! router. These cover the synchronous rejection paths (which never
//! create a job record) plus routing and the health endpoint; the
//! asynchronous execution path is covered by the pipeline crate's
//! executor and queue tests.

mod common;

use axum::http::StatusCode;
use common::{assert_bad_request, body_json, build_test_app, get, post_file, post_multipart, BOUNDARY};

// ---------------------------------------------------------------------------
// Test: GET /health reports a degraded database
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(dir.path()).await;

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/batches rejects non-CSV uploads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_submit_rejects_non_csv_extension() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(dir.path()).await;

    let response = post_file(
        app,
        "/api/v1/batches",
        "products.txt",
        b"serial,name,urls\nS1,A,http://img/a.png",
    )
    .await;

    assert_bad_request(
        response,
        "VALIDATION_ERROR",
        "Invalid file format. Please upload a CSV file.",
    )
    .await;
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/batches rejects a header-only CSV
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_submit_rejects_header_only_csv() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(dir.path()).await;

    let response = post_file(
        app,
        "/api/v1/batches",
        "products.csv",
        b"serial,product name,image urls\n",
    )
    .await;

    assert_bad_request(response, "VALIDATION_ERROR", "Empty CSV file.").await;
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/batches rejects non-UTF-8 content
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_submit_rejects_non_utf8_content() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(dir.path()).await;

    let response = post_file(
        app,
        "/api/v1/batches",
        "products.csv",
        &[0xff, 0xfe, 0x00, 0x41],
    )
    .await;

    assert_bad_request(response, "VALIDATION_ERROR", "File is not valid UTF-8.").await;
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/batches with no file part
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_submit_without_file_part() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(dir.path()).await;

    // A well-formed multipart body containing only a plain (non-file) field.
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"note\"\r\n\r\n");
    body.extend_from_slice(b"not a file");
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let response = post_multipart(app, "/api/v1/batches", body).await;
    assert_bad_request(response, "VALIDATION_ERROR", "No file in multipart upload.").await;
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/batches/{id} rejects a malformed job ID
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_status_rejects_malformed_job_id() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(dir.path()).await;

    let response = get(app, "/api/v1/batches/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: unknown routes return 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(dir.path()).await;

    let response = get(app, "/api/v1/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
