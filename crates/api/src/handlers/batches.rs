//! Handlers for the `/batches` resource: the submission gateway and the
//! status query.
//!
//! Submission validates the upload synchronously, creates the Pending job
//! record, hands the rows to the worker pool, and returns the job ID
//! without waiting for execution. Everything after that is observable
//! only through the status endpoint (or the completion webhook).

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use imgbatch_core::error::CoreError;
use imgbatch_core::types::JobId;
use imgbatch_db::models::job::NewBatchJob;
use imgbatch_db::models::status::JobStatus;
use imgbatch_db::repositories::JobRepo;
use imgbatch_pipeline::ExecuteJob;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response for a successful submission.
#[derive(Debug, Serialize)]
pub struct BatchSubmitted {
    pub job_id: JobId,
}

/// Response for the status query.
#[derive(Debug, Serialize)]
pub struct BatchStatus {
    pub job_id: JobId,
    pub status: &'static str,
    pub output_csv: Option<String>,
    pub error_message: Option<String>,
}

/// Query parameters for the submission endpoint.
#[derive(Debug, Deserialize)]
pub struct SubmitParams {
    /// Optional URL to POST `{job_id, output_csv}` to on completion.
    pub webhook_url: Option<String>,
}

/// Extract the data rows from the uploaded CSV content.
///
/// The first line is the header and is discarded; blank lines are
/// dropped. Row *content* is not validated here -- malformed rows fail
/// the job during execution, not the submission.
fn data_rows(content: &str) -> Vec<String> {
    content
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// POST /api/v1/batches?webhook_url=...
///
/// Accept a multipart CSV upload, create a Pending job, enqueue it for
/// background execution, and return the job ID. Returns 400 before any
/// record is created when the upload is not a CSV or has no data rows.
pub async fn submit_batch(
    State(state): State<AppState>,
    Query(params): Query<SubmitParams>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<BatchSubmitted>)> {
    // Find the uploaded file part.
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let (filename, bytes) = upload.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "No file in multipart upload.".to_string(),
        ))
    })?;

    if !filename.ends_with(".csv") {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid file format. Please upload a CSV file.".to_string(),
        )));
    }

    let content = String::from_utf8(bytes).map_err(|_| {
        AppError::Core(CoreError::Validation("File is not valid UTF-8.".to_string()))
    })?;

    let rows = data_rows(&content);
    if rows.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Empty CSV file.".to_string(),
        )));
    }

    // Validation passed; only now does a job record exist.
    let job = JobRepo::create(
        &state.pool,
        &NewBatchJob {
            id: Uuid::new_v4(),
            webhook_url: params.webhook_url.clone(),
        },
    )
    .await?;

    tracing::info!(job_id = %job.id, rows = rows.len(), "Batch submitted");

    if let Err(e) = state
        .queue
        .enqueue(ExecuteJob {
            job_id: job.id,
            rows,
            webhook_url: params.webhook_url,
        })
        .await
    {
        // Worker pool is gone (shutdown in progress). Don't leave the
        // record permanently Pending.
        let _ = JobRepo::fail(&state.pool, job.id, "service shutting down").await;
        return Err(AppError::InternalError(e.to_string()));
    }

    Ok((StatusCode::CREATED, Json(BatchSubmitted { job_id: job.id })))
}

/// GET /api/v1/batches/{id}
///
/// Read-only job status lookup. `output_csv` is populated once the job
/// completes; `error_message` once it fails. 404 on unknown ID.
pub async fn batch_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BatchStatus>> {
    let job = JobRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { id }))?;

    let status = JobStatus::from_id(job.status_id)
        .map(JobStatus::label)
        .unwrap_or("Unknown");

    Ok(Json(BatchStatus {
        job_id: job.id,
        status,
        output_csv: job.output_csv,
        error_message: job.error_message,
    }))
}
