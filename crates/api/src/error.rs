use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use imgbatch_core::error::CoreError;

/// Handler-level error type.
///
/// Wraps the domain's [`CoreError`] plus the HTTP-specific failure modes,
/// and renders every variant as the `{"error", "code"}` JSON envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request payload (multipart decode failures and the like).
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Wire shape of every error response.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

fn respond(status: StatusCode, code: &'static str, error: String) -> Response {
    (status, axum::Json(ErrorBody { error, code })).into_response()
}

fn internal(detail: &str) -> Response {
    tracing::error!(error = %detail, "Request failed with internal error");
    respond(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(CoreError::Validation(msg)) => {
                respond(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }
            AppError::Core(CoreError::RowFormat(msg)) => {
                respond(StatusCode::BAD_REQUEST, "ROW_FORMAT_ERROR", msg)
            }
            AppError::Core(CoreError::NotFound { id }) => respond(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Job {id} not found"),
            ),
            AppError::Core(CoreError::Internal(msg)) => internal(&msg),
            AppError::Database(err) => database_response(err),
            AppError::BadRequest(msg) => respond(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => internal(&msg),
        }
    }
}

/// Map a sqlx error onto the response envelope.
///
/// Missing rows become 404, unique violations (Postgres code 23505)
/// become 409; anything else is an internal error with the detail kept
/// out of the response body.
fn database_response(err: sqlx::Error) -> Response {
    match err {
        sqlx::Error::RowNotFound => respond(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            respond(
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Duplicate value violates unique constraint: {constraint}"),
            )
        }
        other => internal(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn validation_maps_to_400() {
        let response =
            AppError::Core(CoreError::Validation("bad file".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response =
            AppError::Core(CoreError::NotFound { id: Uuid::new_v4() }).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_maps_to_500() {
        let response = AppError::InternalError("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
