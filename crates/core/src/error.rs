use crate::types::JobId;

/// Domain-level error taxonomy shared across the workspace.
///
/// Transform-layer errors (fetch/decode/write) live in
/// `imgbatch-pipeline`; this enum covers everything the request path and
/// row parsing can produce.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The submitted batch payload is malformed. Surfaced synchronously
    /// to the submitter; no job record is created.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A single input row does not match the `serial,label,<urls>` shape.
    #[error("Malformed row: {0}")]
    RowFormat(String),

    /// No job exists for the queried identifier.
    #[error("Job not found: {id}")]
    NotFound { id: JobId },

    #[error("Internal error: {0}")]
    Internal(String),
}
