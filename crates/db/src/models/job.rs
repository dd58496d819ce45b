//! Batch job entity model.

use imgbatch_core::types::{JobId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::status::StatusId;

/// A row from the `batch_jobs` table.
///
/// Invariants enforced by the executor, not the schema: `output_csv` is
/// set iff the job completed; `error_message` is only ever set on a
/// failed job.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BatchJob {
    pub id: JobId,
    pub status_id: StatusId,
    pub output_csv: Option<String>,
    pub error_message: Option<String>,
    pub webhook_url: Option<String>,
    pub submitted_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating the initial Pending job record.
#[derive(Debug, Clone)]
pub struct NewBatchJob {
    pub id: JobId,
    pub webhook_url: Option<String>,
}
