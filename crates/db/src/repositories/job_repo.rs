//! Repository for the `batch_jobs` table.
//!
//! Status transitions use the `JobStatus` enum from `models::status` --
//! no raw status literals in queries.

use sqlx::PgPool;

use imgbatch_core::types::JobId;

use crate::models::job::{BatchJob, NewBatchJob};
use crate::models::status::JobStatus;

/// Column list for `batch_jobs` queries.
const COLUMNS: &str = "\
    id, status_id, output_csv, error_message, webhook_url, \
    submitted_at, completed_at, created_at, updated_at";

/// Provides CRUD operations for batch jobs.
pub struct JobRepo;

impl JobRepo {
    /// Insert the initial Pending record for a freshly submitted job.
    pub async fn create(pool: &PgPool, input: &NewBatchJob) -> Result<BatchJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO batch_jobs (id, status_id, webhook_url) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BatchJob>(&query)
            .bind(input.id)
            .bind(JobStatus::Pending.id())
            .bind(&input.webhook_url)
            .fetch_one(pool)
            .await
    }

    /// Find a job by its ID.
    pub async fn find_by_id(pool: &PgPool, id: JobId) -> Result<Option<BatchJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM batch_jobs WHERE id = $1");
        sqlx::query_as::<_, BatchJob>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a job as Processing when a worker picks it up.
    ///
    /// Only transitions out of Pending; a job that already reached a
    /// terminal status is left untouched.
    pub async fn mark_processing(pool: &PgPool, id: JobId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE batch_jobs \
             SET status_id = $2, updated_at = NOW() \
             WHERE id = $1 AND status_id = $3",
        )
        .bind(id)
        .bind(JobStatus::Processing.id())
        .bind(JobStatus::Pending.id())
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a job as Completed with its materialized output table.
    pub async fn complete(pool: &PgPool, id: JobId, output_csv: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE batch_jobs \
             SET status_id = $2, output_csv = $3, completed_at = NOW(), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(JobStatus::Completed.id())
        .bind(output_csv)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a job as Failed with the triggering error message.
    ///
    /// `output_csv` stays NULL -- a failed job never carries a result
    /// table, even when some rows succeeded before the failure.
    pub async fn fail(pool: &PgPool, id: JobId, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE batch_jobs \
             SET status_id = $2, error_message = $3, completed_at = NOW(), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(JobStatus::Failed.id())
        .bind(error)
        .execute(pool)
        .await?;
        Ok(())
    }
}
