//! The durable job-store boundary.
//!
//! The pipeline executor talks to [`JobStore`] rather than to sqlx
//! directly, so executor behavior can be tested against an in-memory
//! store. [`PgJobStore`] is the production implementation, delegating to
//! [`JobRepo`].

use async_trait::async_trait;

use imgbatch_core::types::JobId;

use crate::models::job::{BatchJob, NewBatchJob};
use crate::repositories::JobRepo;
use crate::DbPool;

/// Read/write contract for durable job state.
///
/// A given job ID is mutated by exactly one executor during its single
/// execution, so implementations only need per-key write serialization.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert the initial Pending record.
    async fn create(&self, input: &NewBatchJob) -> Result<BatchJob, sqlx::Error>;

    /// Point read by job ID.
    async fn find(&self, id: JobId) -> Result<Option<BatchJob>, sqlx::Error>;

    /// Transition Pending → Processing.
    async fn mark_processing(&self, id: JobId) -> Result<(), sqlx::Error>;

    /// Terminal transition to Completed with the output table.
    async fn complete(&self, id: JobId, output_csv: &str) -> Result<(), sqlx::Error>;

    /// Terminal transition to Failed with the triggering error.
    async fn fail(&self, id: JobId, error: &str) -> Result<(), sqlx::Error>;
}

/// PostgreSQL-backed job store.
#[derive(Clone)]
pub struct PgJobStore {
    pool: DbPool,
}

impl PgJobStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn create(&self, input: &NewBatchJob) -> Result<BatchJob, sqlx::Error> {
        JobRepo::create(&self.pool, input).await
    }

    async fn find(&self, id: JobId) -> Result<Option<BatchJob>, sqlx::Error> {
        JobRepo::find_by_id(&self.pool, id).await
    }

    async fn mark_processing(&self, id: JobId) -> Result<(), sqlx::Error> {
        JobRepo::mark_processing(&self.pool, id).await
    }

    async fn complete(&self, id: JobId, output_csv: &str) -> Result<(), sqlx::Error> {
        JobRepo::complete(&self.pool, id, output_csv).await
    }

    async fn fail(&self, id: JobId, error: &str) -> Result<(), sqlx::Error> {
        JobRepo::fail(&self.pool, id, error).await
    }
}
