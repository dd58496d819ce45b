use std::sync::Arc;

use imgbatch_pipeline::JobQueue;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: imgbatch_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Handoff to the job-executor worker pool.
    pub queue: JobQueue,
}
