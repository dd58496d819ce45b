pub mod batches;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /batches           POST   submit a batch (multipart CSV upload)
/// /batches/{id}      GET    job status + output table when completed
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/batches", batches::router())
}
