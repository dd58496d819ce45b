//! Route definitions for the `/batches` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::batches;
use crate::state::AppState;

/// Routes mounted at `/batches`.
///
/// ```text
/// POST   /          -> submit_batch
/// GET    /{id}      -> batch_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(batches::submit_batch))
        .route("/{id}", get(batches::batch_status))
}
