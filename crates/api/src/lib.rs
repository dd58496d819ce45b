//! HTTP boundary for the imgbatch service.
//!
//! Exposes the submission gateway (`POST /api/v1/batches`), the status
//! query (`GET /api/v1/batches/{id}`), and a root-level health check.
//! Everything behind the handlers lives in `imgbatch-pipeline`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
