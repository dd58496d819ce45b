//! The asynchronous batch-processing core.
//!
//! Layered leaf-first:
//!
//! - [`fetch`] / [`sink`] -- the remote-fetch and artifact-persistence
//!   boundaries (traits plus their production implementations).
//! - [`transform`] -- fetch one image, re-encode it, persist one artifact.
//! - [`row`] -- parse one input row and transform each of its images.
//! - [`executor`] -- drive all rows of one job to a terminal status and
//!   deliver the completion webhook.
//! - [`queue`] -- the in-process handoff between the submission gateway
//!   and the executor worker pool.

pub mod error;
pub mod executor;
pub mod fetch;
pub mod queue;
pub mod row;
pub mod sink;
pub mod transform;

pub use error::{FetchError, PipelineError};
pub use executor::{ExecuteJob, JobExecutor};
pub use queue::JobQueue;
pub use transform::ImageTransformer;
