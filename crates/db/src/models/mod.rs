//! Entity models.

pub mod job;
pub mod status;
