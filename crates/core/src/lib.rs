//! Pure domain logic for the imgbatch service.
//!
//! This crate holds everything that needs no I/O: the domain error
//! taxonomy, shared type aliases, input-row parsing / output-row
//! rendering, and the artifact naming convention. It has no internal
//! dependencies so every other crate can build on it.

pub mod error;
pub mod naming;
pub mod row;
pub mod types;

pub use error::CoreError;
