//! Outbound notification delivery.
//!
//! Currently a single channel: the completion webhook posted when a batch
//! job reaches its terminal Completed status.

pub mod webhook;

pub use webhook::{CompletionNotifier, WebhookError};
