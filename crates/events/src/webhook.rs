//! Completion webhook delivery.
//!
//! [`CompletionNotifier`] posts the `{job_id, output_csv}` payload to the
//! caller-supplied URL. Delivery is single-attempt by contract: the job is
//! already durably Completed when this runs, and no retry is owed to the
//! receiver. Callers decide what a failure means (the job executor logs
//! it and moves on).

use std::time::Duration;

use imgbatch_core::types::JobId;

/// Per-delivery request timeout.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a delivery attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// Transport-level failure: DNS, connect, timeout.
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered, but not with a 2xx.
    #[error("webhook endpoint answered HTTP {0}")]
    HttpStatus(u16),
}

/// Posts job-completion notifications to external endpoints.
pub struct CompletionNotifier {
    client: reqwest::Client,
}

impl CompletionNotifier {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(DELIVERY_TIMEOUT)
                .build()
                .expect("reqwest client construction failed"),
        }
    }

    /// Deliver the completion payload for one job. Posts exactly once.
    pub async fn notify(
        &self,
        url: &str,
        job_id: JobId,
        output_csv: &str,
    ) -> Result<(), WebhookError> {
        let payload = serde_json::json!({
            "job_id": job_id,
            "output_csv": output_csv,
        });

        let response = self.client.post(url).json(&payload).send().await?;
        match response.status() {
            status if status.is_success() => Ok(()),
            status => Err(WebhookError::HttpStatus(status.as_u16())),
        }
    }
}

impl Default for CompletionNotifier {
    fn default() -> Self {
        Self::new()
    }
}
