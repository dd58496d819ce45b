//! The job executor.
//!
//! Runs exactly once per submitted job, outside the request path: marks
//! the job Processing, drives every row through the row processor in
//! input order, and writes the terminal status. The job policy is
//! all-or-nothing -- the first row failure fails the whole job and no
//! output table is retained, regardless of earlier successes.

use std::sync::Arc;

use imgbatch_core::row::render_table;
use imgbatch_core::types::JobId;
use imgbatch_db::store::JobStore;
use imgbatch_events::CompletionNotifier;

use crate::row::process_row;
use crate::transform::ImageTransformer;

/// One unit of background work, handed from the submission gateway to a
/// worker via the job queue.
#[derive(Debug)]
pub struct ExecuteJob {
    pub job_id: JobId,
    /// Raw data rows, header already stripped.
    pub rows: Vec<String>,
    pub webhook_url: Option<String>,
}

/// Drives batch jobs to a terminal status.
pub struct JobExecutor {
    store: Arc<dyn JobStore>,
    transformer: ImageTransformer,
    notifier: CompletionNotifier,
}

impl JobExecutor {
    pub fn new(
        store: Arc<dyn JobStore>,
        transformer: ImageTransformer,
        notifier: CompletionNotifier,
    ) -> Self {
        Self {
            store,
            transformer,
            notifier,
        }
    }

    /// Execute one job to completion.
    ///
    /// Never returns an error: every failure mode ends as either a Failed
    /// status in the store or a logged store-write error. The submitter
    /// observes the outcome through the status endpoint only.
    pub async fn execute(&self, job: ExecuteJob) {
        let job_id = job.job_id;

        if let Err(e) = self.store.mark_processing(job_id).await {
            // Store unreachable; doing the work anyway would only fail at
            // the terminal write. Leave the job Pending.
            tracing::error!(job_id = %job_id, error = %e, "Failed to mark job processing");
            return;
        }

        tracing::info!(job_id = %job_id, rows = job.rows.len(), "Job execution started");

        let mut output_rows = Vec::with_capacity(job.rows.len());
        for (index, raw) in job.rows.iter().enumerate() {
            match process_row(&self.transformer, raw).await {
                Ok(row) => output_rows.push(row),
                Err(e) => {
                    tracing::warn!(
                        job_id = %job_id,
                        row = index + 1,
                        error = %e,
                        "Row failed, failing job",
                    );
                    if let Err(store_err) = self.store.fail(job_id, &e.to_string()).await {
                        tracing::error!(
                            job_id = %job_id,
                            error = %store_err,
                            "Failed to persist job failure",
                        );
                    }
                    return;
                }
            }
        }

        let output_csv = render_table(&output_rows);
        if let Err(e) = self.store.complete(job_id, &output_csv).await {
            // The job is now stuck in Processing. There is no
            // reconciliation pass; operators find these via this log line.
            tracing::error!(job_id = %job_id, error = %e, "Failed to persist job completion");
            return;
        }

        tracing::info!(job_id = %job_id, rows = output_rows.len(), "Job completed");

        // Fire-and-forget: the terminal status is already durable, a
        // delivery failure must not affect it.
        if let Some(url) = &job.webhook_url {
            if let Err(e) = self.notifier.notify(url, job_id, &output_csv).await {
                tracing::warn!(job_id = %job_id, url, error = %e, "Completion webhook failed");
            }
        }
    }
}
