//! In-process job queue and worker pool.
//!
//! The submission gateway hands `{job_id, rows, webhook_url}` to
//! [`JobQueue::enqueue`] and returns immediately; a fixed pool of worker
//! tasks consumes the channel and runs the executor. Jobs run in
//! parallel across workers, sequentially within one worker.
//!
//! Shutdown: drop every [`JobQueue`] clone. The channel closes, each
//! worker finishes its in-flight job and exits, and the spawn handles
//! resolve -- the draining behavior `main` relies on.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::executor::{ExecuteJob, JobExecutor};

/// Maximum number of submitted-but-unclaimed jobs held in the channel.
/// Submissions beyond this backpressure in the gateway handler.
const QUEUE_CAPACITY: usize = 64;

/// Sending half of the job queue, held in the API state.
#[derive(Clone)]
pub struct JobQueue {
    tx: mpsc::Sender<ExecuteJob>,
}

/// Error returned when enqueueing after the worker pool has shut down.
#[derive(Debug, thiserror::Error)]
#[error("job queue is closed")]
pub struct QueueClosed;

impl JobQueue {
    /// Hand one job off to the worker pool.
    pub async fn enqueue(&self, job: ExecuteJob) -> Result<(), QueueClosed> {
        self.tx.send(job).await.map_err(|_| QueueClosed)
    }
}

/// Spawn `workers` executor tasks sharing one queue.
///
/// Returns the queue handle plus the join handles `main` awaits during
/// graceful shutdown.
pub fn start(executor: Arc<JobExecutor>, workers: usize) -> (JobQueue, Vec<JoinHandle<()>>) {
    let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
    let rx = Arc::new(Mutex::new(rx));

    let handles = (0..workers)
        .map(|worker| {
            let rx = Arc::clone(&rx);
            let executor = Arc::clone(&executor);
            tokio::spawn(worker_loop(worker, rx, executor))
        })
        .collect();

    tracing::info!(workers, "Job worker pool started");
    (JobQueue { tx }, handles)
}

async fn worker_loop(
    worker: usize,
    rx: Arc<Mutex<mpsc::Receiver<ExecuteJob>>>,
    executor: Arc<JobExecutor>,
) {
    loop {
        // Take the next job while holding the lock, then release it so
        // other workers can receive while this one executes.
        let job = rx.lock().await.recv().await;
        match job {
            Some(job) => {
                tracing::debug!(worker, job_id = %job.job_id, "Worker picked up job");
                executor.execute(job).await;
            }
            None => break,
        }
    }
    tracing::debug!(worker, "Job worker stopped");
}
