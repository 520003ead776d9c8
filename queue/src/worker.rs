//! The worker loop: pulls jobs and interprets task outcomes.

use crate::retry::RetryPolicy;
use crate::task::{Envelope, JobHandler, JobQueue, JobReceiver, TaskOutcome};
use tracing::{error, info, warn};

/// Executes jobs from a queue, one at a time, applying the retry policy.
///
/// Each job runs to completion before the next is picked up; there are no
/// suspension points inside a single attempt beyond the handler's own
/// awaits. A retryable failure re-enqueues the job with backoff until the
/// policy's retry cap; exhaustion is surfaced in logs and metrics.
///
/// # Example
///
/// ```ignore
/// let (queue, receiver) = JobQueue::new();
/// let worker = Worker::new(handler, RetryPolicy::default(), queue.clone(), receiver);
/// tokio::spawn(worker.run());
/// queue.enqueue(Job::SendBookingConfirmation { visiting_id })?;
/// ```
pub struct Worker<H: JobHandler> {
    handler: H,
    policy: RetryPolicy,
    queue: JobQueue<H::Job>,
    receiver: JobReceiver<H::Job>,
}

impl<H: JobHandler> Worker<H> {
    /// Create a worker over the receiving half of a queue.
    ///
    /// The `queue` handle is the same queue's sending half; the worker
    /// uses it to reschedule retries.
    #[must_use]
    pub fn new(
        handler: H,
        policy: RetryPolicy,
        queue: JobQueue<H::Job>,
        receiver: JobReceiver<H::Job>,
    ) -> Self {
        Self {
            handler,
            policy,
            queue,
            receiver,
        }
    }

    /// Run until every sending handle (including retry scheduling) is gone.
    pub async fn run(mut self) {
        info!(max_retries = self.policy.max_retries, "job worker started");
        while let Some(envelope) = self.receiver.rx.recv().await {
            self.process(envelope).await;
        }
        info!("job worker stopped");
    }

    async fn process(&self, envelope: Envelope<H::Job>) {
        let retries = envelope.retries;
        match self.handler.handle(&envelope.job, retries).await {
            TaskOutcome::Completed(message) => {
                if retries > 0 {
                    info!(retries, message = %message, "job succeeded after retry");
                } else {
                    info!(message = %message, "job completed");
                }
                metrics::counter!("jobs.completed").increment(1);
            }
            TaskOutcome::Abort(reason) => {
                error!(job = ?envelope.job, reason = %reason, "job aborted, not retrying");
                metrics::counter!("jobs.aborted").increment(1);
            }
            TaskOutcome::Retry(err) => {
                if retries >= self.policy.max_retries {
                    error!(
                        job = ?envelope.job,
                        retries,
                        error = %err,
                        "job failed after max retries, giving up"
                    );
                    metrics::counter!("jobs.exhausted").increment(1);
                    return;
                }

                let retry = retries + 1;
                let delay = self.policy.delay_for_retry(retry);
                warn!(
                    job = ?envelope.job,
                    retry,
                    max_retries = self.policy.max_retries,
                    delay_secs = delay.as_secs(),
                    error = %err,
                    "job failed, retrying"
                );
                metrics::counter!("jobs.retried").increment(1);

                let rescheduled = Envelope {
                    job: envelope.job,
                    retries: retry,
                };
                if self.queue.send(rescheduled, delay).is_err() {
                    error!("retry dropped: queue closed");
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Fails the first `failures` attempts, then succeeds.
    struct FlakyHandler {
        attempts: Arc<AtomicU32>,
        failures: u32,
    }

    #[async_trait]
    impl JobHandler for FlakyHandler {
        type Job = &'static str;

        async fn handle(&self, job: &Self::Job, _retries_so_far: u32) -> TaskOutcome {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if attempt < self.failures {
                TaskOutcome::Retry(anyhow::anyhow!("attempt {attempt} failed"))
            } else {
                TaskOutcome::Completed(format!("{job} done"))
            }
        }
    }

    /// Always aborts.
    struct AbortingHandler {
        attempts: Arc<AtomicU32>,
    }

    #[async_trait]
    impl JobHandler for AbortingHandler {
        type Job = &'static str;

        async fn handle(&self, _job: &Self::Job, _retries_so_far: u32) -> TaskOutcome {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            TaskOutcome::Abort("record not found".to_string())
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::builder()
            .initial_delay(Duration::from_millis(5))
            .max_delay(Duration::from_millis(50))
            .build()
    }

    #[tokio::test]
    async fn succeeds_after_two_failures_with_two_retries() {
        let attempts = Arc::new(AtomicU32::new(0));
        let (queue, receiver) = JobQueue::new();
        let handler = FlakyHandler {
            attempts: Arc::clone(&attempts),
            failures: 2,
        };
        let worker = Worker::new(handler, fast_policy(), queue.clone(), receiver);
        let running = tokio::spawn(worker.run());

        queue.enqueue("booking").unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Initial attempt + 2 retries.
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        running.abort();
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let attempts = Arc::new(AtomicU32::new(0));
        let (queue, receiver) = JobQueue::new();
        let handler = FlakyHandler {
            attempts: Arc::clone(&attempts),
            failures: u32::MAX,
        };
        let worker = Worker::new(handler, fast_policy(), queue.clone(), receiver);
        let running = tokio::spawn(worker.run());

        queue.enqueue("booking").unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        // Initial attempt + 3 retries, then exhausted.
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
        running.abort();
    }

    #[tokio::test]
    async fn abort_is_never_retried() {
        let attempts = Arc::new(AtomicU32::new(0));
        let (queue, receiver) = JobQueue::new();
        let handler = AbortingHandler {
            attempts: Arc::clone(&attempts),
        };
        let worker = Worker::new(handler, fast_policy(), queue.clone(), receiver);
        let running = tokio::spawn(worker.run());

        queue.enqueue("missing booking").unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        running.abort();
    }

    #[tokio::test]
    async fn handler_sees_retry_counts_in_order() {
        struct RecordingHandler {
            seen: Arc<std::sync::Mutex<Vec<u32>>>,
        }

        #[async_trait]
        impl JobHandler for RecordingHandler {
            type Job = &'static str;

            async fn handle(&self, _job: &Self::Job, retries_so_far: u32) -> TaskOutcome {
                self.seen.lock().unwrap().push(retries_so_far);
                TaskOutcome::Retry(anyhow::anyhow!("always fails"))
            }
        }

        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let (queue, receiver) = JobQueue::new();
        let handler = RecordingHandler {
            seen: Arc::clone(&seen),
        };
        let worker = Worker::new(handler, fast_policy(), queue.clone(), receiver);
        let running = tokio::spawn(worker.run());

        queue.enqueue("job").unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3]);
        running.abort();
    }
}
