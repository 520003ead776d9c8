//! Task envelopes, outcomes, and the queue handle.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from queue operations.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The worker side of the queue has shut down.
    #[error("job queue is closed")]
    Closed,
}

/// The result of one execution attempt of a job.
///
/// Handlers never raise for control flow; they classify what happened and
/// the worker loop interprets it against the retry policy.
#[derive(Debug)]
pub enum TaskOutcome {
    /// The job finished; carries a human-readable confirmation.
    Completed(String),
    /// Terminal failure — do not retry (e.g. the record no longer exists).
    Abort(String),
    /// Retryable failure — the worker reschedules with backoff, capped by
    /// the policy.
    Retry(anyhow::Error),
}

/// A job handler executed by the [`Worker`](crate::Worker).
///
/// `retries_so_far` is 0 on the first attempt and counts the retries that
/// preceded this execution. Handlers must be idempotent: the queue is
/// at-least-once and a job can be redelivered.
#[async_trait]
pub trait JobHandler: Send + Sync + 'static {
    /// The job payload this handler consumes.
    type Job: Clone + Send + Sync + std::fmt::Debug + 'static;

    /// Execute one attempt of `job`.
    async fn handle(&self, job: &Self::Job, retries_so_far: u32) -> TaskOutcome;
}

/// Internal envelope carrying a job and its retry count.
#[derive(Debug, Clone)]
pub(crate) struct Envelope<J> {
    pub(crate) job: J,
    pub(crate) retries: u32,
}

/// Receiving half of a queue, consumed by exactly one worker.
pub struct JobReceiver<J> {
    pub(crate) rx: mpsc::UnboundedReceiver<Envelope<J>>,
}

/// Cloneable handle for scheduling jobs.
///
/// `enqueue` delivers as soon as the worker is free; `enqueue_after`
/// delays delivery without blocking the caller. Delivery order between
/// distinct jobs is not guaranteed.
#[derive(Debug)]
pub struct JobQueue<J> {
    tx: mpsc::UnboundedSender<Envelope<J>>,
}

impl<J> Clone for JobQueue<J> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<J: Clone + Send + Sync + std::fmt::Debug + 'static> JobQueue<J> {
    /// Create a queue and its receiving half.
    #[must_use]
    pub fn new() -> (Self, JobReceiver<J>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, JobReceiver { rx })
    }

    /// Schedule a job for immediate delivery.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Closed`] if the worker has shut down.
    pub fn enqueue(&self, job: J) -> Result<(), QueueError> {
        self.send(Envelope { job, retries: 0 }, Duration::ZERO)
    }

    /// Schedule a job for delivery after `delay`.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Closed`] if the worker has shut down.
    pub fn enqueue_after(&self, job: J, delay: Duration) -> Result<(), QueueError> {
        self.send(Envelope { job, retries: 0 }, delay)
    }

    pub(crate) fn send(&self, envelope: Envelope<J>, delay: Duration) -> Result<(), QueueError> {
        if delay.is_zero() {
            return self.tx.send(envelope).map_err(|_| QueueError::Closed);
        }
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(envelope).is_err() {
                tracing::warn!("delayed job dropped: queue closed before delivery");
            }
        });
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn enqueue_delivers_to_receiver() {
        let (queue, mut receiver) = JobQueue::new();
        queue.enqueue(7u32).unwrap();

        let envelope = receiver.rx.recv().await.unwrap();
        assert_eq!(envelope.job, 7);
        assert_eq!(envelope.retries, 0);
    }

    #[tokio::test]
    async fn enqueue_after_delays_delivery() {
        let (queue, mut receiver) = JobQueue::new();
        queue
            .enqueue_after(1u32, Duration::from_millis(30))
            .unwrap();

        // Nothing arrives immediately.
        assert!(receiver.rx.try_recv().is_err());

        let envelope = receiver.rx.recv().await.unwrap();
        assert_eq!(envelope.job, 1);
    }

    #[tokio::test]
    async fn enqueue_fails_after_receiver_dropped() {
        let (queue, receiver) = JobQueue::<u32>::new();
        drop(receiver);
        assert!(matches!(queue.enqueue(1), Err(QueueError::Closed)));
    }
}
