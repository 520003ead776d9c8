//! # Toss & Trips Job Queue
//!
//! A small in-process background job queue with at-least-once semantics,
//! delayed delivery, and bounded exponential-backoff retry.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  enqueue / enqueue_after   ┌──────────────┐
//! │  HTTP layer  │ ─────────────────────────► │   channel    │
//! └──────────────┘     (after DB commit)      └──────┬───────┘
//!                                                    │
//!                                                    ▼
//!                                             ┌──────────────┐
//!                                             │    Worker    │
//!                                             │  handle(job) │
//!                                             └──────┬───────┘
//!                      Completed → done               │
//!                      Abort     → dropped, no retry  │
//!                      Retry     → re-enqueued with   │
//!                                  backoff, capped    ▼
//! ```
//!
//! # Key Principles
//!
//! - **Enqueue after commit**: callers enqueue only once the triggering
//!   database write is durable, so a worker never observes a missing row
//!   for a job that should succeed.
//! - **At-least-once**: a job may run more than once; handlers must be
//!   idempotent.
//! - **Explicit outcomes**: handlers return [`TaskOutcome`] instead of
//!   raising control-flow errors; the worker loop interprets it.
//! - **Bounded retry**: [`RetryPolicy`] computes the backoff schedule and
//!   caps the number of retries; exhaustion is logged and counted, never
//!   silently dropped.

pub mod retry;
pub mod task;
pub mod worker;

pub use retry::RetryPolicy;
pub use task::{JobHandler, JobQueue, JobReceiver, QueueError, TaskOutcome};
pub use worker::Worker;
