//! # Toss & Trips Confirmation Pipeline
//!
//! The asynchronous email pipeline: when a booking (or a contact
//! message) is committed, a job is enqueued; a worker later loads the
//! record with its associations, derives pricing, builds a typed
//! rendering context, renders HTML with a plain-text fallback, composes
//! a multipart message (operator CC'd, brand logo inlined when present
//! on disk), and sends it.
//!
//! # Control Flow
//!
//! ```text
//! booking commit ──► schedule::booking_confirmation (post-commit)
//!                          │
//!                          ▼
//!                     Job queue ──► ConfirmationPipeline::handle
//!                          ▲              │
//!                          │              ├─ load view ── gone? ──► Abort
//!                retry with backoff       ├─ pricing (absent ≠ zero)
//!                (60s, 120s, 240s,        ├─ context + render
//!                 then give up)           ├─ compose (CC, cid:logo)
//!                          │              └─ send ── error? ──► Retry
//!                          └──────────────────────────────────┘
//! ```
//!
//! The pipeline holds no state between invocations and never writes to
//! the database; re-running a job for the same id produces byte-identical
//! HTML from the same inputs.

pub mod config;
pub mod context;
pub mod handler;
pub mod job;
pub mod render;
pub mod schedule;
pub mod source;

pub use config::{CompanyIdentity, PipelineConfig};
pub use context::{BookingEmailContext, PricingBlock};
pub use handler::ConfirmationPipeline;
pub use job::{Job, PipelineQueue};
pub use source::BookingSource;
