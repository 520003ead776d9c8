//! # Toss & Trips Mailer
//!
//! Outgoing email for the booking backend.
//!
//! The [`Mailer`] trait abstracts over delivery so the confirmation
//! pipeline can be exercised without a network:
//!
//! - [`SmtpMailer`] — production delivery over SMTP via `lettre`
//! - [`ConsoleMailer`] — logs the message instead of sending (development)
//! - [`RecordingMailer`] — captures messages and scripts failures (tests,
//!   behind the `test-utils` feature)
//!
//! Messages are [`OutgoingEmail`] values: subject, plain-text body, HTML
//! alternative, sender, recipients, CC list, and an optional inline image
//! referenced from the HTML by content id.

pub mod console;
pub mod error;
pub mod message;
#[cfg(feature = "test-utils")]
pub mod recording;
pub mod smtp;
pub mod transport;

pub use console::ConsoleMailer;
pub use error::MailError;
pub use message::{InlineImage, OutgoingEmail};
#[cfg(feature = "test-utils")]
pub use recording::RecordingMailer;
pub use smtp::{SmtpConfig, SmtpMailer};
pub use transport::Mailer;

/// Result type for mail operations.
pub type Result<T> = std::result::Result<T, MailError>;
