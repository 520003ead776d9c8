//! Mail delivery errors.

use thiserror::Error;

/// Errors raised while composing or delivering an email.
///
/// Every variant is retryable from the pipeline's point of view except
/// address/composition errors, which will fail identically on retry but
/// are surfaced the same way; the retry cap bounds the damage.
#[derive(Debug, Error)]
pub enum MailError {
    /// A sender or recipient address failed to parse.
    #[error("invalid email address '{address}': {reason}")]
    InvalidAddress {
        /// The offending address.
        address: String,
        /// Parser detail.
        reason: String,
    },

    /// The message could not be assembled.
    #[error("failed to build email: {0}")]
    Build(String),

    /// The transport refused or failed to deliver.
    #[error("failed to send email: {0}")]
    Transport(String),
}
