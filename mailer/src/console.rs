//! Console mailer for development.

use crate::message::OutgoingEmail;
use crate::transport::Mailer;
use crate::Result;
use async_trait::async_trait;
use tracing::info;

/// Logs emails instead of sending them.
///
/// Useful in development where SMTP credentials are not configured; the
/// full HTML is logged at debug level, the envelope at info.
#[derive(Clone, Debug, Default)]
pub struct ConsoleMailer;

impl ConsoleMailer {
    /// Create a new console mailer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        info!(
            to = ?email.to,
            cc = ?email.cc,
            from = %email.from,
            subject = %email.subject,
            inline_image = email.inline_image.is_some(),
            "📧 email (console mode, not sent)"
        );
        tracing::debug!(html = %email.html_body, "email body");
        Ok(())
    }
}
