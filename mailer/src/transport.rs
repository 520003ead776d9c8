//! The delivery abstraction.

use crate::message::OutgoingEmail;
use crate::Result;
use async_trait::async_trait;

/// Email delivery.
///
/// Implementations must surface delivery failures as errors — the
/// confirmation pipeline's retry policy depends on send failures being
/// visible, never swallowed.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one email.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`](crate::MailError) when the message cannot be
    /// composed or the transport fails.
    async fn send(&self, email: &OutgoingEmail) -> Result<()>;
}

#[async_trait]
impl<M: Mailer + ?Sized> Mailer for std::sync::Arc<M> {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        (**self).send(email).await
    }
}
