//! Recording mailer for tests.

use crate::error::MailError;
use crate::message::OutgoingEmail;
use crate::transport::Mailer;
use crate::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// Captures sent emails and can script transport failures.
///
/// `fail_times(n)` makes the first `n` sends fail with a transport
/// error, which is how the retry scenarios are exercised without a
/// broken SMTP server.
#[derive(Clone, Debug, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
    failures_remaining: Arc<AtomicU32>,
}

impl RecordingMailer {
    /// Create a recorder that accepts every send.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder whose first `n` sends fail.
    #[must_use]
    pub fn fail_times(n: u32) -> Self {
        let mailer = Self::default();
        mailer.failures_remaining.store(n, Ordering::SeqCst);
        mailer
    }

    /// Emails delivered so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (a test already panicked).
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of successful deliveries.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (a test already panicked).
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(MailError::Transport(
                "scripted transport failure".to_string(),
            ));
        }
        #[allow(clippy::unwrap_used)] // test utility, poisoning means a prior panic
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
