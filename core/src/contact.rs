//! Inbound contact-form submissions.

use crate::ids::ContactMessageId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message submitted through the public contact form.
///
/// Creation triggers the thank-you email side channel, the structural
/// twin of the booking confirmation pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Identifier.
    pub id: ContactMessageId,
    /// Sender's full name.
    pub full_name: String,
    /// Sender's email address.
    pub email: String,
    /// Message subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// When the message was received.
    pub created_at: DateTime<Utc>,
}
