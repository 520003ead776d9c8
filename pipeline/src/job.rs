//! Pipeline job payloads.

use tnt_core::ids::{ContactMessageId, VisitingId};
use tnt_queue::JobQueue;

/// Jobs the confirmation worker executes.
///
/// Payloads carry only the record id; the handler re-fetches everything
/// at execution time, so a job enqueued before an edit still sends
/// current data, and redelivery is harmless.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Job {
    /// Send the booking-confirmation email for one visiting.
    SendBookingConfirmation {
        /// The committed booking.
        visiting_id: VisitingId,
    },
    /// Send the thank-you email for one contact-form submission.
    SendContactThankYou {
        /// The committed message.
        contact_message_id: ContactMessageId,
    },
}

/// The queue handle type used across the HTTP layer.
pub type PipelineQueue = JobQueue<Job>;
