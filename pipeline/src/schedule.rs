//! Post-commit scheduling.
//!
//! These helpers are the only place confirmation jobs are enqueued. They
//! must be called *after* the creating transaction has committed — the
//! store's create methods return only once the row is durable, so calling
//! these with the returned id satisfies the ordering contract. Creation
//! is the only trigger; updates never enqueue.
//!
//! Enqueue failures are logged and swallowed: the HTTP caller that
//! created the record never observes pipeline problems.

use crate::job::{Job, PipelineQueue};
use tnt_core::ids::{ContactMessageId, VisitingId};
use tracing::{error, info};

/// Queue the confirmation email for a just-committed booking.
pub fn booking_confirmation(queue: &PipelineQueue, visiting_id: VisitingId) {
    match queue.enqueue(Job::SendBookingConfirmation { visiting_id }) {
        Ok(()) => info!(%visiting_id, "booking confirmation queued"),
        Err(err) => error!(%visiting_id, error = %err, "failed to queue booking confirmation"),
    }
}

/// Queue the thank-you email for a just-committed contact message.
pub fn contact_thank_you(queue: &PipelineQueue, contact_message_id: ContactMessageId) {
    match queue.enqueue(Job::SendContactThankYou { contact_message_id }) {
        Ok(()) => info!(%contact_message_id, "contact thank-you queued"),
        Err(err) => {
            error!(%contact_message_id, error = %err, "failed to queue contact thank-you");
        }
    }
}
