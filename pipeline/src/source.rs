//! Data access seam for the pipeline.

use async_trait::async_trait;
use tnt_core::ids::{ContactMessageId, TravellerId, VisitingId};
use tnt_core::{ContactMessage, TravellerCount};
use tnt_store::{ConfirmationView, Store};

/// What the pipeline reads. `Ok(None)` means "record gone" (terminal);
/// `Err` means the read itself failed (retryable, or recoverable for the
/// traveller count).
///
/// The production implementation is [`Store`]; tests substitute an
/// in-memory source.
#[async_trait]
pub trait BookingSource: Send + Sync + 'static {
    /// Eager-load a booking with traveller, tour, and destinations.
    async fn confirmation_view(
        &self,
        id: VisitingId,
    ) -> anyhow::Result<Option<ConfirmationView>>;

    /// The optional traveller-count association.
    async fn traveller_count(&self, id: TravellerId)
        -> anyhow::Result<Option<TravellerCount>>;

    /// Load a contact message.
    async fn contact_message(
        &self,
        id: ContactMessageId,
    ) -> anyhow::Result<Option<ContactMessage>>;
}

#[async_trait]
impl BookingSource for Store {
    async fn confirmation_view(
        &self,
        id: VisitingId,
    ) -> anyhow::Result<Option<ConfirmationView>> {
        Ok(Self::confirmation_view(self, id).await?)
    }

    async fn traveller_count(
        &self,
        id: TravellerId,
    ) -> anyhow::Result<Option<TravellerCount>> {
        Ok(Self::traveller_count(self, id).await?)
    }

    async fn contact_message(
        &self,
        id: ContactMessageId,
    ) -> anyhow::Result<Option<ContactMessage>> {
        Ok(Self::contact_message(self, id).await?)
    }
}
