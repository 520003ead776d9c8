//! Bookings ("visitings").

use crate::ids::{TourId, TravellerId, VisitingId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A traveller's reservation of one tour.
///
/// At most one visiting exists per `(traveller, tour)` pair — the store
/// enforces this with a unique constraint. The record is immutable after
/// creation except for `notes`; deleting the traveller deletes it,
/// deleting the tour is refused while visitings reference it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Visiting {
    /// Identifier.
    pub id: VisitingId,
    /// Country the booking request originated from.
    pub request_country: String,
    /// The lead traveller. Cascade-deleted with them.
    pub traveller_id: TravellerId,
    /// The tour being booked.
    pub tour_id: TourId,
    /// When this booking was created. Set once by the store.
    pub booked_on: DateTime<Utc>,
    /// Special requests or notes; empty when none.
    pub notes: String,
}

impl Visiting {
    /// Notes for display: the text, or `"None"` when empty.
    #[must_use]
    pub fn notes_display(&self) -> &str {
        if self.notes.is_empty() {
            "None"
        } else {
            &self.notes
        }
    }
}
