//! Identifier newtypes for the domain entities.
//!
//! Every entity gets its own UUID wrapper so that a tour id can never be
//! passed where a traveller id is expected. All of them share the same
//! surface: `new()` (random v4), `from_uuid`, `as_uuid`, `Display`.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing `Uuid`.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner `Uuid`.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

entity_id! {
    /// Unique identifier for a [`Traveller`](crate::Traveller).
    TravellerId
}

entity_id! {
    /// Unique identifier for a [`Visiting`](crate::Visiting) (a booking).
    VisitingId
}

entity_id! {
    /// Unique identifier for a [`Tour`](crate::Tour).
    TourId
}

entity_id! {
    /// Unique identifier for a [`Continent`](crate::Continent).
    ContinentId
}

entity_id! {
    /// Unique identifier for a [`Country`](crate::Country).
    CountryId
}

entity_id! {
    /// Unique identifier for a [`Destination`](crate::Destination).
    DestinationId
}

entity_id! {
    /// Unique identifier for an [`AdventureStyle`](crate::AdventureStyle).
    AdventureStyleId
}

entity_id! {
    /// Unique identifier for a [`ContactMessage`](crate::ContactMessage).
    ContactMessageId
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types_with_stable_display() {
        let uuid = Uuid::new_v4();
        let id = TourId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn serde_is_transparent() {
        let id = VisitingId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: VisitingId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
