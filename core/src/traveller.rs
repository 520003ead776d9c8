//! Travellers and their party breakdown.

use crate::ids::TravellerId;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Phone numbers: optional `+`, optional leading `1`, then 9–15 digits.
#[allow(clippy::unwrap_used)] // pattern is a compile-time constant
pub static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?1?\d{9,15}$").unwrap());

/// Validation failures for traveller data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Phone number does not match the accepted pattern.
    #[error("phone number must match '+999999999' with 9 to 15 digits")]
    InvalidPhone,

    /// Check-out date falls before check-in.
    #[error("check-out date must be on or after check-in date")]
    CheckOutBeforeCheckIn,

    /// Hotel rating outside the 1–5 star range.
    #[error("hotel rating must be between 1 and 5 stars")]
    RatingOutOfRange,
}

/// The lead contact for a booking.
///
/// A traveller owns at most one [`TravellerCount`], carried separately
/// because it is optional and loaded on demand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Traveller {
    /// Identifier.
    pub id: TravellerId,
    /// Full name of the lead traveller.
    pub name: String,
    /// Contact phone, e.g. `+12025550123`.
    pub phone: String,
    /// Contact email address.
    pub email: String,
    /// Country of citizenship.
    pub nationality: String,
    /// Arrival / check-in date.
    pub check_in_date: NaiveDate,
    /// Departure / check-out date. Never before `check_in_date`.
    pub check_out_date: NaiveDate,
    /// Preferred hotel star rating, 1–5.
    pub hotel_rating: u8,
    /// Whether a direct (non-stop) flight is required.
    pub is_direct_flight: bool,
}

impl Traveller {
    /// Number of nights between check-in and check-out.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }

    /// Checks the field invariants: phone pattern, date ordering, rating
    /// range.
    ///
    /// # Errors
    ///
    /// Returns the first violated [`ValidationError`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !PHONE_PATTERN.is_match(&self.phone) {
            return Err(ValidationError::InvalidPhone);
        }
        if self.check_out_date < self.check_in_date {
            return Err(ValidationError::CheckOutBeforeCheckIn);
        }
        if !(1..=5).contains(&self.hotel_rating) {
            return Err(ValidationError::RatingOutOfRange);
        }
        Ok(())
    }
}

/// Breakdown of a traveller's party: adults, children, infants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravellerCount {
    /// Number of adults (≥ 18 years).
    pub adults: u16,
    /// Number of children (2–17 years).
    pub children: u16,
    /// Number of infants (0–2 years).
    pub infants: u16,
}

impl Default for TravellerCount {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants: 0,
        }
    }
}

/// Renders `"2 adults, 1 child"` — only non-zero groups, pluralized,
/// `"—"` when everything is zero.
impl fmt::Display for TravellerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.adults > 0 {
            let s = if self.adults == 1 { "" } else { "s" };
            parts.push(format!("{} adult{s}", self.adults));
        }
        if self.children > 0 {
            let suffix = if self.children == 1 { "child" } else { "children" };
            parts.push(format!("{} {suffix}", self.children));
        }
        if self.infants > 0 {
            let s = if self.infants == 1 { "" } else { "s" };
            parts.push(format!("{} infant{s}", self.infants));
        }
        if parts.is_empty() {
            write!(f, "—")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn traveller() -> Traveller {
        Traveller {
            id: TravellerId::new(),
            name: "Asha Rao".to_string(),
            phone: "+12025550123".to_string(),
            email: "asha@example.com".to_string(),
            nationality: "India".to_string(),
            check_in_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2025, 6, 17).unwrap(),
            hotel_rating: 4,
            is_direct_flight: true,
        }
    }

    #[test]
    fn nights_is_day_difference() {
        assert_eq!(traveller().nights(), 7);
    }

    #[test]
    fn same_day_stay_is_zero_nights() {
        let mut t = traveller();
        t.check_out_date = t.check_in_date;
        assert_eq!(t.nights(), 0);
        assert_eq!(t.validate(), Ok(()));
    }

    #[test]
    fn check_out_before_check_in_rejected() {
        let mut t = traveller();
        t.check_out_date = t.check_in_date - chrono::Duration::days(1);
        assert_eq!(t.validate(), Err(ValidationError::CheckOutBeforeCheckIn));
    }

    #[test]
    fn phone_pattern_accepts_country_code() {
        for ok in ["+12025550123", "12025550123", "202555012", "+999999999999999"] {
            assert!(PHONE_PATTERN.is_match(ok), "{ok} should match");
        }
        for bad in ["12345678", "+1-202-555-0123", "phone", "+1202555012345678"] {
            assert!(!PHONE_PATTERN.is_match(bad), "{bad} should not match");
        }
    }

    #[test]
    fn rating_range_enforced() {
        let mut t = traveller();
        t.hotel_rating = 0;
        assert_eq!(t.validate(), Err(ValidationError::RatingOutOfRange));
        t.hotel_rating = 6;
        assert_eq!(t.validate(), Err(ValidationError::RatingOutOfRange));
    }

    #[test]
    fn default_count_is_one_adult() {
        let count = TravellerCount::default();
        assert_eq!(count.adults, 1);
        assert_eq!(count.to_string(), "1 adult");
    }

    #[test]
    fn breakdown_pluralizes_and_skips_zeroes() {
        let count = TravellerCount {
            adults: 2,
            children: 1,
            infants: 0,
        };
        assert_eq!(count.to_string(), "2 adults, 1 child");
    }

    #[test]
    fn empty_breakdown_renders_dash() {
        let count = TravellerCount {
            adults: 0,
            children: 0,
            infants: 0,
        };
        assert_eq!(count.to_string(), "—");
    }
}
