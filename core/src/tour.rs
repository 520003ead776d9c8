//! Tours, destinations and adventure styles.

use crate::format::us_date;
use crate::ids::{AdventureStyleId, CountryId, DestinationId, TourId};
use crate::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A sellable tour package.
///
/// Read-only from the confirmation pipeline's perspective; only the
/// catalog endpoints and maintenance commands mutate tours.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    /// Identifier.
    pub id: TourId,
    /// Package title, e.g. "Serengeti Safari Week".
    pub title: String,
    /// Country the tour operates in. Delete-protected while tours exist.
    pub country_id: CountryId,
    /// Number of days (0 if unknown).
    pub days: u16,
    /// Number of nights (0 if unknown).
    pub nights: u16,
    /// Hotel star rating for the package, 1–5; `None` when not rated.
    pub rating: Option<u8>,
    /// How many reviews the tour has collected.
    pub review_count: u32,
    /// Base price. `None` means "price not available", which is distinct
    /// from a zero price everywhere downstream.
    pub price: Option<Money>,
    /// Discount percentage (0–100); `None` is treated as 0.
    pub discount_percent: Option<f64>,
    /// Departure date.
    pub departure_date: NaiveDate,
    /// Adventure style of the package. Delete-protected while tours exist.
    pub adventure_style_id: AdventureStyleId,
    /// City the tour starts in.
    pub start_city: String,
    /// City the tour ends in.
    pub end_city: String,
}

impl Tour {
    /// Duration string in the catalog's fixed shape, `"7 nights 8 days"`,
    /// or empty when both counts are zero.
    #[must_use]
    pub fn duration(&self) -> String {
        if self.days == 0 && self.nights == 0 {
            String::new()
        } else {
            format!("{} nights {} days", self.nights, self.days)
        }
    }

    /// Duration for display: the duration string, or `"—"` when unknown.
    #[must_use]
    pub fn duration_display(&self) -> String {
        let duration = self.duration();
        if duration.is_empty() {
            "—".to_string()
        } else {
            duration
        }
    }

    /// Departure date as `MM/DD/YYYY`.
    #[must_use]
    pub fn departure_date_us(&self) -> String {
        us_date(self.departure_date)
    }

    /// Rating for display: `"4 Star"`, or `"Not specified"`.
    #[must_use]
    pub fn rating_display(&self) -> String {
        self.rating
            .map_or_else(|| "Not specified".to_string(), |r| format!("{r} Star"))
    }
}

/// A tourist attraction within a country.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Identifier.
    pub id: DestinationId,
    /// Attraction name, e.g. "Serengeti National Park".
    pub name: String,
    /// Country the destination belongs to.
    pub country_id: CountryId,
    /// Primary city for this destination.
    pub city: String,
    /// Optional details about the attraction.
    pub description: Option<String>,
}

/// A tour category, e.g. "Hiking", "Safari", "Cultural Tour".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventureStyle {
    /// Identifier.
    pub id: AdventureStyleId,
    /// Style name, unique.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tour() -> Tour {
        Tour {
            id: TourId::new(),
            title: "Serengeti Safari Week".to_string(),
            country_id: CountryId::new(),
            days: 8,
            nights: 7,
            rating: Some(4),
            review_count: 120,
            price: Some(Money::from_cents(250_000)),
            discount_percent: Some(10.0),
            departure_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            adventure_style_id: AdventureStyleId::new(),
            start_city: "Arusha".to_string(),
            end_city: "Arusha".to_string(),
        }
    }

    #[test]
    fn duration_string_shape() {
        assert_eq!(tour().duration(), "7 nights 8 days");
    }

    #[test]
    fn unknown_duration_displays_dash() {
        let mut t = tour();
        t.days = 0;
        t.nights = 0;
        assert_eq!(t.duration(), "");
        assert_eq!(t.duration_display(), "—");
    }

    #[test]
    fn departure_date_us_format() {
        assert_eq!(tour().departure_date_us(), "09/01/2025");
    }

    #[test]
    fn rating_display_fallback() {
        let mut t = tour();
        assert_eq!(t.rating_display(), "4 Star");
        t.rating = None;
        assert_eq!(t.rating_display(), "Not specified");
    }
}
