//! The typed rendering context for confirmation emails.
//!
//! Everything the template interpolates is pre-formatted here as display
//! strings, so the renderer is a pure function and the "price absent"
//! branch is a compile-time-checked `Option`, not a missing map key.

use crate::config::CompanyIdentity;
use tnt_core::format::{us_date, us_datetime};
use tnt_core::{PricingPolicy, TravellerCount};
use tnt_store::ConfirmationView;

/// Breakdown shown when the traveller has no count row, or when the
/// count could not be read.
pub const DEFAULT_BREAKDOWN: &str = "1 Adult";

/// Destinations line for tours with no linked destinations.
pub const DEFAULT_DESTINATIONS: &str = "Various destinations";

/// Currency-formatted pricing fields.
///
/// Present only when the tour has a base price — a `None` block renders
/// as "price not available", never as `$0.00`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PricingBlock {
    /// The undiscounted price, e.g. `$2,500.00`.
    pub original_price: String,
    /// The discount, e.g. `25%`.
    pub discount: String,
    /// The derived final price, e.g. `$1,875.00`.
    pub final_price: String,
}

/// Flat display-ready context for the booking-confirmation template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingEmailContext {
    /// Lead traveller's name.
    pub traveller_name: String,
    /// Lead traveller's email.
    pub traveller_email: String,
    /// Lead traveller's phone.
    pub traveller_phone: String,
    /// Lead traveller's nationality.
    pub traveller_nationality: String,
    /// Country the booking request came from.
    pub request_country: String,
    /// Tour title.
    pub tour_title: String,
    /// Tour country name.
    pub tour_country: String,
    /// Adventure style name.
    pub tour_adventure_style: String,
    /// Comma-joined destination names, or [`DEFAULT_DESTINATIONS`].
    pub tour_destinations: String,
    /// Start city.
    pub tour_start_city: String,
    /// End city.
    pub tour_end_city: String,
    /// Duration display string.
    pub tour_duration: String,
    /// Departure date, US format.
    pub tour_departure: String,
    /// Tour rating display, `"4 Star"` or `"Not specified"`.
    pub tour_rating: String,
    /// Check-in date, US format.
    pub check_in_date: String,
    /// Check-out date, US format.
    pub check_out_date: String,
    /// Nights between check-in and check-out.
    pub nights: i64,
    /// Party breakdown string, or [`DEFAULT_BREAKDOWN`].
    pub traveller_breakdown: String,
    /// Hotel star rating display, `"4 Star"`.
    pub hotel_rating: String,
    /// `"Yes"` / `"No"`.
    pub direct_flight: String,
    /// Booking notes, `"None"` when empty.
    pub notes: String,
    /// Pricing fields; absent when the tour has no base price.
    pub pricing: Option<PricingBlock>,
    /// Booking timestamp, US format with time.
    pub booked_on: String,
    /// Company display name.
    pub company_name: String,
    /// Company site URL.
    pub company_url: String,
}

impl BookingEmailContext {
    /// Assemble the context from the eager-loaded view.
    ///
    /// `count` is the separately loaded traveller breakdown; pass `None`
    /// both when the row does not exist and when reading it failed — the
    /// caller logs the difference, the email shows [`DEFAULT_BREAKDOWN`]
    /// either way.
    #[must_use]
    pub fn build(
        view: &ConfirmationView,
        count: Option<TravellerCount>,
        pricing_policy: PricingPolicy,
        company: &CompanyIdentity,
    ) -> Self {
        let tour = &view.tour;
        let traveller = &view.traveller;

        let destinations = if view.destinations.is_empty() {
            DEFAULT_DESTINATIONS.to_string()
        } else {
            view.destinations.join(", ")
        };

        let pricing = pricing_policy
            .quote(tour.price, tour.discount_percent)
            .map(|quote| PricingBlock {
                original_price: quote.base.to_string(),
                discount: format!("{}%", quote.discount_percent),
                final_price: quote.final_price.to_string(),
            });

        Self {
            traveller_name: traveller.name.clone(),
            traveller_email: traveller.email.clone(),
            traveller_phone: traveller.phone.clone(),
            traveller_nationality: traveller.nationality.clone(),
            request_country: view.visiting.request_country.clone(),
            tour_title: tour.title.clone(),
            tour_country: view.tour_country.clone(),
            tour_adventure_style: view.adventure_style.clone(),
            tour_destinations: destinations,
            tour_start_city: tour.start_city.clone(),
            tour_end_city: tour.end_city.clone(),
            tour_duration: tour.duration_display(),
            tour_departure: tour.departure_date_us(),
            tour_rating: tour.rating_display(),
            check_in_date: us_date(traveller.check_in_date),
            check_out_date: us_date(traveller.check_out_date),
            nights: traveller.nights(),
            traveller_breakdown: count
                .map_or_else(|| DEFAULT_BREAKDOWN.to_string(), |c| c.to_string()),
            hotel_rating: format!("{} Star", traveller.hotel_rating),
            direct_flight: if traveller.is_direct_flight {
                "Yes".to_string()
            } else {
                "No".to_string()
            },
            notes: view.visiting.notes_display().to_string(),
            pricing,
            booked_on: us_datetime(view.visiting.booked_on),
            company_name: company.name.clone(),
            company_url: company.url.clone(),
        }
    }
}
