//! # Toss & Trips Core
//!
//! Domain types and policies for the tour-booking backend.
//!
//! This crate is pure data and logic: entities, value objects, display
//! formatting, and the pricing/ranking policies. It performs no I/O —
//! persistence lives in `tnt-store`, delivery in `tnt-mailer`, and the
//! asynchronous confirmation pipeline in `tnt-pipeline`.
//!
//! ## Entity Overview
//!
//! - [`Traveller`] — lead contact for a booking, owns at most one
//!   [`TravellerCount`]
//! - [`Visiting`] — a traveller's reservation of one [`Tour`]
//! - [`Tour`] — a sellable package with pricing, dates and destinations
//! - [`ContactMessage`] — an inbound contact-form submission
//! - Catalog: [`Continent`], [`Country`], [`Destination`], [`AdventureStyle`]

pub mod booking;
pub mod contact;
pub mod format;
pub mod geo;
pub mod ids;
pub mod money;
pub mod policy;
pub mod tour;
pub mod traveller;

pub use booking::Visiting;
pub use contact::ContactMessage;
pub use geo::{Continent, Country};
pub use ids::{
    AdventureStyleId, ContactMessageId, ContinentId, CountryId, DestinationId, TourId,
    TravellerId, VisitingId,
};
pub use money::Money;
pub use policy::{PriceQuote, PricingPolicy, RankingPolicy};
pub use tour::{AdventureStyle, Destination, Tour};
pub use traveller::{Traveller, TravellerCount, ValidationError};
