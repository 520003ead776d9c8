//! Router configuration.

use crate::api::{contact, geo, health, styles, tours, travellers, visitings};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Health checks live at the root; everything else is under `/api`.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Catalog
        .route("/continents/:id/countries", get(geo::continent_countries))
        .route("/countries/by-slug", get(geo::country_by_slug))
        .route("/adventure-styles", get(styles::list_styles))
        .route("/adventure-styles/:id", get(styles::get_style))
        .route("/countries/:id/tours", get(tours::list_country_tours))
        .route("/countries/:id/cities", get(tours::list_country_cities))
        .route("/tours/:id", get(tours::get_tour))
        // Travellers
        .route("/travellers", get(travellers::list_travellers))
        .route("/travellers", post(travellers::create_traveller))
        .route("/travellers/:id", get(travellers::get_traveller))
        .route("/travellers/:id", put(travellers::update_traveller))
        .route("/travellers/:id", delete(travellers::delete_traveller))
        // Bookings
        .route("/visiting", get(visitings::list_visitings))
        .route("/visiting", post(visitings::create_visiting))
        .route("/visits/:id", get(visitings::get_visiting))
        .route("/visits/:id", put(visitings::update_visiting))
        .route("/visits/:id", delete(visitings::delete_visiting))
        // Contact form
        .route("/contact", post(contact::create_contact_message));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api", api_routes)
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
