//! Continent and country endpoints.

use crate::error::AppError;
use crate::state::AppState;
use crate::WebResult;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tnt_core::ids::ContinentId;
use tnt_core::Country;
use uuid::Uuid;

/// Country fields exposed by the API.
#[derive(Debug, Serialize)]
pub struct CountryResponse {
    /// Identifier.
    pub id: Uuid,
    /// Country name.
    pub name: String,
    /// ISO 3-letter code.
    pub code: String,
    /// URL slug.
    pub slug: String,
}

impl From<Country> for CountryResponse {
    fn from(country: Country) -> Self {
        Self {
            id: *country.id.as_uuid(),
            name: country.name,
            code: country.code,
            slug: country.slug,
        }
    }
}

/// A continent with its countries.
#[derive(Debug, Serialize)]
pub struct ContinentWithCountriesResponse {
    /// Identifier.
    pub id: Uuid,
    /// Continent name.
    pub name: String,
    /// Short code, e.g. `AF`.
    pub code: Option<String>,
    /// Countries, A–Z.
    pub countries: Vec<CountryResponse>,
}

/// `GET /api/continents/:id/countries`
pub async fn continent_countries(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<Json<ContinentWithCountriesResponse>> {
    let (continent, countries) = state
        .store
        .continent_with_countries(ContinentId::from_uuid(id))
        .await?;

    Ok(Json(ContinentWithCountriesResponse {
        id: *continent.id.as_uuid(),
        name: continent.name,
        code: continent.code,
        countries: countries.into_iter().map(CountryResponse::from).collect(),
    }))
}

/// `?slug=` query for the slug lookup.
#[derive(Debug, Deserialize)]
pub struct SlugQuery {
    /// The country slug; required.
    pub slug: Option<String>,
}

/// `GET /api/countries/by-slug?slug=south-africa`
pub async fn country_by_slug(
    State(state): State<AppState>,
    Query(query): Query<SlugQuery>,
) -> WebResult<Json<CountryResponse>> {
    let slug = query
        .slug
        .ok_or_else(|| AppError::bad_request("slug parameter is required"))?;

    let country = state
        .store
        .country_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found("Country not found"))?;
    Ok(Json(CountryResponse::from(country)))
}
