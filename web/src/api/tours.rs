//! Tour catalog endpoints: country listing with filters, cities, detail.

use crate::pagination::PageQuery;
use crate::state::AppState;
use crate::WebResult;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tnt_core::ids::{AdventureStyleId, CountryId, DestinationId, TourId};
use tnt_core::{Money, RankingPolicy};
use tnt_store::{Paginated, TourFilters, TourOrdering, TourWithDestinations};
use uuid::Uuid;

/// Tour fields exposed by the API.
#[derive(Debug, Serialize)]
pub struct TourResponse {
    /// Identifier.
    pub id: Uuid,
    /// Package title.
    pub title: String,
    /// Country name.
    pub country: String,
    /// Country identifier.
    pub country_id: Uuid,
    /// Duration display string (`"7 nights 8 days"` or `"—"`).
    pub duration_display: String,
    /// Days component.
    pub days: u16,
    /// Nights component.
    pub nights: u16,
    /// Star rating, 1–5, when rated.
    pub rating: Option<u8>,
    /// Review count.
    pub review_count: u32,
    /// Popularity score (`rating × review_count`).
    pub popularity: u64,
    /// Destination names, A–Z.
    pub destinations: Vec<String>,
    /// Base price in dollars; absent when the tour has no price.
    pub price: Option<f64>,
    /// Discount percentage.
    pub discount_percent: Option<f64>,
    /// Departure date, ISO.
    pub departure_date: NaiveDate,
    /// Departure date, `MM/DD/YYYY`.
    pub departure_date_us: String,
    /// Adventure style name.
    pub adventure_style: String,
    /// Start city.
    pub start_city: String,
    /// End city.
    pub end_city: String,
}

impl TourResponse {
    fn build(record: TourWithDestinations, ranking: RankingPolicy) -> Self {
        let tour = record.tour;
        Self {
            id: *tour.id.as_uuid(),
            popularity: ranking.popularity(tour.rating, tour.review_count),
            duration_display: tour.duration_display(),
            departure_date_us: tour.departure_date_us(),
            title: tour.title,
            country: record.country_name,
            country_id: *tour.country_id.as_uuid(),
            days: tour.days,
            nights: tour.nights,
            rating: tour.rating,
            review_count: tour.review_count,
            destinations: record.destinations,
            price: tour.price.map(|p| p.as_dollars_f64()),
            discount_percent: tour.discount_percent,
            departure_date: tour.departure_date,
            adventure_style: record.adventure_style,
            start_city: tour.start_city,
            end_city: tour.end_city,
        }
    }
}

/// Query parameters for the country tour listing.
///
/// `filter=` selects the ordering (`price=low`, `price=high`,
/// `duration=short`, `duration=long`, `reviews=most`, `discount=high`,
/// `popularity=high`); everything else narrows the result set.
/// `adventure_style` takes comma-separated style ids.
#[derive(Debug, Default, Deserialize)]
pub struct TourListQuery {
    /// Ordering selector.
    pub filter: Option<String>,
    /// Minimum price, dollars.
    pub min_price: Option<f64>,
    /// Maximum price, dollars.
    pub max_price: Option<f64>,
    /// Only tours visiting this destination id.
    pub city_id: Option<Uuid>,
    /// Destination-city substring, case-insensitive.
    pub city_name: Option<String>,
    /// Exact departure date (`YYYY-MM-DD`).
    pub departure_date: Option<NaiveDate>,
    /// Departure month, 1–12; invalid values are ignored.
    pub month: Option<u32>,
    /// Comma-separated adventure-style ids; invalid entries are ignored.
    pub adventure_style: Option<String>,
    /// Exact start city.
    pub start_city: Option<String>,
    /// Exact end city.
    pub end_city: Option<String>,
    /// Page number.
    pub page: Option<u32>,
    /// Page size.
    pub page_size: Option<u32>,
}

/// Map the `filter=` parameter onto an ordering; unknown values fall
/// back to the default departure-date ordering.
fn ordering_from_param(filter: Option<&str>) -> TourOrdering {
    match filter {
        Some("price=low") => TourOrdering::PriceLow,
        Some("price=high") => TourOrdering::PriceHigh,
        Some("duration=short") => TourOrdering::DurationShort,
        Some("duration=long") => TourOrdering::DurationLong,
        Some("reviews=most") => TourOrdering::MostReviews,
        Some("discount=high") => TourOrdering::HighestSavings,
        Some("popularity=high") => TourOrdering::MostPopular,
        _ => TourOrdering::DepartureSoonest,
    }
}

fn filters_from_query(query: &TourListQuery) -> TourFilters {
    let adventure_styles = query
        .adventure_style
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|part| Uuid::parse_str(part.trim()).ok())
                .map(AdventureStyleId::from_uuid)
                .collect()
        })
        .unwrap_or_default();

    TourFilters {
        min_price: query.min_price.map(Money::from_dollars_f64),
        max_price: query.max_price.map(Money::from_dollars_f64),
        city_id: query.city_id.map(DestinationId::from_uuid),
        city_name: query.city_name.clone(),
        departure_date: query.departure_date,
        month: query.month.filter(|m| (1..=12).contains(m)),
        adventure_styles,
        start_city: query.start_city.clone(),
        end_city: query.end_city.clone(),
    }
}

/// `GET /api/countries/:id/tours`
pub async fn list_country_tours(
    State(state): State<AppState>,
    Path(country_id): Path<Uuid>,
    Query(query): Query<TourListQuery>,
) -> WebResult<Json<Paginated<TourResponse>>> {
    let page = PageQuery {
        page: query.page,
        page_size: query.page_size,
    }
    .resolve();
    let filters = filters_from_query(&query);
    let ordering = ordering_from_param(query.filter.as_deref());

    let tours = state
        .store
        .tours_by_country(CountryId::from_uuid(country_id), &filters, ordering, page)
        .await?;

    Ok(Json(
        tours.map(|record| TourResponse::build(record, state.ranking)),
    ))
}

/// One distinct destination city.
#[derive(Debug, Serialize)]
pub struct CityResponse {
    /// The city name.
    pub city: String,
}

/// `GET /api/countries/:id/cities`
pub async fn list_country_cities(
    State(state): State<AppState>,
    Path(country_id): Path<Uuid>,
) -> WebResult<Json<Vec<CityResponse>>> {
    let cities = state
        .store
        .country_cities(CountryId::from_uuid(country_id))
        .await?;
    Ok(Json(
        cities.into_iter().map(|city| CityResponse { city }).collect(),
    ))
}

/// `GET /api/tours/:id`
pub async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<Json<TourResponse>> {
    let tour = state.store.tour(TourId::from_uuid(id)).await?;
    Ok(Json(TourResponse::build(tour, state.ranking)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_parses_the_filter_values() {
        assert_eq!(
            ordering_from_param(Some("price=low")),
            TourOrdering::PriceLow
        );
        assert_eq!(
            ordering_from_param(Some("discount=high")),
            TourOrdering::HighestSavings
        );
        assert_eq!(
            ordering_from_param(Some("popularity=high")),
            TourOrdering::MostPopular
        );
    }

    #[test]
    fn unknown_filter_falls_back_to_departure() {
        assert_eq!(
            ordering_from_param(Some("nonsense")),
            TourOrdering::DepartureSoonest
        );
        assert_eq!(ordering_from_param(None), TourOrdering::DepartureSoonest);
    }

    #[test]
    fn adventure_styles_parse_comma_separated_ids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let query = TourListQuery {
            adventure_style: Some(format!("{a}, {b}, not-a-uuid")),
            ..TourListQuery::default()
        };
        let filters = filters_from_query(&query);
        assert_eq!(filters.adventure_styles.len(), 2);
    }

    #[test]
    fn out_of_range_month_is_ignored() {
        let query = TourListQuery {
            month: Some(13),
            ..TourListQuery::default()
        };
        assert_eq!(filters_from_query(&query).month, None);

        let query = TourListQuery {
            month: Some(11),
            ..TourListQuery::default()
        };
        assert_eq!(filters_from_query(&query).month, Some(11));
    }

    #[test]
    fn prices_convert_to_cents() {
        let query = TourListQuery {
            min_price: Some(99.99),
            ..TourListQuery::default()
        };
        assert_eq!(
            filters_from_query(&query).min_price,
            Some(Money::from_cents(9999))
        );
    }
}
