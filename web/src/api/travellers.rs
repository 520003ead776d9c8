//! Traveller CRUD endpoints, with the nested optional count.

use crate::pagination::PageQuery;
use crate::state::AppState;
use crate::WebResult;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tnt_core::ids::TravellerId;
use tnt_core::traveller::PHONE_PATTERN;
use tnt_core::TravellerCount;
use tnt_store::{NewTraveller, Paginated, TravellerWithCount};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ============================================================================
// Request types
// ============================================================================

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_PATTERN.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

fn validate_stay_dates(request: &TravellerRequest) -> Result<(), ValidationError> {
    if request.check_out_date < request.check_in_date {
        Err(ValidationError::new("check_out_before_check_in"))
    } else {
        Ok(())
    }
}

const fn default_adults() -> u16 {
    1
}

/// Nested traveller-count payload.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct TravellerCountRequest {
    /// Number of adults; defaults to 1.
    #[serde(default = "default_adults")]
    pub adults: u16,
    /// Number of children.
    #[serde(default)]
    pub children: u16,
    /// Number of infants.
    #[serde(default)]
    pub infants: u16,
}

impl From<TravellerCountRequest> for TravellerCount {
    fn from(request: TravellerCountRequest) -> Self {
        Self {
            adults: request.adults,
            children: request.children,
            infants: request.infants,
        }
    }
}

/// Create/update payload for a traveller.
#[derive(Clone, Debug, Deserialize, Validate)]
#[validate(schema(function = validate_stay_dates))]
pub struct TravellerRequest {
    /// Full name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Phone, `+999999999` form, 9–15 digits.
    #[validate(custom(function = validate_phone))]
    pub phone: String,
    /// Contact email.
    #[validate(email)]
    pub email: String,
    /// Country of citizenship.
    #[validate(length(min = 1, max = 100))]
    pub nationality: String,
    /// Check-in date.
    pub check_in_date: NaiveDate,
    /// Check-out date; must not precede check-in.
    pub check_out_date: NaiveDate,
    /// Hotel star rating, 1–5.
    #[validate(range(min = 1, max = 5))]
    pub hotel_rating: u8,
    /// Direct-flight preference.
    #[serde(default)]
    pub is_direct_flight: bool,
    /// Optional party breakdown.
    #[validate(nested)]
    pub count: Option<TravellerCountRequest>,
}

impl TravellerRequest {
    pub(crate) fn into_new(self) -> NewTraveller {
        NewTraveller {
            name: self.name,
            phone: self.phone,
            email: self.email,
            nationality: self.nationality,
            check_in_date: self.check_in_date,
            check_out_date: self.check_out_date,
            hotel_rating: self.hotel_rating,
            is_direct_flight: self.is_direct_flight,
            count: self.count.map(TravellerCount::from),
        }
    }
}

// ============================================================================
// Response types
// ============================================================================

/// Nested traveller-count response.
#[derive(Debug, Serialize)]
pub struct TravellerCountResponse {
    /// Number of adults.
    pub adults: u16,
    /// Number of children.
    pub children: u16,
    /// Number of infants.
    pub infants: u16,
}

/// Traveller fields exposed by the API.
#[derive(Debug, Serialize)]
pub struct TravellerResponse {
    /// Identifier.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Phone.
    pub phone: String,
    /// Email.
    pub email: String,
    /// Nationality.
    pub nationality: String,
    /// Check-in date.
    pub check_in_date: NaiveDate,
    /// Check-out date.
    pub check_out_date: NaiveDate,
    /// Hotel star rating.
    pub hotel_rating: u8,
    /// Direct-flight preference.
    pub is_direct_flight: bool,
    /// Party breakdown, when recorded.
    pub count: Option<TravellerCountResponse>,
    /// Computed nights between the stay dates.
    pub nights: i64,
}

impl From<TravellerWithCount> for TravellerResponse {
    fn from(record: TravellerWithCount) -> Self {
        let traveller = record.traveller;
        Self {
            id: *traveller.id.as_uuid(),
            nights: traveller.nights(),
            name: traveller.name,
            phone: traveller.phone,
            email: traveller.email,
            nationality: traveller.nationality,
            check_in_date: traveller.check_in_date,
            check_out_date: traveller.check_out_date,
            hotel_rating: traveller.hotel_rating,
            is_direct_flight: traveller.is_direct_flight,
            count: record.count.map(|count| TravellerCountResponse {
                adults: count.adults,
                children: count.children,
                infants: count.infants,
            }),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /api/travellers`
pub async fn list_travellers(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> WebResult<Json<Paginated<TravellerResponse>>> {
    let travellers = state.store.travellers(page.resolve()).await?;
    Ok(Json(travellers.map(TravellerResponse::from)))
}

/// `POST /api/travellers`
pub async fn create_traveller(
    State(state): State<AppState>,
    Json(request): Json<TravellerRequest>,
) -> WebResult<(StatusCode, Json<TravellerResponse>)> {
    request.validate()?;
    let created = state.store.create_traveller(request.into_new()).await?;
    Ok((StatusCode::CREATED, Json(TravellerResponse::from(created))))
}

/// `GET /api/travellers/:id`
pub async fn get_traveller(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<Json<TravellerResponse>> {
    let traveller = state.store.traveller(TravellerId::from_uuid(id)).await?;
    Ok(Json(TravellerResponse::from(traveller)))
}

/// `PUT /api/travellers/:id`
pub async fn update_traveller(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TravellerRequest>,
) -> WebResult<Json<TravellerResponse>> {
    request.validate()?;
    let updated = state
        .store
        .update_traveller(TravellerId::from_uuid(id), request.into_new())
        .await?;
    Ok(Json(TravellerResponse::from(updated)))
}

/// `DELETE /api/travellers/:id` — their bookings cascade.
pub async fn delete_traveller(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<StatusCode> {
    state
        .store
        .delete_traveller(TravellerId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request() -> TravellerRequest {
        TravellerRequest {
            name: "Asha Rao".to_string(),
            phone: "+12025550123".to_string(),
            email: "asha@example.com".to_string(),
            nationality: "India".to_string(),
            check_in_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2025, 6, 17).unwrap(),
            hotel_rating: 4,
            is_direct_flight: false,
            count: None,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn bad_phone_is_rejected() {
        let mut bad = request();
        bad.phone = "call me maybe".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn bad_email_is_rejected() {
        let mut bad = request();
        bad.email = "not-an-email".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn rating_out_of_range_is_rejected() {
        let mut bad = request();
        bad.hotel_rating = 6;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn check_out_before_check_in_is_rejected() {
        let mut bad = request();
        bad.check_out_date = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn count_defaults_to_one_adult() {
        let json = r#"{"adults": 1, "children": 0, "infants": 0}"#;
        let count: TravellerCountRequest = serde_json::from_str(json).unwrap();
        assert_eq!(count.adults, 1);

        let empty: TravellerCountRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(TravellerCount::from(empty), TravellerCount::default());
    }
}
