//! Booking ("visiting") endpoints.
//!
//! Creation is the trigger of the confirmation pipeline: once the store
//! transaction has committed, the job is enqueued and the response
//! returns immediately. Pipeline failures are never surfaced here.

use crate::api::travellers::TravellerRequest;
use crate::error::AppError;
use crate::pagination::PageQuery;
use crate::state::AppState;
use crate::WebResult;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tnt_core::ids::{TourId, TravellerId, VisitingId};
use tnt_pipeline::schedule;
use tnt_store::{NewVisiting, Paginated, TravellerRef, VisitingRecord};
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Request / response types
// ============================================================================

/// Create payload for a booking: the tour id plus either an existing
/// traveller id or a nested traveller to create in the same transaction.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVisitingRequest {
    /// Country the request originates from.
    #[validate(length(min = 1, max = 255))]
    pub request_country: String,
    /// Nested traveller to create, mutually exclusive with
    /// `traveller_id`.
    #[validate(nested)]
    pub traveller: Option<TravellerRequest>,
    /// Existing traveller id.
    pub traveller_id: Option<Uuid>,
    /// The tour being booked.
    pub tour: Uuid,
    /// Special requests.
    #[serde(default)]
    pub notes: String,
}

/// Update payload: notes are the only mutable field.
#[derive(Debug, Deserialize)]
pub struct UpdateVisitingRequest {
    /// Replacement notes.
    pub notes: String,
}

/// Booking fields exposed by the API.
#[derive(Debug, Serialize)]
pub struct VisitingResponse {
    /// Identifier.
    pub id: Uuid,
    /// Origin country of the request.
    pub request_country: String,
    /// The lead traveller.
    pub traveller_id: Uuid,
    /// The booked tour.
    pub tour: Uuid,
    /// Tour title, for convenience.
    pub tour_title: String,
    /// Creation timestamp.
    pub booked_on: DateTime<Utc>,
    /// Creation timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub booked_on_formatted: String,
    /// Notes.
    pub notes: String,
}

impl From<VisitingRecord> for VisitingResponse {
    fn from(record: VisitingRecord) -> Self {
        let visiting = record.visiting;
        Self {
            id: *visiting.id.as_uuid(),
            request_country: visiting.request_country,
            traveller_id: *visiting.traveller_id.as_uuid(),
            tour: *visiting.tour_id.as_uuid(),
            tour_title: record.tour_title,
            booked_on_formatted: visiting.booked_on.format("%Y-%m-%d %H:%M:%S").to_string(),
            booked_on: visiting.booked_on,
            notes: visiting.notes,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /api/visiting`
pub async fn list_visitings(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> WebResult<Json<Paginated<VisitingResponse>>> {
    let visitings = state.store.visitings(page.resolve()).await?;
    Ok(Json(visitings.map(VisitingResponse::from)))
}

/// `POST /api/visiting`
///
/// Returns 201 as soon as the booking row is committed; the confirmation
/// email is queued for the background worker on the way out.
pub async fn create_visiting(
    State(state): State<AppState>,
    Json(request): Json<CreateVisitingRequest>,
) -> WebResult<(StatusCode, Json<VisitingResponse>)> {
    request.validate()?;

    let traveller = match (request.traveller, request.traveller_id) {
        (Some(nested), None) => TravellerRef::New(nested.into_new()),
        (None, Some(id)) => TravellerRef::Existing(TravellerId::from_uuid(id)),
        (Some(_), Some(_)) => {
            return Err(AppError::bad_request(
                "provide either a nested traveller or traveller_id, not both",
            ))
        }
        (None, None) => {
            return Err(AppError::bad_request(
                "a nested traveller or traveller_id is required",
            ))
        }
    };

    let visiting = state
        .store
        .create_visiting(NewVisiting {
            request_country: request.request_country,
            traveller,
            tour_id: TourId::from_uuid(request.tour),
            notes: request.notes,
        })
        .await?;

    // The transaction above has committed; this is the post-commit hook.
    schedule::booking_confirmation(&state.jobs, visiting.id);

    let record = state.store.visiting(visiting.id).await?;
    Ok((StatusCode::CREATED, Json(VisitingResponse::from(record))))
}

/// `GET /api/visits/:id`
pub async fn get_visiting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<Json<VisitingResponse>> {
    let record = state.store.visiting(VisitingId::from_uuid(id)).await?;
    Ok(Json(VisitingResponse::from(record)))
}

/// `PUT /api/visits/:id` — updates notes only; never re-triggers the
/// confirmation email.
pub async fn update_visiting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVisitingRequest>,
) -> WebResult<Json<VisitingResponse>> {
    let record = state
        .store
        .update_visiting_notes(VisitingId::from_uuid(id), &request.notes)
        .await?;
    Ok(Json(VisitingResponse::from(record)))
}

/// `DELETE /api/visits/:id`
pub async fn delete_visiting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<StatusCode> {
    state
        .store
        .delete_visiting(VisitingId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
