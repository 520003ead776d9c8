//! Contact-form endpoint.

use crate::state::AppState;
use crate::WebResult;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tnt_core::ContactMessage;
use tnt_pipeline::schedule;
use tnt_store::NewContactMessage;
use uuid::Uuid;
use validator::Validate;

/// Contact-form payload.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    /// Sender's full name.
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    /// Sender's email.
    #[validate(email)]
    pub email: String,
    /// Subject line.
    #[validate(length(min = 1, max = 255))]
    pub subject: String,
    /// Message body.
    #[validate(length(min = 1))]
    pub message: String,
}

/// Stored contact message, echoed back to the caller.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    /// Identifier.
    pub id: Uuid,
    /// Sender's full name.
    pub full_name: String,
    /// Sender's email.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Receipt timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessage> for ContactResponse {
    fn from(message: ContactMessage) -> Self {
        Self {
            id: *message.id.as_uuid(),
            full_name: message.full_name,
            email: message.email,
            subject: message.subject,
            message: message.message,
            created_at: message.created_at,
        }
    }
}

/// `POST /api/contact`
///
/// Persists the message and queues the thank-you email after commit,
/// exactly like booking creation does for confirmations.
pub async fn create_contact_message(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> WebResult<(StatusCode, Json<ContactResponse>)> {
    request.validate()?;

    let message = state
        .store
        .create_contact_message(NewContactMessage {
            full_name: request.full_name,
            email: request.email,
            subject: request.subject,
            message: request.message,
        })
        .await?;

    schedule::contact_thank_you(&state.jobs, message.id);

    Ok((StatusCode::CREATED, Json(ContactResponse::from(message))))
}
