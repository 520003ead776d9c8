//! Adventure-style endpoints.

use crate::state::AppState;
use crate::WebResult;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tnt_core::ids::AdventureStyleId;
use tnt_core::AdventureStyle;
use uuid::Uuid;

/// Adventure-style fields exposed by the API.
#[derive(Debug, Serialize)]
pub struct AdventureStyleResponse {
    /// Identifier.
    pub id: Uuid,
    /// Style name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

impl From<AdventureStyle> for AdventureStyleResponse {
    fn from(style: AdventureStyle) -> Self {
        Self {
            id: *style.id.as_uuid(),
            name: style.name,
            description: style.description,
        }
    }
}

/// `GET /api/adventure-styles`
pub async fn list_styles(
    State(state): State<AppState>,
) -> WebResult<Json<Vec<AdventureStyleResponse>>> {
    let styles = state.store.adventure_styles().await?;
    Ok(Json(
        styles.into_iter().map(AdventureStyleResponse::from).collect(),
    ))
}

/// `GET /api/adventure-styles/:id`
pub async fn get_style(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<Json<AdventureStyleResponse>> {
    let style = state
        .store
        .adventure_style(AdventureStyleId::from_uuid(id))
        .await?;
    Ok(Json(AdventureStyleResponse::from(style)))
}
