//! Health check endpoints for load balancers and monitoring.

use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;

/// `GET /health` — basic liveness; checks nothing but the process.
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// `GET /ready` — readiness; verifies the database answers.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match sqlx_ping(&state).await {
        Ok(()) => (StatusCode::OK, "ready"),
        Err(err) => {
            tracing::warn!(error = %err, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
        }
    }
}

async fn sqlx_ping(state: &AppState) -> anyhow::Result<()> {
    sqlx::query("SELECT 1")
        .execute(state.store.pool())
        .await?;
    Ok(())
}
