use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "ats-dashboard"
    }))
}

/// GET /api/v1/upstream/health
/// Passes through the analysis service's own health document.
pub async fn upstream_health_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.ats.health_check().await?))
}
