use axum::{extract::State, Json};
use serde::Deserialize;

use super::{validate_and_store, ApiKeyStatus};
use crate::errors::AppError;
use crate::models::analysis::ApiKeyValidation;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApiKeyBody {
    #[serde(default)]
    pub api_key: String,
}

/// GET /api/v1/settings/api-key
pub async fn handle_get_api_key(State(state): State<AppState>) -> Json<ApiKeyStatus> {
    Json(state.settings.status().await)
}

/// PUT /api/v1/settings/api-key
pub async fn handle_save_api_key(
    State(state): State<AppState>,
    Json(body): Json<ApiKeyBody>,
) -> Result<Json<ApiKeyStatus>, AppError> {
    Ok(Json(state.settings.save(&body.api_key).await?))
}

/// DELETE /api/v1/settings/api-key
pub async fn handle_clear_api_key(
    State(state): State<AppState>,
) -> Result<Json<ApiKeyStatus>, AppError> {
    Ok(Json(state.settings.clear().await?))
}

/// POST /api/v1/settings/api-key/validate
pub async fn handle_validate_api_key(
    State(state): State<AppState>,
    Json(body): Json<ApiKeyBody>,
) -> Result<Json<ApiKeyValidation>, AppError> {
    let verdict = validate_and_store(state.ats.as_ref(), &state.settings, &body.api_key).await?;
    Ok(Json(verdict))
}
