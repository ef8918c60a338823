use axum::{extract::State, Json};
use serde_json::Value;

use crate::analysis::{AnalysisType, ANALYSIS_TYPES};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/analysis-types
pub async fn analysis_types_handler() -> Json<&'static [AnalysisType]> {
    Json(ANALYSIS_TYPES)
}

/// GET /api/v1/upstream/prompt-categories
pub async fn prompt_categories_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.ats.prompt_categories().await?))
}
