use anyhow::anyhow;
use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use super::{section_for, DashboardOverview, SectionView};
use crate::analysis::AnalysisType;
use crate::ats_client::{AnalysisRequest, ApiClientError};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RunAnalysisBody {
    #[serde(default)]
    pub analysis_type: Option<String>,
}

impl RunAnalysisBody {
    /// An empty body selects the defaults. Anything else must be a valid JSON object,
    /// whatever the request's content type says.
    fn parse(raw: &[u8]) -> Result<Self, AppError> {
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(raw)
            .map_err(|e| AppError::Validation(format!("Invalid analysis request: {e}")))
    }
}

/// POST /api/v1/sessions/:id/analysis
///
/// The upstream call runs on its own task so a dropped client connection cannot leave the
/// session stuck in `loading`.
pub async fn handle_run_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<DashboardOverview>, AppError> {
    let body = RunAnalysisBody::parse(&body)?;
    let analysis_type = AnalysisType::parse(body.analysis_type.as_deref())?;

    let input = state.sessions.begin_analysis(id).await?;
    let request = AnalysisRequest {
        job_description: input.job_description,
        resume: input.resume,
        analysis_type: analysis_type.value.to_string(),
        api_key: state.settings.api_key().await,
    };

    let run = tokio::spawn(run_analysis(state.clone(), id, request));
    run.await
        .map_err(|e| AppError::Internal(anyhow!("Analysis task failed: {e}")))??;

    let session = state.sessions.get(id).await?;
    Ok(Json(DashboardOverview::from_session(&session)))
}

async fn run_analysis(
    state: AppState,
    id: Uuid,
    request: AnalysisRequest,
) -> Result<(), ApiClientError> {
    info!(
        session_id = %id,
        analysis_type = %request.analysis_type,
        "Running analysis"
    );

    match state.ats.analyze_resume(&request).await {
        Ok(result) => {
            info!(session_id = %id, "Analysis complete");
            state.sessions.finish_analysis(id, Ok(result)).await;
            Ok(())
        }
        Err(e) => {
            error!(session_id = %id, "Analysis failed: {e}");
            state.sessions.finish_analysis(id, Err(e.to_string())).await;
            Err(e)
        }
    }
}

/// GET /api/v1/sessions/:id/dashboard
pub async fn handle_get_dashboard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardOverview>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(DashboardOverview::from_session(&session)))
}

/// GET /api/v1/sessions/:id/sections/:section
pub async fn handle_get_section(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, String)>,
) -> Result<Json<SectionView>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(section_for(&session, &section)))
}
