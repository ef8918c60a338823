use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use super::upload::{read_upload_form, validate_upload};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub resume_file_name: String,
    pub resume_size: usize,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SessionCreated>), AppError> {
    let form = read_upload_form(multipart).await?;
    validate_upload(&form.job_description, form.resume.as_ref())?;

    let Some(resume) = form.resume else {
        return Err(AppError::Validation("Please upload a resume file".into()));
    };
    let session = state
        .sessions
        .create(form.job_description, resume, form.previous_session)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id: session.id,
            resume_file_name: session.resume.file_name.clone(),
            resume_size: session.resume.size(),
        }),
    ))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
