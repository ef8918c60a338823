use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeFile;

pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
pub const RESUME_FIELD: &str = "resume_file";
/// Session the user is leaving by uploading again.
pub const PREVIOUS_SESSION_FIELD: &str = "previous_session_id";

/// Raw form contents before validation.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub job_description: String,
    pub resume: Option<ResumeFile>,
    pub previous_session: Option<Uuid>,
}

/// Checks the upload form in the order the user sees the messages.
/// Runs before any network call.
pub fn validate_upload(job_description: &str, resume: Option<&ResumeFile>) -> Result<(), AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation("Please enter a job description".into()));
    }

    let Some(resume) = resume else {
        return Err(AppError::Validation("Please upload a resume file".into()));
    };

    if !resume.has_pdf_extension() || (resume.size() > 0 && !resume.has_pdf_header()) {
        return Err(AppError::Validation("Only PDF files are allowed".into()));
    }

    if resume.size() == 0 {
        return Err(AppError::Validation("Please upload a resume file".into()));
    }

    Ok(())
}

/// Collects the known fields from a multipart body. Unknown fields are skipped.
pub async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(JOB_DESCRIPTION_FIELD) => {
                form.job_description = field.text().await.map_err(multipart_error)?;
            }
            Some(RESUME_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                // A file input left empty still posts a nameless, empty part
                if !file_name.is_empty() || !bytes.is_empty() {
                    form.resume = Some(ResumeFile::new(file_name, bytes));
                }
            }
            Some(PREVIOUS_SESSION_FIELD) => {
                let raw = field.text().await.map_err(multipart_error)?;
                form.previous_session = Uuid::parse_str(raw.trim()).ok();
                if form.previous_session.is_none() {
                    debug!("Ignoring unparseable previous session id {raw:?}");
                }
            }
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    Ok(form)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Validation("Resume file is too large".into())
    } else {
        AppError::Validation(format!("Invalid upload: {}", e.body_text()))
    }
}
