//! Per-user session context: the job description and resume carried from the upload page to
//! the dashboard, plus the most recent analysis outcome.

pub mod handlers;
pub mod store;
pub mod upload;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::analysis::AnalysisResult;
use crate::models::resume::ResumeFile;

pub use store::SessionStore;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub job_description: String,
    pub resume: ResumeFile,
    pub created_at: DateTime<Utc>,
    /// True while an analysis run is in flight.
    pub loading: bool,
    pub last_result: Option<AnalysisResult>,
    pub last_error: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Idle,
    Loading,
    Complete,
    Error,
}

impl Session {
    pub fn new(job_description: String, resume: ResumeFile) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_description,
            resume,
            created_at: Utc::now(),
            loading: false,
            last_result: None,
            last_error: None,
            completed_at: None,
        }
    }

    /// Latest of creation and the last completed run.
    pub fn last_active(&self) -> DateTime<Utc> {
        self.completed_at.unwrap_or(self.created_at)
    }

    pub fn status(&self) -> AnalysisStatus {
        if self.loading {
            AnalysisStatus::Loading
        } else if self.last_error.is_some() {
            AnalysisStatus::Error
        } else if self.last_result.is_some() {
            AnalysisStatus::Complete
        } else {
            AnalysisStatus::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(
            "Rust engineer".to_string(),
            ResumeFile::new("cv.pdf", b"%PDF-1.7".to_vec()),
        )
    }

    #[test]
    fn test_new_session_is_idle() {
        assert_eq!(session().status(), AnalysisStatus::Idle);
    }

    #[test]
    fn test_loading_takes_precedence() {
        let mut s = session();
        s.last_error = Some("boom".to_string());
        s.loading = true;
        assert_eq!(s.status(), AnalysisStatus::Loading);
    }

    #[test]
    fn test_error_shown_over_stale_result() {
        let mut s = session();
        s.last_result = Some(AnalysisResult::default());
        s.last_error = Some("Failed to analyze resume".to_string());
        assert_eq!(s.status(), AnalysisStatus::Error);
    }
}
