//! Dashboard view models: everything the overview and section pages render for a session.

pub mod charts;
pub mod handlers;
pub mod sections;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::NormalizedScores;
use crate::session::{AnalysisStatus, Session};

pub use charts::ChartSet;
pub use sections::{NavEntry, SectionView, NAVIGATION};

/// Where the "back" control in the sidebar leads.
pub const BACK_TO_UPLOAD: NavEntry = NavEntry {
    id: "upload",
    label: "Back to Upload",
};

#[derive(Debug, Clone, Serialize)]
pub struct Navigation {
    pub items: &'static [NavEntry],
    pub back: NavEntry,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub session_id: Uuid,
    pub status: AnalysisStatus,
    pub error: Option<String>,
    pub resume_file_name: String,
    /// Analysis type reported by the service for the last successful run.
    pub analysis_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub navigation: Navigation,
    pub scores: NormalizedScores,
    pub charts: ChartSet,
}

impl DashboardOverview {
    pub fn from_session(session: &Session) -> Self {
        let result = session.last_result.as_ref();
        let scores = NormalizedScores::from_result(result);
        let charts = ChartSet::from_scores(&scores);

        Self {
            session_id: session.id,
            status: session.status(),
            error: session.last_error.clone(),
            resume_file_name: session.resume.file_name.clone(),
            analysis_type: result
                .map(|r| r.analysis_type.clone())
                .filter(|t| !t.is_empty()),
            created_at: session.created_at,
            completed_at: session.completed_at,
            navigation: Navigation {
                items: NAVIGATION,
                back: BACK_TO_UPLOAD,
            },
            scores,
            charts,
        }
    }
}

/// Section page for `key`, or its empty state before the first result.
pub fn section_for(session: &Session, key: &str) -> SectionView {
    match &session.last_result {
        Some(result) => sections::render_section(key, result),
        None => sections::render_empty_section(key),
    }
}
