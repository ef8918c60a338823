use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::Session;
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::models::resume::ResumeFile;

/// What an analysis run needs from the session, copied out so no lock is held upstream.
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub job_description: String,
    pub resume: ResumeFile,
}

/// In-memory sessions keyed by id. Nothing survives a restart.
///
/// Bounded two ways, both enforced on `create`: idle sessions older than `ttl` are swept, and
/// once `max_sessions` are live the least recently active idle one is evicted. A session with
/// an analysis in flight is never evicted.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    max_sessions: usize,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(max_sessions: usize, ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions: max_sessions.max(1),
            ttl,
        }
    }

    /// Stores a new session. `replaces` is the session the same user is leaving behind
    /// ("Back to Upload" followed by a new upload); it is dropped first.
    pub async fn create(
        &self,
        job_description: String,
        resume: ResumeFile,
        replaces: Option<Uuid>,
    ) -> Session {
        let session = Session::new(job_description, resume);
        let mut sessions = self.sessions.write().await;

        if let Some(previous) = replaces {
            if sessions.remove(&previous).is_some() {
                info!(session_id = %previous, "Session replaced by new upload");
            }
        }
        self.evict(&mut *sessions, Utc::now());

        info!(
            session_id = %session.id,
            resume = %session.resume.file_name,
            bytes = session.resume.size(),
            live = sessions.len() + 1,
            "Session created"
        );
        sessions.insert(session.id, session.clone());
        session
    }

    /// Drops expired idle sessions, then makes room for one more under the cap.
    fn evict(&self, sessions: &mut HashMap<Uuid, Session>, now: DateTime<Utc>) {
        let before = sessions.len();
        sessions.retain(|_, s| s.loading || !is_expired(s, now, self.ttl));
        if sessions.len() < before {
            debug!(expired = before - sessions.len(), "Expired sessions swept");
        }

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .values()
                .filter(|s| !s.loading)
                .min_by_key(|s| s.last_active())
                .map(|s| s.id);

            let Some(id) = oldest else {
                warn!(live = sessions.len(), "Session cap reached with every session busy");
                break;
            };
            sessions.remove(&id);
            info!(session_id = %id, "Session evicted to stay under the cap");
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Session, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| info!(session_id = %id, "Session removed"))
            .ok_or_else(|| not_found(id))
    }

    /// Marks the session as loading. Fails with `Conflict` if a run is already in flight.
    pub async fn begin_analysis(&self, id: Uuid) -> Result<AnalysisInput, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;

        if session.loading {
            return Err(AppError::Conflict("An analysis is already running".into()));
        }
        session.loading = true;

        Ok(AnalysisInput {
            job_description: session.job_description.clone(),
            resume: session.resume.clone(),
        })
    }

    /// Records a run's outcome. A failure keeps the previous result on screen.
    pub async fn finish_analysis(&self, id: Uuid, outcome: Result<AnalysisResult, String>) {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(&id) else {
            warn!(session_id = %id, "Session removed while analysis was running");
            return;
        };

        session.loading = false;
        match outcome {
            Ok(result) => {
                session.last_result = Some(result);
                session.last_error = None;
                session.completed_at = Some(Utc::now());
            }
            Err(message) => session.last_error = Some(message),
        }
    }
}

fn is_expired(session: &Session, now: DateTime<Utc>, ttl: Duration) -> bool {
    // a clock step backwards gives a negative age, which is never expired
    (now - session.last_active())
        .to_std()
        .map_or(false, |age| age > ttl)
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id}"))
}
