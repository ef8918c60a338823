use std::sync::Arc;

use crate::ats_client::AtsService;
use crate::config::Config;
use crate::session::SessionStore;
use crate::settings::SettingsStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Remote analysis service. `AtsApiClient` in production, a stub in tests.
    pub ats: Arc<dyn AtsService>,
    pub sessions: Arc<SessionStore>,
    pub settings: Arc<SettingsStore>,
}
