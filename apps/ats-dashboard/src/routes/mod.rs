pub mod catalog;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::dashboard::handlers as dashboard;
use crate::session::handlers as session;
use crate::settings::handlers as settings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/upstream/health",
            get(health::upstream_health_handler),
        )
        .route(
            "/api/v1/upstream/prompt-categories",
            get(catalog::prompt_categories_handler),
        )
        .route("/api/v1/analysis-types", get(catalog::analysis_types_handler))
        // Upload page
        .route(
            "/api/v1/sessions",
            post(session::handle_create_session).layer(upload_limit),
        )
        .route(
            "/api/v1/sessions/:id",
            axum::routing::delete(session::handle_delete_session),
        )
        // Dashboard page
        .route(
            "/api/v1/sessions/:id/analysis",
            post(dashboard::handle_run_analysis),
        )
        .route(
            "/api/v1/sessions/:id/dashboard",
            get(dashboard::handle_get_dashboard),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section",
            get(dashboard::handle_get_section),
        )
        // Settings page
        .route(
            "/api/v1/settings/api-key",
            get(settings::handle_get_api_key)
                .put(settings::handle_save_api_key)
                .delete(settings::handle_clear_api_key),
        )
        .route(
            "/api/v1/settings/api-key/validate",
            post(settings::handle_validate_api_key),
        )
        .with_state(state)
}
