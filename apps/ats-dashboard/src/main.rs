mod analysis;
mod ats_client;
mod config;
mod dashboard;
mod errors;
mod models;
mod routes;
mod session;
mod settings;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ats_client::AtsApiClient;
use crate::config::Config;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::settings::SettingsStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("ats_dashboard={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS Dashboard v{}", env!("CARGO_PKG_VERSION"));

    let ats = AtsApiClient::new(config.ats_api_url.clone())?;
    info!("Analysis service client initialized ({})", ats.base_url());

    let settings = SettingsStore::load(config.settings_path.clone()).await?;
    info!(
        "Settings loaded from {} (api key stored: {})",
        config.settings_path.display(),
        settings.status().await.has_api_key
    );

    let state = AppState {
        config: config.clone(),
        ats: Arc::new(ats),
        sessions: Arc::new(SessionStore::new(config.max_sessions, config.session_ttl)),
        settings: Arc::new(settings),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
