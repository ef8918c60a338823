use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_ATS_API_URL: &str = "http://localhost:8000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_MAX_SESSIONS: usize = 100;
const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

/// Dashboard configuration loaded from environment variables.
/// Every variable has a default, so only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote analysis service.
    pub ats_api_url: String,
    pub port: u16,
    pub rust_log: String,
    /// JSON file holding the user's stored API key.
    pub settings_path: PathBuf,
    pub max_upload_bytes: usize,
    /// Live sessions kept in memory before the oldest idle one is evicted.
    pub max_sessions: usize,
    /// Idle sessions older than this are dropped on the next upload.
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_vars(optional_env)
    }

    /// Builds the config from any variable source. `get` returns `None` for unset values.
    fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            ats_api_url: get("ATS_API_URL")
                .unwrap_or_else(|| DEFAULT_ATS_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            port: get("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            settings_path: get("SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("ats_settings.json")),
            max_upload_bytes: match get("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            max_sessions: match get("MAX_SESSIONS") {
                Some(raw) => raw
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .context("MAX_SESSIONS must be a positive number")?,
                None => DEFAULT_MAX_SESSIONS,
            },
            session_ttl: match get("SESSION_TTL_SECS") {
                Some(raw) => raw
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .context("SESSION_TTL_SECS must be a number of seconds")?,
                None => Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            },
        })
    }
}

/// Reads a variable, treating an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    pub fn for_tests(settings_path: PathBuf) -> Self {
        Self {
            ats_api_url: DEFAULT_ATS_API_URL.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            settings_path,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_sessions: DEFAULT_MAX_SESSIONS,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        }
    }
}
