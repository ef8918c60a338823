use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::AppError;

/// On-disk shape of the settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
}

/// What the settings page may see about the stored key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiKeyStatus {
    pub has_api_key: bool,
    pub masked_key: Option<String>,
}

/// The user's API key, persisted as JSON and written through on every change.
pub struct SettingsStore {
    path: PathBuf,
    settings: Mutex<StoredSettings>,
}

impl SettingsStore {
    /// Loads `path`. A missing file is an empty store; an unreadable one fails startup.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Malformed settings file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file at {}, starting empty", path.display());
                StoredSettings::default()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        Ok(Self {
            path,
            settings: Mutex::new(settings),
        })
    }

    pub async fn api_key(&self) -> Option<String> {
        self.settings.lock().await.api_key.clone()
    }

    pub async fn status(&self) -> ApiKeyStatus {
        status_of(&*self.settings.lock().await)
    }

    pub async fn save(&self, api_key: &str) -> Result<ApiKeyStatus, AppError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AppError::Validation("Please enter an API key".into()));
        }

        let mut settings = self.settings.lock().await;
        let updated = StoredSettings {
            api_key: Some(api_key.to_string()),
        };
        persist(&self.path, &updated).await?;
        *settings = updated;
        info!("API key saved");

        Ok(status_of(&*settings))
    }

    pub async fn clear(&self) -> Result<ApiKeyStatus, AppError> {
        let mut settings = self.settings.lock().await;
        let updated = StoredSettings::default();
        persist(&self.path, &updated).await?;
        *settings = updated;
        info!("API key cleared");

        Ok(status_of(&*settings))
    }
}

fn status_of(settings: &StoredSettings) -> ApiKeyStatus {
    ApiKeyStatus {
        has_api_key: settings.api_key.is_some(),
        masked_key: settings.api_key.as_deref().map(mask_key),
    }
}

async fn persist(path: &Path, settings: &StoredSettings) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(settings).context("Failed to encode settings")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Keeps the first and last four characters of long keys. Short keys are fully hidden.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
