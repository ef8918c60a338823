pub mod handlers;
pub mod store;

use tracing::info;

use crate::ats_client::AtsService;
use crate::errors::AppError;
use crate::models::analysis::ApiKeyValidation;

pub use store::{ApiKeyStatus, SettingsStore};

pub const KEY_VALID_MESSAGE: &str = "API key is valid";

/// Checks `api_key` with the service and stores it only when it is accepted.
///
/// A blank key short-circuits to an invalid verdict without a network call.
pub async fn validate_and_store(
    ats: &dyn AtsService,
    settings: &SettingsStore,
    api_key: &str,
) -> Result<ApiKeyValidation, AppError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Ok(ApiKeyValidation {
            valid: false,
            message: String::new(),
        });
    }

    let verdict = ats.validate_api_key(api_key).await;
    if !verdict.valid {
        info!("API key rejected by analysis service");
        return Ok(verdict);
    }

    settings.save(api_key).await?;
    Ok(ApiKeyValidation {
        valid: true,
        message: KEY_VALID_MESSAGE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats_client::testing::StubAtsService;
    use crate::models::analysis::AnalysisResult;
    use std::sync::atomic::Ordering;

    async fn fixtures() -> (tempfile::TempDir, StubAtsService, SettingsStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("s.json")).await.unwrap();
        (dir, StubAtsService::succeeding(AnalysisResult::default()), store)
    }

    #[tokio::test]
    async fn test_blank_key_makes_no_call() {
        let (_dir, ats, store) = fixtures().await;
        let verdict = validate_and_store(&ats, &store, "  ").await.unwrap();
        assert_eq!(
            verdict,
            ApiKeyValidation {
                valid: false,
                message: String::new()
            }
        );
        assert_eq!(ats.validate_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_key_is_saved() {
        let (_dir, ats, store) = fixtures().await;
        let verdict = validate_and_store(&ats, &store, " valid-key ").await.unwrap();
        assert!(verdict.valid);
        assert_eq!(verdict.message, KEY_VALID_MESSAGE);
        assert_eq!(store.api_key().await.as_deref(), Some("valid-key"));
    }

    #[tokio::test]
    async fn test_invalid_key_keeps_upstream_message_and_is_not_saved() {
        let (_dir, ats, store) = fixtures().await;
        let verdict = validate_and_store(&ats, &store, "nope").await.unwrap();
        assert!(!verdict.valid);
        assert_eq!(verdict.message, "API key not valid. Please pass a valid API key.");
        assert!(store.api_key().await.is_none());
    }
}
