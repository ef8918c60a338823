//! Test doubles for the analysis service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use serde_json::{json, Value};
use tokio::sync::Notify;

use super::{AnalysisRequest, ApiClientError, AtsService};
use crate::models::analysis::{AnalysisResult, ApiKeyValidation};

/// Serves `router` on an ephemeral localhost port and returns its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[derive(Clone)]
pub enum StubOutcome {
    Success(AnalysisResult),
    ServerError(u16, String),
    NoResponse,
}

/// In-process `AtsService` with a canned analysis outcome.
pub struct StubAtsService {
    outcome: Mutex<StubOutcome>,
    valid_keys: Vec<String>,
    /// When set, `analyze_resume` parks until the gate is notified.
    gate: Option<Arc<Notify>>,
    pub analyze_calls: AtomicUsize,
    pub validate_calls: AtomicUsize,
    pub last_request: Mutex<Option<AnalysisRequest>>,
}

impl StubAtsService {
    pub fn new(outcome: StubOutcome) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            valid_keys: vec!["valid-key".to_string()],
            gate: None,
            analyze_calls: AtomicUsize::new(0),
            validate_calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn succeeding(result: AnalysisResult) -> Self {
        Self::new(StubOutcome::Success(result))
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn set_outcome(&self, outcome: StubOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn analyze_count(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AtsService for StubAtsService {
    async fn analyze_resume(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, ApiClientError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let outcome = self.outcome.lock().unwrap().clone();
        match outcome {
            StubOutcome::Success(result) => Ok(result),
            StubOutcome::ServerError(status, detail) => Err(ApiClientError::Server { status, detail }),
            StubOutcome::NoResponse => Err(ApiClientError::NoResponse),
        }
    }

    async fn validate_api_key(&self, api_key: &str) -> ApiKeyValidation {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        if self.valid_keys.iter().any(|k| k == api_key) {
            ApiKeyValidation {
                valid: true,
                message: "API key is valid".to_string(),
            }
        } else {
            ApiKeyValidation {
                valid: false,
                message: "API key not valid. Please pass a valid API key.".to_string(),
            }
        }
    }

    async fn prompt_categories(&self) -> Result<Value, ApiClientError> {
        Ok(json!({ "available_categories": ["comprehensive_analysis", "tailor"] }))
    }

    async fn health_check(&self) -> Result<Value, ApiClientError> {
        Err(ApiClientError::NoResponse)
    }
}
