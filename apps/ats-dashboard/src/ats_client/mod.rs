/// ATS client: the single point of entry for every call to the remote analysis service.
///
/// No other module talks to the service directly. Handlers reach it through the
/// `AtsService` trait so tests can swap in a stub.
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::models::analysis::{AnalysisResult, ApiKeyValidation};
use crate::models::resume::{ResumeFile, PDF_CONTENT_TYPE};

#[cfg(test)]
pub mod testing;

const ANALYZE_RESUME_ENDPOINT: &str = "/analyze-resume";
const VALIDATE_API_KEY_ENDPOINT: &str = "/validate-api-key";
const PROMPT_CATEGORIES_ENDPOINT: &str = "/prompt-categories";
const HEALTH_ENDPOINT: &str = "/health";

const ANALYZE_FALLBACK_DETAIL: &str = "Failed to analyze resume";
const INVALID_KEY_FALLBACK: &str = "Invalid API key";
const VALIDATION_FAILED_MESSAGE: &str = "Error validating API key";

/// Transport failures, split the way the dashboard reports them.
/// `Display` is the exact message shown to the user.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The service answered with a non-2xx status.
    #[error("{detail}")]
    Server { status: u16, detail: String },

    #[error("No response from server. Please ensure the backend is running.")]
    NoResponse,

    #[error("Error setting up the request")]
    RequestSetup,

    #[error("Invalid response from server: {0}")]
    Decode(String),
}

impl ApiClientError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiClientError::Server { .. } => "UPSTREAM_ERROR",
            ApiClientError::NoResponse => "UPSTREAM_UNREACHABLE",
            ApiClientError::RequestSetup => "REQUEST_SETUP_ERROR",
            ApiClientError::Decode(_) => "UPSTREAM_DECODE_ERROR",
        }
    }

    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ApiClientError::RequestSetup
        } else if err.is_decode() {
            ApiClientError::Decode(err.to_string())
        } else {
            // connect refused, timeout, reset mid-body: the request left but nothing came back
            ApiClientError::NoResponse
        }
    }
}

/// One analysis call's worth of input.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub job_description: String,
    pub resume: ResumeFile,
    pub analysis_type: String,
    pub api_key: Option<String>,
}

/// The remote analysis service as seen by the dashboard.
///
/// Carried in `AppState` as `Arc<dyn AtsService>`.
#[async_trait]
pub trait AtsService: Send + Sync {
    async fn analyze_resume(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, ApiClientError>;

    /// Never fails: transport problems come back as an invalid verdict.
    async fn validate_api_key(&self, api_key: &str) -> ApiKeyValidation;

    async fn prompt_categories(&self) -> Result<Value, ApiClientError>;

    async fn health_check(&self) -> Result<Value, ApiClientError>;
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    detail: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the analysis service. Multipart for analysis, JSON for everything else.
#[derive(Clone)]
pub struct AtsApiClient {
    client: Client,
    base_url: String,
}

impl AtsApiClient {
    /// Builds a client with transport defaults; no retry and no timeout override.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn analysis_form(&self, request: &AnalysisRequest) -> Result<multipart::Form, ApiClientError> {
        let resume_part = multipart::Part::bytes(request.resume.bytes.to_vec())
            .file_name(request.resume.file_name.clone())
            .mime_str(PDF_CONTENT_TYPE)
            .map_err(|_| ApiClientError::RequestSetup)?;

        let mut form = multipart::Form::new()
            .text("job_description", request.job_description.clone())
            .part("resume_file", resume_part)
            .text("analysis_type", request.analysis_type.clone());

        if let Some(key) = request.api_key.as_deref().filter(|k| !k.is_empty()) {
            form = form.text("api_key", key.to_string());
        }

        Ok(form)
    }

    async fn get_json(&self, endpoint: &str) -> Result<Value, ApiClientError> {
        let url = self.url(endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiClientError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiClientError::Server {
                status: status.as_u16(),
                detail: format!("HTTP {status}: {body}"),
            });
        }

        decode_json(response).await
    }
}

#[async_trait]
impl AtsService for AtsApiClient {
    async fn analyze_resume(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, ApiClientError> {
        let url = self.url(ANALYZE_RESUME_ENDPOINT);
        let form = self.analysis_form(request)?;

        info!(
            "Calling analysis service: {} (type={}, resume={} bytes, api_key={})",
            url,
            request.analysis_type,
            request.resume.size(),
            request.api_key.is_some()
        );

        let response = self
            .client
            .post(&url)
            .query(&[("analysis_type", request.analysis_type.as_str())])
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Analysis request failed: {e}");
                ApiClientError::from_transport(e)
            })?;

        let status = response.status();
        debug!("Analysis service responded with {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorDetail>(&body)
                .ok()
                .and_then(|e| e.detail)
                .and_then(|d| d.as_str().map(str::to_string))
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| ANALYZE_FALLBACK_DETAIL.to_string());

            error!("Analysis service error {}: {}", status, detail);
            return Err(ApiClientError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        decode_json(response).await
    }

    async fn validate_api_key(&self, api_key: &str) -> ApiKeyValidation {
        let url = self.url(VALIDATE_API_KEY_ENDPOINT);
        debug!("Validating API key against {}", url);

        let response = match self
            .client
            .post(&url)
            .json(&json!({ "api_key": api_key }))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                error!("API key validation request failed: {e}");
                return invalid(VALIDATION_FAILED_MESSAGE);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorMessage>(&body)
                .ok()
                .and_then(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| INVALID_KEY_FALLBACK.to_string());
            return invalid(&message);
        }

        match response.json::<ApiKeyValidation>().await {
            Ok(verdict) => verdict,
            Err(e) => {
                error!("API key validation returned an unreadable body: {e}");
                invalid(VALIDATION_FAILED_MESSAGE)
            }
        }
    }

    async fn prompt_categories(&self) -> Result<Value, ApiClientError> {
        self.get_json(PROMPT_CATEGORIES_ENDPOINT)
            .await
            .inspect_err(|e| error!("Error fetching prompt categories: {e}"))
    }

    async fn health_check(&self) -> Result<Value, ApiClientError> {
        self.get_json(HEALTH_ENDPOINT)
            .await
            .inspect_err(|e| error!("Health check failed: {e}"))
    }
}

fn invalid(message: &str) -> ApiKeyValidation {
    ApiKeyValidation {
        valid: false,
        message: message.to_string(),
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiClientError> {
    let body = response
        .bytes()
        .await
        .map_err(ApiClientError::from_transport)?;
    serde_json::from_slice(&body).map_err(|e| ApiClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::testing::spawn_upstream;
    use super::*;
    use axum::{
        extract::{Multipart, Query},
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use std::collections::HashMap;

    fn sample_request(api_key: Option<&str>) -> AnalysisRequest {
        AnalysisRequest {
            job_description: "Senior Rust engineer, tokio, axum".to_string(),
            resume: ResumeFile::new("jane.pdf", &b"%PDF-1.4 resume"[..]),
            analysis_type: "comprehensive_analysis".to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    /// Echoes the multipart fields it received back inside `analysis`.
    async fn echo_analyze(
        Query(query): Query<HashMap<String, String>>,
        mut multipart: Multipart,
    ) -> Json<Value> {
        let mut fields = serde_json::Map::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await.unwrap();
            fields.insert(
                name,
                json!({
                    "file_name": file_name,
                    "content_type": content_type,
                    "text": String::from_utf8_lossy(&data),
                }),
            );
        }
        Json(json!({
            "analysis": Value::Object(fields).to_string(),
            "status": "success",
            "analysis_type": query.get("analysis_type"),
            "overall_score": 88
        }))
    }

    #[tokio::test]
    async fn test_analyze_resume_sends_multipart_and_query() {
        let base = spawn_upstream(Router::new().route("/analyze-resume", post(echo_analyze))).await;
        let client = AtsApiClient::new(base).unwrap();

        let result = client
            .analyze_resume(&sample_request(Some("key-123")))
            .await
            .unwrap();

        assert_eq!(result.analysis_type, "comprehensive_analysis");
        assert_eq!(result.overall_score, Some(88.0));

        let fields: Value = serde_json::from_str(&result.analysis).unwrap();
        assert_eq!(fields["job_description"]["text"], "Senior Rust engineer, tokio, axum");
        assert_eq!(fields["analysis_type"]["text"], "comprehensive_analysis");
        assert_eq!(fields["api_key"]["text"], "key-123");
        assert_eq!(fields["resume_file"]["file_name"], "jane.pdf");
        assert_eq!(fields["resume_file"]["content_type"], "application/pdf");
        assert_eq!(fields["resume_file"]["text"], "%PDF-1.4 resume");
    }

    #[tokio::test]
    async fn test_analyze_resume_omits_missing_api_key() {
        let base = spawn_upstream(Router::new().route("/analyze-resume", post(echo_analyze))).await;
        let client = AtsApiClient::new(base).unwrap();

        let result = client.analyze_resume(&sample_request(None)).await.unwrap();
        let fields: Value = serde_json::from_str(&result.analysis).unwrap();
        assert!(fields.get("api_key").is_none());
    }

    #[tokio::test]
    async fn test_server_detail_becomes_message() {
        let router = Router::new().route(
            "/analyze-resume",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "detail": "Only PDF files are allowed" })),
                )
            }),
        );
        let client = AtsApiClient::new(spawn_upstream(router).await).unwrap();

        let err = client.analyze_resume(&sample_request(None)).await.unwrap_err();
        assert!(matches!(err, ApiClientError::Server { status: 400, .. }));
        assert_eq!(err.to_string(), "Only PDF files are allowed");
    }

    #[tokio::test]
    async fn test_server_error_without_detail_uses_fallback() {
        let router = Router::new().route(
            "/analyze-resume",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let client = AtsApiClient::new(spawn_upstream(router).await).unwrap();

        let err = client.analyze_resume(&sample_request(None)).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to analyze resume");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_no_response() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = AtsApiClient::new(format!("http://{addr}")).unwrap();
        let err = client.analyze_resume(&sample_request(None)).await.unwrap_err();
        assert!(matches!(err, ApiClientError::NoResponse));
        assert_eq!(
            err.to_string(),
            "No response from server. Please ensure the backend is running."
        );
    }

    #[tokio::test]
    async fn test_malformed_base_url_is_setup_error() {
        let client = AtsApiClient::new("not a url").unwrap();
        let err = client.analyze_resume(&sample_request(None)).await.unwrap_err();
        assert!(matches!(err, ApiClientError::RequestSetup));
        assert_eq!(err.to_string(), "Error setting up the request");
    }

    #[tokio::test]
    async fn test_validate_api_key_passes_verdict_through() {
        let router = Router::new().route(
            "/validate-api-key",
            post(|Json(body): Json<Value>| async move {
                let valid = body["api_key"] == "good-key";
                let message = if valid { "ok" } else { "nope" };
                Json(json!({ "valid": valid, "message": message }))
            }),
        );
        let client = AtsApiClient::new(spawn_upstream(router).await).unwrap();

        let verdict = client.validate_api_key("good-key").await;
        assert!(verdict.valid);
        assert_eq!(verdict.message, "ok");

        let verdict = client.validate_api_key("bad-key").await;
        assert!(!verdict.valid);
        assert_eq!(verdict.message, "nope");
    }

    #[tokio::test]
    async fn test_validate_api_key_server_error_is_invalid_verdict() {
        let router = Router::new().route(
            "/validate-api-key",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "message": "API key expired" })),
                )
            }),
        );
        let client = AtsApiClient::new(spawn_upstream(router).await).unwrap();

        let verdict = client.validate_api_key("old-key").await;
        assert_eq!(
            verdict,
            ApiKeyValidation {
                valid: false,
                message: "API key expired".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_validate_api_key_missing_endpoint_uses_fallback() {
        let client = AtsApiClient::new(spawn_upstream(Router::new()).await).unwrap();
        let verdict = client.validate_api_key("any").await;
        assert!(!verdict.valid);
        assert_eq!(verdict.message, "Invalid API key");
    }

    #[tokio::test]
    async fn test_validate_api_key_unreachable_never_errors() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = AtsApiClient::new(format!("http://{addr}")).unwrap();
        let verdict = client.validate_api_key("any").await;
        assert!(!verdict.valid);
        assert_eq!(verdict.message, "Error validating API key");
    }

    #[tokio::test]
    async fn test_health_and_categories_return_raw_json() {
        let router = Router::new()
            .route("/health", get(|| async { Json(json!({ "status": "healthy" })) }))
            .route(
                "/prompt-categories",
                get(|| async { Json(json!({ "available_categories": ["tailor"] })) }),
            );
        let client = AtsApiClient::new(spawn_upstream(router).await).unwrap();

        assert_eq!(client.health_check().await.unwrap()["status"], "healthy");
        assert_eq!(
            client.prompt_categories().await.unwrap()["available_categories"][0],
            "tailor"
        );
    }

    #[tokio::test]
    async fn test_health_check_failure_is_rethrown() {
        let client = AtsApiClient::new(spawn_upstream(Router::new()).await).unwrap();
        let err = client.health_check().await.unwrap_err();
        assert!(matches!(err, ApiClientError::Server { status: 404, .. }));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = AtsApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/health"), "http://localhost:8000/health");
    }
}
