//! HTTP client for the analysis backend.
//!
//! Sends `POST {base_url}/api/analyze` and maps every failure mode onto
//! [`ClientError`]. A single attempt is made per call; there are no retries.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::error::{ClientError, GENERIC_ANALYSIS_FAILURE};
use crate::model::{AnalysisRequest, AnalysisResult, ErrorBody};

/// Path of the analysis endpoint, relative to the server base URL.
pub const ANALYZE_PATH: &str = "/api/analyze";

/// Anything that can turn a request into a verdict.
///
/// The session controller depends on this rather than on [`AnalysisClient`]
/// so it can be driven without a server.
#[async_trait]
pub trait Analyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError>;
}

/// reqwest-backed [`Analyzer`].
pub struct AnalysisClient {
    http: Client,
    endpoint: String,
    timeout: Duration,
    validate_response: bool,
}

impl AnalysisClient {
    /// Create a new client for the configured server.
    pub fn new(config: &ServerConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(concat!("complexity-analyzer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint_url(&config.base_url),
            timeout: Duration::from_millis(config.timeout_ms),
            validate_response: config.validate_response,
        })
    }

    /// Full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Analyzer for AnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError> {
        debug!(
            endpoint = %self.endpoint,
            language = %request.language(),
            bytes = request.code().len(),
            "sending analysis request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = failure_message(&body);
            warn!(status = status.as_u16(), %message, "analysis rejected by backend");
            return Err(ClientError::Analysis {
                status: status.as_u16(),
                message,
            });
        }

        let result: AnalysisResult = serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "analysis response is not valid JSON");
            ClientError::InvalidResponse(e.to_string())
        })?;

        if self.validate_response {
            result.validate().map_err(|reason| {
                warn!(%reason, "analysis response failed schema validation");
                ClientError::InvalidResponse(reason)
            })?;
        }

        debug!(
            complexity = %result.complexity,
            samples = result.performance_data.len(),
            "analysis response received"
        );
        Ok(result)
    }
}

/// Join the base URL and the analysis path.
fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), ANALYZE_PATH)
}

/// Message for a non-success response: the body's `error` field, else a generic one.
fn failure_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_ANALYSIS_FAILURE.to_string())
}
