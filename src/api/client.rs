//! HTTP client for the PDF generation API
//!
//! ureq is synchronous, so each request runs on tokio's blocking pool.

use super::error::ApiError;
use super::traits::DocGenApi;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Largest PDF body accepted from the API
const MAX_PDF_BYTES: u64 = 50 * 1024 * 1024;

/// Client for the PDF generation endpoints
#[derive(Debug, Clone)]
pub struct HttpDocGenClient {
    agent: ureq::Agent,
}

impl HttpDocGenClient {
    /// Create a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

#[async_trait]
impl DocGenApi for HttpDocGenClient {
    async fn generate_pdf(&self, url: &str, body: &Value) -> Result<Vec<u8>, ApiError> {
        let agent = self.agent.clone();
        let url = url.to_string();
        let body = body.clone();

        tokio::task::spawn_blocking(move || post_json(&agent, &url, &body))
            .await
            .map_err(|e| ApiError::Internal(format!("task join error: {}", e)))?
    }
}

fn post_json(agent: &ureq::Agent, url: &str, body: &Value) -> Result<Vec<u8>, ApiError> {
    tracing::debug!("POST {}", url);

    let response = agent
        .post(url)
        .header("Content-Type", "application/json")
        .send_json(body)
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }

    let mut body = response.into_body();
    body.with_config()
        .limit(MAX_PDF_BYTES)
        .read_to_vec()
        .map_err(|e| ApiError::Transport(format!("error reading response body: {}", e)))
}
