//! Trait abstraction for the PDF generation API to enable mocking in tests

use super::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;

/// PDF generation operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocGenApi: Send + Sync {
    /// POST `body` as JSON to `url` and return the PDF bytes of a 2xx response
    async fn generate_pdf(&self, url: &str, body: &Value) -> Result<Vec<u8>, ApiError>;
}
