//! Failures of the PDF generation exchange

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Shown for a non-2xx response
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit the form. Please try again.";
/// Shown for every other submission failure
pub const SUBMIT_ERROR_MESSAGE: &str =
    "An error occurred while submitting the form. Please try again.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to store generated PDF: {0}")]
    Storage(#[from] io::Error),
}

impl SubmissionError {
    /// The generic message the user sees; the cause is only logged
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmissionError::Api(ApiError::Status(_)) => SUBMIT_FAILED_MESSAGE,
            _ => SUBMIT_ERROR_MESSAGE,
        }
    }
}
