//! Client side of the PDF generation API

mod client;
mod error;
mod pipeline;
mod traits;

pub use client::HttpDocGenClient;
pub use error::SubmissionError;
pub use pipeline::run_submission;
pub use traits::DocGenApi;

#[cfg(test)]
pub use error::{ApiError, SUBMIT_ERROR_MESSAGE, SUBMIT_FAILED_MESSAGE};
#[cfg(test)]
pub use traits::MockDocGenApi;
