//! Form engine
//!
//! One parameterized multi-step form used by every document type:
//! - `field_path` / `field_map`: the field store
//! - `step`: step index and progress
//! - `validation`: the blank-field gate
//! - `session`: the per-document state machine tying them together

mod field_map;
mod field_path;
mod session;
mod step;
mod validation;

pub use field_map::FieldMap;
pub use field_path::{FieldPath, FieldPathError};
pub use session::{
    FormError, FormSession, SessionPhase, SubmissionOutcome, SubmissionRequest, SubmissionTicket,
};

#[cfg(test)]
pub use validation::VALIDATION_MESSAGE;
