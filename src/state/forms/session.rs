//! Multi-step form session shared by every document type
//!
//! A session is built from a [`DocumentSchema`] and an endpoint URL. It owns
//! the field values, the step index, the error message, and the submission
//! phase:
//!
//! ```text
//! Editing(step) --prepare_submission ok--> Submitting(ticket)
//! Submitting --complete(Ok)--> Submitted(pdf) --dismiss_preview--> Editing(last)
//! Submitting --complete(Err) | cancel--> Editing(last, error)
//! ```

use super::field_map::FieldMap;
use super::field_path::{FieldPath, FieldPathError};
use super::step::StepController;
use super::validation::{validate_all_filled, VALIDATION_MESSAGE};
use crate::api::SubmissionError;
use crate::document::{DocumentKind, DocumentSchema, FieldSpec, StepSpec};
use crate::state::PdfHandle;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    InvalidPath(#[from] FieldPathError),
    #[error("{kind} has no field '{path}'")]
    UnknownField { kind: DocumentKind, path: String },
    #[error("a submission is in progress")]
    SubmissionInProgress,
}

/// Identifies one submission attempt so late results can be discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

impl SubmissionTicket {
    pub fn first() -> Self {
        Self(1)
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SubmissionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything the submission pipeline needs for one request
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub ticket: SubmissionTicket,
    pub kind: DocumentKind,
    pub url: String,
    pub body: Value,
}

pub type SubmissionOutcome = Result<PdfHandle, SubmissionError>;

#[derive(Debug)]
pub enum SessionPhase {
    Editing,
    Submitting(SubmissionTicket),
    Submitted(PdfHandle),
}

/// State of one document form
#[derive(Debug)]
pub struct FormSession {
    schema: DocumentSchema,
    endpoint: String,
    initial: FieldMap,
    fields: FieldMap,
    steps: StepController,
    error: Option<String>,
    success: bool,
    phase: SessionPhase,
    next_ticket: SubmissionTicket,
}

impl FormSession {
    pub fn new(schema: DocumentSchema, endpoint: impl Into<String>) -> Self {
        let initial = schema.initial_field_map();
        let steps = StepController::new(schema.steps().len());
        Self {
            schema,
            endpoint: endpoint.into(),
            fields: initial.clone(),
            initial,
            steps,
            error: None,
            success: false,
            phase: SessionPhase::Editing,
            next_ticket: SubmissionTicket::first(),
        }
    }

    #[cfg(test)]
    pub fn schema(&self) -> &DocumentSchema {
        &self.schema
    }

    pub fn kind(&self) -> DocumentKind {
        self.schema.kind()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[cfg(test)]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Value of a declared field, `""` when the path is unknown
    pub fn value(&self, path: &FieldPath) -> &str {
        self.fields.get(path).unwrap_or_default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SessionPhase::Submitting(_))
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, SessionPhase::Submitted(_))
    }

    pub fn preview(&self) -> Option<&PdfHandle> {
        match &self.phase {
            SessionPhase::Submitted(handle) => Some(handle),
            _ => None,
        }
    }

    // Field store

    /// Set a declared field by its dotted path
    #[cfg(test)]
    pub fn update_field(&mut self, path: &str, value: impl Into<String>) -> Result<(), FormError> {
        let path = FieldPath::parse(path)?;
        self.set_field(&path, value)
    }

    /// Set a declared field. Typing clears the error and success banners.
    pub fn set_field(&mut self, path: &FieldPath, value: impl Into<String>) -> Result<(), FormError> {
        if self.schema.field(path).is_none() {
            return Err(FormError::UnknownField {
                kind: self.kind(),
                path: path.to_string(),
            });
        }
        self.fields = self.fields.update_field(path, value);
        self.error = None;
        self.success = false;
        Ok(())
    }

    /// Restore the initial values, clear messages, return to the first step
    pub fn reset_form(&mut self) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::SubmissionInProgress);
        }
        self.fields = self.initial.clone();
        self.error = None;
        self.success = false;
        self.steps.reset();
        self.phase = SessionPhase::Editing;
        Ok(())
    }

    // Steps

    pub fn next_step(&mut self) {
        self.steps.next_step();
    }

    pub fn prev_step(&mut self) {
        self.steps.prev_step();
    }

    pub fn go_to_step(&mut self, step: isize) {
        self.steps.go_to_step(step);
    }

    pub fn current_step_index(&self) -> usize {
        self.steps.current()
    }

    pub fn step_count(&self) -> usize {
        self.steps.total()
    }

    pub fn current_step(&self) -> &StepSpec {
        // StepController is sized from the schema, which has at least one step
        &self.schema.steps()[self.steps.current()]
    }

    pub fn current_fields(&self) -> &[FieldSpec] {
        &self.current_step().fields
    }

    pub fn progress(&self) -> f64 {
        self.steps.progress()
    }

    pub fn progress_percent(&self) -> u16 {
        self.steps.progress_percent()
    }

    pub fn is_first_step(&self) -> bool {
        self.steps.is_first_step()
    }

    pub fn is_last_step(&self) -> bool {
        self.steps.is_last_step()
    }

    // Submission

    /// Gate a submission attempt.
    ///
    /// Returns `None` when not editing the last step, or when some field is
    /// blank; the latter sets the validation message. Otherwise the session
    /// enters `Submitting` and the returned request must be run by the caller.
    pub fn prepare_submission(&mut self) -> Option<SubmissionRequest> {
        if !matches!(self.phase, SessionPhase::Editing) || !self.is_last_step() {
            return None;
        }
        if !validate_all_filled(&self.fields) {
            self.error = Some(VALIDATION_MESSAGE.to_string());
            self.success = false;
            return None;
        }

        let ticket = self.next_ticket;
        self.next_ticket = ticket.next();
        self.error = None;
        self.phase = SessionPhase::Submitting(ticket);

        Some(SubmissionRequest {
            ticket,
            kind: self.kind(),
            url: self.endpoint.clone(),
            body: self.fields.to_json(),
        })
    }

    /// Apply the result of a submission. Stale tickets are ignored and their
    /// PDF, if any, is released on drop.
    pub fn complete_submission(&mut self, ticket: SubmissionTicket, outcome: SubmissionOutcome) {
        match self.phase {
            SessionPhase::Submitting(current) if current == ticket => {}
            _ => {
                tracing::debug!("Ignoring result of stale submission {}", ticket);
                return;
            }
        }

        match outcome {
            Ok(handle) => {
                self.phase = SessionPhase::Submitted(handle);
                self.success = true;
                self.error = None;
            }
            Err(e) => {
                self.phase = SessionPhase::Editing;
                self.success = false;
                self.error = Some(e.user_message().to_string());
            }
        }
    }

    /// Abandon the in-flight submission. Returns whether one was pending.
    pub fn cancel_submission(&mut self) -> bool {
        if let SessionPhase::Submitting(ticket) = self.phase {
            tracing::info!("Cancelled submission {}", ticket);
            self.phase = SessionPhase::Editing;
            true
        } else {
            false
        }
    }

    /// Close the preview and release its PDF. Returns whether a preview was open.
    pub fn dismiss_preview(&mut self) -> bool {
        let phase = std::mem::replace(&mut self.phase, SessionPhase::Editing);
        match phase {
            SessionPhase::Submitted(mut handle) => {
                if let Err(e) = handle.release() {
                    tracing::warn!("Failed to release {}: {}", handle.path().display(), e);
                }
                true
            }
            other => {
                self.phase = other;
                false
            }
        }
    }
}
