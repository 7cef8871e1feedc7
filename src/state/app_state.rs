//! Application state definitions

use super::forms::{FormError, FormSession};
use super::toast::ToastQueue;
use crate::document::{catalog, DocumentKind, FieldSpec};
use std::collections::VecDeque;
use std::path::PathBuf;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Document catalog with search
    #[default]
    Home,
    /// Multi-step form for one document
    DocumentForm,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Home
    pub search_query: String,
    pub selected_index: usize,

    // Form
    pub session: Option<FormSession>,
    /// Index of the focused field within the current step
    pub active_field: usize,
    /// Last location a generated PDF was saved to
    pub last_saved: Option<PathBuf>,

    // Feedback
    errors: VecDeque<String>,
    pub toasts: ToastQueue,
}

impl AppState {
    // Home

    pub fn filtered_documents(&self) -> Vec<DocumentKind> {
        catalog::search(&self.search_query)
    }

    pub fn selected_document(&self) -> Option<DocumentKind> {
        self.filtered_documents().get(self.selected_index).copied()
    }

    pub fn select_next(&mut self) {
        let count = self.filtered_documents().len();
        if count > 0 {
            self.selected_index = (self.selected_index + 1).min(count - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn search_input_char(&mut self, c: char) {
        self.search_query.push(c);
        self.selected_index = 0;
    }

    pub fn search_backspace(&mut self) {
        self.search_query.pop();
        self.selected_index = 0;
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.selected_index = 0;
    }

    // Form

    pub fn open_session(&mut self, session: FormSession) {
        tracing::info!("Opened {} form", session.kind());
        self.session = Some(session);
        self.active_field = 0;
        self.last_saved = None;
        self.current_view = View::DocumentForm;
    }

    /// Discard the session (and any preview it holds) and return home
    pub fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!("Closed {} form", session.kind());
        }
        self.active_field = 0;
        self.last_saved = None;
        self.current_view = View::Home;
    }

    pub fn active_field_spec(&self) -> Option<&FieldSpec> {
        self.session
            .as_ref()
            .and_then(|s| s.current_fields().get(self.active_field))
    }

    fn current_field_count(&self) -> usize {
        self.session
            .as_ref()
            .map(|s| s.current_fields().len())
            .unwrap_or(0)
    }

    pub fn next_field(&mut self) {
        let count = self.current_field_count();
        if count > 0 {
            self.active_field = (self.active_field + 1) % count;
        }
    }

    pub fn prev_field(&mut self) {
        let count = self.current_field_count();
        if count == 0 {
            return;
        }
        if self.active_field == 0 {
            self.active_field = count - 1;
        } else {
            self.active_field -= 1;
        }
    }

    /// Reset field focus after the step changed
    pub fn on_step_changed(&mut self) {
        self.active_field = 0;
    }

    fn edit_active_field(&mut self, edit: impl FnOnce(&mut String)) -> Result<(), FormError> {
        let Some(spec) = self.active_field_spec().cloned() else {
            return Ok(());
        };
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let mut value = session.value(&spec.path).to_string();
        edit(&mut value);
        session.set_field(&spec.path, value)
    }

    pub fn form_input_char(&mut self, c: char) -> Result<(), FormError> {
        self.edit_active_field(|value| value.push(c))
    }

    pub fn form_backspace(&mut self) -> Result<(), FormError> {
        self.edit_active_field(|value| {
            value.pop();
        })
    }

    /// Newline in multiline fields; returns false for single-line fields
    pub fn form_newline(&mut self) -> Result<bool, FormError> {
        if !self.active_field_spec().is_some_and(|f| f.multiline) {
            return Ok(false);
        }
        self.edit_active_field(|value| value.push('\n'))?;
        Ok(true)
    }

    // Errors

    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_state(kind: DocumentKind) -> AppState {
        let mut state = AppState::default();
        let schema = catalog::schema(kind).unwrap();
        state.open_session(FormSession::new(schema, "http://localhost/generate"));
        state
    }

    mod home {
        use super::*;

        #[test]
        fn test_default_lists_all_documents() {
            let state = AppState::default();
            assert_eq!(state.current_view, View::Home);
            assert_eq!(state.filtered_documents().len(), DocumentKind::ALL.len());
            assert_eq!(state.selected_document(), Some(DocumentKind::Nda));
        }

        #[test]
        fn test_selection_clamps() {
            let mut state = AppState::default();
            state.select_prev();
            assert_eq!(state.selected_index, 0);
            for _ in 0..20 {
                state.select_next();
            }
            assert_eq!(state.selected_index, DocumentKind::ALL.len() - 1);
        }

        #[test]
        fn test_search_resets_selection() {
            let mut state = AppState::default();
            state.select_next();
            for c in "deed".chars() {
                state.search_input_char(c);
            }
            assert_eq!(state.selected_index, 0);
            assert_eq!(state.selected_document(), Some(DocumentKind::LandSaleDeed));
            state.search_backspace();
            assert_eq!(state.search_query, "dee");
            state.clear_search();
            assert!(state.search_query.is_empty());
        }

        #[test]
        fn test_no_match_selects_nothing() {
            let mut state = AppState::default();
            for c in "zzz".chars() {
                state.search_input_char(c);
            }
            assert_eq!(state.selected_document(), None);
            state.select_next();
            assert_eq!(state.selected_index, 0);
        }
    }

    mod form {
        use super::*;

        #[test]
        fn test_open_and_close_session() {
            let mut state = form_state(DocumentKind::Nda);
            assert_eq!(state.current_view, View::DocumentForm);
            assert!(state.session.is_some());
            state.close_session();
            assert_eq!(state.current_view, View::Home);
            assert!(state.session.is_none());
        }

        #[test]
        fn test_field_focus_wraps_within_step() {
            let mut state = form_state(DocumentKind::Nda);
            state.session.as_mut().unwrap().next_step(); // Party Details, 4 fields
            state.on_step_changed();
            state.prev_field();
            assert_eq!(state.active_field, 3);
            state.next_field();
            assert_eq!(state.active_field, 0);
        }

        #[test]
        fn test_typing_edits_active_field() {
            let mut state = form_state(DocumentKind::Nda);
            for c in "2024-01-01x".chars() {
                state.form_input_char(c).unwrap();
            }
            state.form_backspace().unwrap();
            let spec = state.active_field_spec().unwrap().clone();
            let session = state.session.as_ref().unwrap();
            assert_eq!(spec.path.to_string(), "effective_date");
            assert_eq!(session.value(&spec.path), "2024-01-01");
        }

        #[test]
        fn test_newline_only_in_multiline_fields() {
            let mut state = form_state(DocumentKind::Nda);
            assert!(!state.form_newline().unwrap());

            state.session.as_mut().unwrap().go_to_step(2); // Purpose
            state.on_step_changed();
            state.form_input_char('a').unwrap();
            assert!(state.form_newline().unwrap());
            state.form_input_char('b').unwrap();

            let spec = state.active_field_spec().unwrap().clone();
            assert_eq!(state.session.as_ref().unwrap().value(&spec.path), "a\nb");
        }

        #[test]
        fn test_input_without_session_is_noop() {
            let mut state = AppState::default();
            assert!(state.form_input_char('x').is_ok());
            assert!(state.active_field_spec().is_none());
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn test_error_queue_is_fifo() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first".into());
            state.push_error("second".into());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }
    }
}
