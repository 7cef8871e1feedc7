//! Application state and core logic

use crate::api::{run_submission, DocGenApi, HttpDocGenClient};
use crate::config::AppConfig;
use crate::document::{catalog, DocumentKind};
use crate::state::forms::{FormSession, SessionPhase, SubmissionOutcome, SubmissionTicket};
use crate::state::{AppState, PdfStore, ToastLevel, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Result of a background submission, delivered back to the event loop
#[derive(Debug)]
pub struct SubmissionEvent {
    pub ticket: SubmissionTicket,
    pub outcome: SubmissionOutcome,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    api: Arc<dyn DocGenApi>,
    store: Arc<PdfStore>,
    config: AppConfig,
    submission_tx: UnboundedSender<SubmissionEvent>,
    submission_rx: UnboundedReceiver<SubmissionEvent>,
    /// Task running the in-flight submission, if any
    pending: Option<JoinHandle<()>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App talking to the configured API
    pub fn new(config: AppConfig) -> Result<Self> {
        let api = HttpDocGenClient::new(config.request_timeout());
        tracing::info!(
            "Using API at {} (timeout {:?})",
            config.api_base_url(),
            config.request_timeout()
        );
        Ok(Self::with_api(config, Arc::new(api)))
    }

    pub fn with_api(config: AppConfig, api: Arc<dyn DocGenApi>) -> Self {
        let store = PdfStore::new(config.preview_dir());
        tracing::debug!("Previews are stored in {}", store.dir().display());
        let (submission_tx, submission_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            api,
            store: Arc::new(store),
            config,
            submission_tx,
            submission_rx,
            pending: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.abort_pending();
        self.quit = true;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.state.toasts.push(level, message);
    }

    /// Start a fresh session for `kind` and switch to the form view
    pub fn open_document(&mut self, kind: DocumentKind) {
        match catalog::schema(kind) {
            Ok(schema) => {
                let endpoint = kind.endpoint_url(self.config.api_base_url());
                self.state.open_session(FormSession::new(schema, endpoint));
            }
            Err(e) => self.push_error(format!("Cannot open {}: {}", kind, e)),
        }
    }

    fn close_document(&mut self) {
        self.abort_pending();
        self.state.close_session();
    }

    /// Per-frame housekeeping: apply finished submissions and expire toasts
    pub fn tick(&mut self) {
        self.poll_submissions();
        self.state.toasts.prune(Instant::now());
    }

    /// Drain finished submissions from the channel
    pub fn poll_submissions(&mut self) {
        while let Ok(event) = self.submission_rx.try_recv() {
            self.apply_submission(event);
        }
    }

    fn apply_submission(&mut self, event: SubmissionEvent) {
        let Some(session) = self.state.session.as_mut() else {
            tracing::debug!("Dropping result of {}: no open form", event.ticket);
            return;
        };
        let current = matches!(session.phase(), SessionPhase::Submitting(t) if *t == event.ticket);
        if !current {
            session.complete_submission(event.ticket, event.outcome);
            return;
        }

        self.pending = None;
        let toast = match &event.outcome {
            Ok(handle) => {
                self.state.last_saved = None;
                (
                    ToastLevel::Success,
                    format!("{} generated", handle.kind().title()),
                )
            }
            Err(e) => (ToastLevel::Error, e.user_message().to_string()),
        };
        session.complete_submission(event.ticket, event.outcome);
        self.toast(toast.0, toast.1);
    }

    fn abort_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    /// Validate the form and, if it passes, run the submission in the background
    fn start_submission(&mut self) {
        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        let Some(request) = session.prepare_submission() else {
            return;
        };

        let api = Arc::clone(&self.api);
        let store = Arc::clone(&self.store);
        let tx = self.submission_tx.clone();
        let timeout = self.config.request_timeout();
        self.pending = Some(tokio::spawn(async move {
            let outcome = run_submission(api.as_ref(), &store, &request, timeout).await;
            if tx
                .send(SubmissionEvent {
                    ticket: request.ticket,
                    outcome,
                })
                .is_err()
            {
                tracing::debug!("Submission {} finished after shutdown", request.ticket);
            }
        }));
    }

    fn cancel_submission(&mut self) {
        let cancelled = self
            .state
            .session
            .as_mut()
            .is_some_and(FormSession::cancel_submission);
        if cancelled {
            self.abort_pending();
            self.toast(ToastLevel::Info, "Submission cancelled");
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Home => self.handle_home_key(key),
            View::DocumentForm => {
                let previewing = self
                    .state
                    .session
                    .as_ref()
                    .is_some_and(FormSession::is_submitted);
                if previewing {
                    self.handle_preview_key(key)
                } else {
                    self.handle_form_key(key)
                }
            }
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                if self.state.search_query.is_empty() {
                    self.quit();
                } else {
                    self.state.clear_search();
                }
            }
            KeyCode::Enter => {
                if let Some(kind) = self.state.selected_document() {
                    self.open_document(kind);
                }
            }
            KeyCode::Up => self.state.select_prev(),
            KeyCode::Down => self.state.select_next(),
            KeyCode::Backspace => self.state.search_backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.search_input_char(c);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let Some(session) = self.state.session.as_mut() else {
            self.state.current_view = View::Home;
            return Ok(());
        };

        match key.code {
            KeyCode::Esc => {
                if session.is_submitting() {
                    self.cancel_submission();
                } else {
                    self.close_document();
                }
            }
            KeyCode::Char('s') if ctrl => {
                if session.is_last_step() {
                    self.start_submission();
                } else {
                    session.next_step();
                    self.state.on_step_changed();
                }
            }
            KeyCode::Char('n') if ctrl => {
                session.next_step();
                self.state.on_step_changed();
            }
            KeyCode::Char('p') if ctrl => {
                session.prev_step();
                self.state.on_step_changed();
            }
            // Alt+1 is the first step; digits past the last step clamp to it
            KeyCode::Char(c @ '1'..='9') if alt => {
                session.go_to_step((c as u32 - '1' as u32) as isize);
                self.state.on_step_changed();
            }
            KeyCode::Char('r') if ctrl => match session.reset_form() {
                Ok(()) => {
                    self.state.on_step_changed();
                    self.toast(ToastLevel::Info, "Form reset");
                }
                Err(e) => self.toast(ToastLevel::Error, format!("Cannot reset: {}", e)),
            },
            KeyCode::Tab | KeyCode::Down => self.state.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_field(),
            KeyCode::Enter => {
                if !self.state.form_newline()? {
                    self.state.next_field();
                }
            }
            KeyCode::Backspace => self.state.form_backspace()?,
            KeyCode::Char(c) if !ctrl && !alt => self.state.form_input_char(c)?,
            _ => {}
        }
        Ok(())
    }

    fn handle_preview_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                if let Some(session) = self.state.session.as_mut() {
                    session.dismiss_preview();
                }
                // A saved copy belongs to the preview that was just closed
                self.state.last_saved = None;
            }
            KeyCode::Char('o') => self.open_preview(),
            KeyCode::Char('s') => self.save_preview(),
            KeyCode::Char('y') => self.copy_preview_path(),
            _ => {}
        }
        Ok(())
    }

    fn open_preview(&mut self) {
        let Some(path) = self.preview_path() else {
            return;
        };
        match crate::platform::open_in_viewer(&path) {
            Ok(()) => self.toast(ToastLevel::Info, "Opening PDF viewer..."),
            Err(e) => self.push_error(format!("Failed to open viewer: {}", e)),
        }
    }

    fn save_preview(&mut self) {
        let dir = self.config.output_dir();
        let result = match self.state.session.as_ref().and_then(|s| s.preview()) {
            Some(handle) => handle.save_copy(&dir),
            None => return,
        };
        match result {
            Ok(path) => {
                tracing::info!("Saved PDF to {}", path.display());
                self.toast(ToastLevel::Success, format!("Saved to {}", path.display()));
                self.state.last_saved = Some(path);
            }
            Err(e) => self.push_error(format!("Failed to save PDF: {}", e)),
        }
    }

    fn copy_preview_path(&mut self) {
        let Some(path) = self.state.last_saved.clone().or_else(|| self.preview_path()) else {
            return;
        };
        let text = path.display().to_string();
        match self.copy_to_clipboard(&text) {
            Ok(()) => self.toast(ToastLevel::Info, "Path copied to clipboard"),
            Err(e) => self.push_error(format!("Failed to copy: {}", e)),
        }
    }

    fn preview_path(&self) -> Option<std::path::PathBuf> {
        self.state
            .session
            .as_ref()
            .and_then(|s| s.preview())
            .map(|h| h.path().to_path_buf())
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}
