//! UI module for rendering the TUI

mod components;
mod forms;
mod home;
mod layout;
mod widgets;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Home => home::draw(frame, main_area, app),
        View::DocumentForm => forms::draw_document_form(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    if let Some(handle) = app.state.session.as_ref().and_then(|s| s.preview()) {
        components::render_preview_dialog(frame, handle, app.state.last_saved.as_deref());
    }

    layout::draw_toasts(frame, main_area, app);

    // Error dialog goes on top of everything
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockDocGenApi;
    use crate::config::AppConfig;
    use crate::document::DocumentKind;
    use crate::state::{PdfStore, ToastLevel};
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("deedwright-ui-{}", uuid::Uuid::new_v4()))
    }

    fn test_app() -> App {
        let config = AppConfig {
            preview_dir: Some(temp_dir()),
            ..Default::default()
        };
        App::with_api(config, Arc::new(MockDocGenApi::new()))
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_home_lists_documents() {
        let app = test_app();
        let screen = render(&app);
        assert!(screen.contains("Documents (6)"));
        assert!(screen.contains(DocumentKind::LandSaleDeed.title()));
        assert!(screen.contains("Enter:open"));
    }

    #[test]
    fn test_home_empty_search() {
        let mut app = test_app();
        for c in "zzz".chars() {
            app.state.search_input_char(c);
        }
        let screen = render(&app);
        assert!(screen.contains("No documents match your search"));
    }

    #[test]
    fn test_form_shows_step_and_progress() {
        let mut app = test_app();
        app.open_document(DocumentKind::Nda);
        let screen = render(&app);
        assert!(screen.contains("Step 1 of 4: Effective Date"));
        assert!(screen.contains("0%"));
        assert!(screen.contains("Submit (Ctrl+S)"));
    }

    #[test]
    fn test_form_shows_validation_message() {
        let mut app = test_app();
        app.open_document(DocumentKind::Nda);
        let session = app.state.session.as_mut().unwrap();
        session.go_to_step(3);
        assert!(session.prepare_submission().is_none());

        let screen = render(&app);
        assert!(screen.contains("Please fill in all fields before submitting."));
        assert!(screen.contains("100%"));
    }

    #[test]
    fn test_preview_dialog_over_form() {
        let mut app = test_app();
        app.open_document(DocumentKind::PowerOfAttorney);
        let session = app.state.session.as_mut().unwrap();
        let paths: Vec<String> = session
            .schema()
            .fields()
            .map(|f| f.path.to_string())
            .collect();
        for path in &paths {
            session.update_field(path, "x").unwrap();
        }
        session.go_to_step(isize::MAX);
        let request = session.prepare_submission().unwrap();
        let store = PdfStore::new(temp_dir());
        let handle = store
            .create(DocumentKind::PowerOfAttorney, b"%PDF-1.7\n%%EOF")
            .unwrap();
        session.complete_submission(request.ticket, Ok(handle));

        let screen = render(&app);
        assert!(screen.contains("Power of Attorney ready"));
        assert!(screen.contains("save copy"));
        assert!(screen.contains("Document generated successfully."));
    }

    #[test]
    fn test_error_dialog_and_toasts() {
        let mut app = test_app();
        app.state.toasts.push(ToastLevel::Success, "Saved to /tmp/x.pdf");
        app.push_error("Failed to open viewer");
        let screen = render(&app);
        assert!(screen.contains("Saved to /tmp/x.pdf"));
        assert!(screen.contains("Failed to open viewer"));
        assert!(screen.contains("to dismiss"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = test_app();
        app.open_document(DocumentKind::LandSaleDeed);
        app.state.toasts.push(ToastLevel::Info, "hello");
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();
    }
}
