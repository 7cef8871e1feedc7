//! Layout components (status bar, toasts)

use crate::app::App;
use crate::platform::{
    JUMP_STEP_SHORTCUT, NEXT_STEP_SHORTCUT, PREV_STEP_SHORTCUT, RESET_SHORTCUT, SUBMIT_SHORTCUT,
};
use crate::state::{ToastLevel, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 3;

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " deedwright ",
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )];

    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        view_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(session) = &app.state.session {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            session.endpoint().to_string(),
            Style::default().fg(Color::Blue),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for what is on screen
fn view_hints(app: &App) -> String {
    match app.state.current_view {
        View::Home => "type:search  ↑/↓:select  Enter:open  Esc:clear/quit".to_string(),
        View::DocumentForm => {
            let session = app.state.session.as_ref();
            if session.is_some_and(|s| s.is_submitted()) {
                "o:open  s:save  y:copy path  Esc:close".to_string()
            } else if session.is_some_and(|s| s.is_submitting()) {
                "Esc:cancel".to_string()
            } else {
                format!(
                    "Tab:field  {}:next  {}:back  {}:step  {}:submit  {}:reset  Esc:home",
                    NEXT_STEP_SHORTCUT,
                    PREV_STEP_SHORTCUT,
                    JUMP_STEP_SHORTCUT,
                    SUBMIT_SHORTCUT,
                    RESET_SHORTCUT
                )
            }
        }
    }
}

/// Stack toasts in the top-right corner, newest on top
pub fn draw_toasts(frame: &mut Frame, area: Rect, app: &App) {
    if app.state.toasts.is_empty() {
        return;
    }
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width - width;

    for (idx, toast) in app.state.toasts.iter().enumerate() {
        let y = area.y + 1 + idx as u16 * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let toast_area = Rect {
            x,
            y,
            width,
            height: TOAST_HEIGHT,
        };
        let color = match toast.level {
            ToastLevel::Info => Color::Cyan,
            ToastLevel::Success => Color::Green,
            ToastLevel::Error => Color::Red,
        };

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let paragraph = Paragraph::new(toast.message.as_str())
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, toast_area);
    }
}
