//! Multi-step document form

use super::field_renderer::{draw_field, field_constraint};
use crate::app::App;
use crate::platform::{NEXT_STEP_SHORTCUT, PREV_STEP_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::forms::FormSession;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

const SUCCESS_MESSAGE: &str = "Document generated successfully.";

/// Draw the form of the open session
pub fn draw_document_form(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.state.session else {
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", session.kind().title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Step title
            Constraint::Length(1),             // Progress
            Constraint::Length(1),             // Spacer
            Constraint::Min(0),                // Fields
            Constraint::Length(1),             // Banner
            Constraint::Length(BUTTON_HEIGHT), // Navigation
        ])
        .split(inner);

    draw_step_header(frame, chunks[0], session);
    draw_progress(frame, chunks[1], session);
    draw_fields(frame, chunks[3], session, app.state.active_field);
    draw_banner(frame, chunks[4], session);
    draw_buttons(frame, chunks[5], session);
}

fn draw_step_header(frame: &mut Frame, area: Rect, session: &FormSession) {
    let header = Line::from(vec![
        Span::styled(
            format!(
                "Step {} of {}: ",
                session.current_step_index() + 1,
                session.step_count()
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            session.current_step().title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn draw_progress(frame: &mut Frame, area: Rect, session: &FormSession) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio((session.progress() / 100.0).clamp(0.0, 1.0))
        .label(format!("{}%", session.progress_percent()));
    frame.render_widget(gauge, area);
}

fn draw_fields(frame: &mut Frame, area: Rect, session: &FormSession, active: usize) {
    let fields = session.current_fields();
    let mut constraints: Vec<Constraint> = fields.iter().map(field_constraint).collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, spec) in fields.iter().enumerate() {
        let is_active = idx == active && !session.is_submitting();
        draw_field(frame, chunks[idx], spec, session.value(&spec.path), is_active);
    }
}

fn draw_banner(frame: &mut Frame, area: Rect, session: &FormSession) {
    let banner = if let Some(error) = session.error() {
        Span::styled(error, Style::default().fg(Color::Red))
    } else if session.is_submitting() {
        Span::styled(
            "Generating PDF... (Esc to cancel)",
            Style::default().fg(Color::Yellow),
        )
    } else if session.success() {
        Span::styled(SUCCESS_MESSAGE, Style::default().fg(Color::Green))
    } else {
        return;
    };
    frame.render_widget(Paragraph::new(Line::from(banner)), area);
}

fn draw_buttons(frame: &mut Frame, area: Rect, session: &FormSession) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let editing = !session.is_submitting();
    let last = session.is_last_step();

    render_button(
        frame,
        chunks[0],
        &format!("◀ Previous ({PREV_STEP_SHORTCUT})"),
        false,
        editing && !session.is_first_step(),
    );
    render_button(
        frame,
        chunks[1],
        &format!("Next ▶ ({NEXT_STEP_SHORTCUT})"),
        !last,
        editing && !last,
    );
    let submit_label = if session.is_submitting() {
        "Submitting...".to_string()
    } else {
        format!("Submit ({SUBMIT_SHORTCUT})")
    };
    render_button(frame, chunks[2], &submit_label, last, editing && last);
}
