//! Field rendering utilities for forms

use crate::document::FieldSpec;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a multiline field gets, borders included
const MULTILINE_HEIGHT: u16 = 6;
const SINGLE_LINE_HEIGHT: u16 = 3;

pub fn field_constraint(spec: &FieldSpec) -> Constraint {
    if spec.multiline {
        Constraint::Length(MULTILINE_HEIGHT)
    } else {
        Constraint::Length(SINGLE_LINE_HEIGHT)
    }
}

/// Draw one labelled input with its current value
pub fn draw_field(frame: &mut Frame, area: Rect, spec: &FieldSpec, value: &str, is_active: bool) {
    let color = if is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let cursor = Span::styled("▌", Style::default().fg(Color::Cyan));

    let mut lines: Vec<Line> = if value.is_empty() && !is_active {
        vec![Line::from(Span::styled(
            "(empty)",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        // split('\n') keeps a trailing empty line so the cursor lands after a newline
        value.split('\n').map(|l| Line::from(l.to_string())).collect()
    };
    if is_active {
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
    }

    let title = if spec.multiline {
        format!(" {} (Enter: new line) ", spec.label)
    } else {
        format!(" {} ", spec.label)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}
