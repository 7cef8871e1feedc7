//! Document catalog with type-to-filter search

use super::widgets::render_selectable_list;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};

/// Draw the home view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Documents
            Constraint::Length(4), // Selected document description
        ])
        .split(area);

    draw_search_input(frame, chunks[0], app);
    draw_documents(frame, chunks[1], app);
    draw_description(frame, chunks[2], app);
}

fn draw_search_input(frame: &mut Frame, area: Rect, app: &App) {
    let query = &app.state.search_query;
    let input_text = if query.is_empty() {
        Span::styled(
            "Type to search documents...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(query.as_str(), Style::default().fg(Color::White))
    };

    let input = Paragraph::new(Line::from(input_text)).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(input, area);

    if !app.state.has_errors() {
        frame.set_cursor_position((area.x + 1 + query.chars().count() as u16, area.y + 1));
    }
}

fn draw_documents(frame: &mut Frame, area: Rect, app: &App) {
    let documents = app.state.filtered_documents();
    let block = Block::default()
        .title(format!(" Documents ({}) ", documents.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if documents.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No documents match your search",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = documents
        .iter()
        .map(|kind| {
            ListItem::new(Line::from(vec![
                Span::styled(kind.title(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  ({})", kind.slug()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    render_selectable_list(frame, area, items, block, Some(app.state.selected_index));
}

fn draw_description(frame: &mut Frame, area: Rect, app: &App) {
    let text = app
        .state
        .selected_document()
        .map(|kind| kind.description())
        .unwrap_or_default();
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(paragraph, area);
}
