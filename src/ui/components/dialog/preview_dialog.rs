//! Generated PDF preview

use super::base::{key_span, render_dialog, DialogConfig};
use crate::state::PdfHandle;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};
use std::path::Path;

fn detail(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

/// Summary of the generated PDF with the actions available on it
pub fn render_preview_dialog(frame: &mut Frame, handle: &PdfHandle, last_saved: Option<&Path>) {
    let info = handle.info();
    let title = format!("{} ready", handle.kind().title());

    let mut details = vec![
        detail("File", handle.path().display().to_string()),
        detail("Size", info.human_size()),
    ];
    if info.page_count > 0 {
        details.push(detail("Pages", info.page_count.to_string()));
    }
    if let Some(version) = &info.version {
        details.push(detail("Format", format!("PDF {version}")));
    }
    if !info.is_pdf() {
        details.push(Line::from(Span::styled(
            "The server response does not look like a PDF.",
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(saved) = last_saved {
        details.push(Line::from(""));
        details.push(Line::from(vec![
            Span::styled("Saved to  ", Style::default().fg(Color::Green)),
            Span::raw(saved.display().to_string()),
        ]));
    }

    let hint = vec![
        key_span("o"),
        Span::raw(" open  "),
        key_span("s"),
        Span::raw(" save copy  "),
        key_span("y"),
        Span::raw(" copy path  "),
        key_span("Esc"),
        Span::raw(" close"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: &title,
            accent: Color::Green,
            details,
            hint: Some(hint),
            max_width: 90,
            ..Default::default()
        },
    );
}
