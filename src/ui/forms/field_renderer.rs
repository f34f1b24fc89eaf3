//! Field rendering utilities for forms

use crate::state::{Field, FieldSpec};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered input plus an error line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a field with its error (if any) underneath
///
/// `error` is expected to already be filtered by touched state.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    field: &Field,
    is_active: bool,
    error: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let border_color = match (is_active, error.is_some()) {
        (_, true) => Color::Red,
        (true, false) => Color::Cyan,
        (false, false) => Color::DarkGray,
    };

    let display_value = field.display_value(spec.secret);
    let cursor = if is_active { "▌" } else { "" };
    let content = if display_value.is_empty() && !is_active {
        Line::from(Span::styled(
            spec.label.to_lowercase(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::raw(display_value),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ])
    };

    let block = Block::default()
        .title(format!(" {} ", spec.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(Paragraph::new(content).block(block), chunks[0]);

    if let Some(message) = error {
        let line = Paragraph::new(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(line, chunks[1]);
    }
}
