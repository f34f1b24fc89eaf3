//! Error dialog component

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const MAX_WIDTH: u16 = 50;

/// Centered rect of the given size, clamped to `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, message: &str) {
    let inner_width = MAX_WIDTH.saturating_sub(4) as usize;
    // Rough line estimate for sizing; Paragraph does the actual wrapping
    let message_lines = message.chars().count().div_ceil(inner_width.max(1)).max(1) as u16;
    let dialog_area = centered(frame.area(), MAX_WIDTH, message_lines + 6);

    let hint = Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(" or "),
        Span::styled("Esc", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(" to dismiss"),
    ]);

    let content = vec![
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        hint,
    ];

    let dialog = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(
                    " Error ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(dialog, dialog_area);
}
