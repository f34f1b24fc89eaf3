//! Screen layout and status bar

use crate::app::App;
use crate::state::{Focus, FormStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split into the form area and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Key hints for the focused element
fn focus_hints(focus: Focus) -> &'static str {
    match focus {
        Focus::Field(_) => "Tab:next  Enter/^S:submit  ^N:switch  Esc:back",
        Focus::SubmitButton => "Enter:submit  Tab:next  Esc:back",
        Focus::SwitchLink => "Enter:open  Tab:next  Esc:back",
    }
}

pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Form status indicator
    let indicator = match app.form().status() {
        FormStatus::Submitting => Span::styled(" ◌ ", Style::default().fg(Color::Yellow)),
        FormStatus::Accepted => Span::styled(" ● ", Style::default().fg(Color::Green)),
        FormStatus::Rejected(_) => Span::styled(" ● ", Style::default().fg(Color::Red)),
        FormStatus::Pristine | FormStatus::Editing => {
            Span::styled(" ○ ", Style::default().fg(Color::Gray))
        }
    };
    spans.push(indicator);

    spans.push(Span::styled(
        focus_hints(app.focus()),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        let color = match app.form().status() {
            FormStatus::Accepted => Color::Green,
            FormStatus::Rejected(_) => Color::Red,
            _ => Color::Yellow,
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(color)));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        app.form().mode().label(),
        Style::default().fg(Color::Blue),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
