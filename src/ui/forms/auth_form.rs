//! Sign-in / sign-up screen rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{Focus, Screen};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Widest the form gets on large terminals
const MAX_FORM_WIDTH: u16 = 56;

fn link_text(screen: Screen) -> (&'static str, &'static str) {
    match screen {
        Screen::SignIn => ("Don't have an account? ", "Sign up"),
        Screen::SignUp => ("Already registered? ", "Sign in"),
    }
}

/// Draw the mounted form screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let screen = app.current_screen();
    let width = area.width.min(MAX_FORM_WIDTH);
    let area = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };

    let block = Block::default()
        .title(format!(" {} ", screen.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let specs = app.form().specs();
    let form = app.form().snapshot();
    let mut constraints: Vec<Constraint> = specs
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Submit
    constraints.push(Constraint::Length(1)); // Link
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    let focus = app.focus();
    for (index, spec) in specs.iter().enumerate() {
        let Some(field) = form.field(&spec.name) else {
            continue;
        };
        draw_field(
            frame,
            chunks[index],
            spec,
            field,
            focus == Focus::Field(index),
            form.visible_error(&spec.name),
        );
    }

    let submitting = form.status.is_submitting();
    let label = if submitting {
        format!("{}…", screen.submit_label())
    } else {
        screen.submit_label().to_string()
    };
    render_button(
        frame,
        chunks[specs.len()],
        &label,
        focus == Focus::SubmitButton,
        !submitting,
    );

    let (prompt, target) = link_text(screen);
    let link_style = if focus == Focus::SwitchLink {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().add_modifier(Modifier::UNDERLINED)
    };
    let link = Paragraph::new(Line::from(vec![
        Span::styled(prompt, Style::default().fg(Color::DarkGray)),
        Span::styled(target, link_style),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(link, chunks[specs.len() + 1]);
}
