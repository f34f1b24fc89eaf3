//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    forms::draw_auth_form(frame, main_area, app);
    layout::draw_status_bar(frame, status_area, app);

    // Error dialog on top of everything (modal)
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
