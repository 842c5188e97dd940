//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

pub use layout::{step_at, step_pill_areas};

use crate::app::App;
use crate::state::Dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let areas = layout::create_layout(frame.area());

    layout::draw_header(frame, areas.header, app);
    forms::draw_step(frame, areas.form, app);
    forms::draw_summary(frame, areas.summary, app);
    layout::draw_status_bar(frame, areas.status, app);

    // Modal overlays go last so they sit on top
    match &app.state.dialog {
        Some(Dialog::PrivacyDetail) => components::render_privacy_dialog(frame),
        Some(Dialog::SubmissionFailed(message)) => {
            components::render_error_dialog(frame, message)
        }
        Some(Dialog::Submitted(banner)) => components::render_success_dialog(frame, banner),
        None => {}
    }
}
