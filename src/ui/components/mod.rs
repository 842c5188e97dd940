//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_button, render_shortcut_button, BUTTON_HEIGHT};
pub use dialog::{render_error_dialog, render_privacy_dialog, render_success_dialog};
