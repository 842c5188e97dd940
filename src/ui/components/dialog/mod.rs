//! Dialog components for TUI

mod base;
mod error_dialog;
mod privacy_dialog;
mod success_dialog;

pub use error_dialog::render_error_dialog;
pub use privacy_dialog::render_privacy_dialog;
pub use success_dialog::render_success_dialog;
