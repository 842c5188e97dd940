//! Form rendering module
//!
//! - `field_renderer`: single inputs (text, choice, consent, long text)
//! - `step_panel`: the active step with its fields and navigation buttons
//! - `summary_panel`: live summary of the answers so far

mod field_renderer;
mod step_panel;
mod summary_panel;

pub use step_panel::draw_step;
pub use summary_panel::draw_summary;
