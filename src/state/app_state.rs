//! Application state definitions
//!
//! Everything the terminal host keeps besides the form itself: which field
//! has focus, which dialog is open and the transient status line.

use super::forms::{FieldName, FormStep};
use crate::intake::SubmissionReceipt;
use std::time::{Duration, Instant};

/// Modal dialog currently covering the form
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    /// Full text of the privacy collection notice
    PrivacyDetail,
    /// Submission failed; the form keeps its contents
    SubmissionFailed(String),
    /// Submission accepted; counts down to the automatic reset
    Submitted(SuccessBanner),
}

/// Success dialog contents plus the countdown it animates
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessBanner {
    pub receipt: SubmissionReceipt,
    pub shown_at: Instant,
    pub duration: Duration,
}

impl SuccessBanner {
    pub fn new(receipt: SubmissionReceipt, duration: Duration) -> Self {
        Self {
            receipt,
            shown_at: Instant::now(),
            duration,
        }
    }

    /// Remaining share of the countdown, eased, from 1.0 down to 0.0
    pub fn remaining(&self) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        let progress =
            (self.shown_at.elapsed().as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        1.0 - simple_easing::cubic_out(progress)
    }

    /// Whole seconds left before the form resets
    pub fn seconds_left(&self) -> u64 {
        let left = self.duration.saturating_sub(self.shown_at.elapsed());
        left.as_millis().div_ceil(1000) as u64
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Index of the focused field within the current step
    pub focused_field: usize,
    pub dialog: Option<Dialog>,
    status_message: Option<(String, Instant)>,
}

impl AppState {
    /// How long a status line message stays visible
    pub const STATUS_TTL: Duration = Duration::from_secs(3);

    /// The field that currently has focus on `step`
    pub fn focused(&self, step: FormStep) -> FieldName {
        let fields = step.fields();
        fields[self.focused_field.min(fields.len() - 1)]
    }

    /// Move focus to the next field of the step, wrapping
    pub fn focus_next(&mut self, step: FormStep) {
        let count = step.fields().len();
        self.focused_field = (self.focused_field + 1) % count;
    }

    /// Move focus to the previous field of the step, wrapping
    pub fn focus_prev(&mut self, step: FormStep) {
        let count = step.fields().len();
        if self.focused_field == 0 {
            self.focused_field = count - 1;
        } else {
            self.focused_field -= 1;
        }
    }

    pub fn is_last_field(&self, step: FormStep) -> bool {
        self.focused_field + 1 >= step.fields().len()
    }

    /// Focus `field` if it lives on `step`, otherwise the first field
    pub fn focus_field(&mut self, step: FormStep, field: Option<FieldName>) {
        self.focused_field = field
            .and_then(|f| step.fields().iter().position(|candidate| *candidate == f))
            .unwrap_or(0);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Status message, if it has not expired yet
    pub fn status(&self) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, at)| at.elapsed() < Self::STATUS_TTL)
            .map(|(message, _)| message.as_str())
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn has_dialog(&self) -> bool {
        self.dialog.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    #[test]
    fn test_focus_wraps_within_step() {
        let mut state = AppState::default();
        let count = FormStep::Business.fields().len();
        for _ in 0..count {
            state.focus_next(FormStep::Business);
        }
        assert_eq!(state.focused_field, 0);

        state.focus_prev(FormStep::Business);
        assert_eq!(state.focused_field, count - 1);
        assert!(state.is_last_field(FormStep::Business));
    }

    #[test]
    fn test_focused_clamps_to_shorter_step() {
        let state = AppState {
            focused_field: 10,
            ..AppState::default()
        };
        let last = *FormStep::Details.fields().last().unwrap();
        assert_eq!(state.focused(FormStep::Details), last);
    }

    #[test]
    fn test_focus_field_finds_index() {
        let mut state = AppState::default();
        state.focus_field(FormStep::Contact, Some(FieldName::Region));
        assert_eq!(state.focused(FormStep::Contact), FieldName::Region);

        state.focus_field(FormStep::Contact, Some(FieldName::PrivacyConsent));
        assert_eq!(state.focused_field, 0);
    }

    #[test]
    fn test_status_message() {
        let mut state = AppState::default();
        assert_eq!(state.status(), None);
        state.set_status("복사되었습니다");
        assert_eq!(state.status(), Some("복사되었습니다"));
    }

    #[test]
    fn test_success_banner_countdown() {
        let receipt = SubmissionReceipt::accepted(Uuid::new_v4());
        let banner = SuccessBanner::new(receipt.clone(), Duration::from_secs(60));
        assert!(banner.remaining() > 0.9);
        assert_eq!(banner.seconds_left(), 60);

        let expired = SuccessBanner::new(receipt, Duration::ZERO);
        assert_eq!(expired.remaining(), 0.0);
        assert_eq!(expired.seconds_left(), 0);
    }
}
