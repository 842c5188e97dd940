//! Step form controller
//!
//! Owns a [`FormState`] and performs the side effects around it: the
//! submission task, the auto-reset timer after a success, and the event
//! channel that brings their results back to the UI loop.
//!
//! Dropping the controller is the "unmount": any in-flight submission and
//! pending reset are aborted, so nothing touches the state afterwards.

use super::field::{FieldKind, FieldName, FieldValue};
use super::form_state::{FormState, StepTransition, SubmitAttempt};
use super::step::FormStep;
use super::summary::{project_summary, DisplayLookup, SummaryItem};
use crate::intake::{ConsultationPayload, SubmissionClient, SubmissionReceipt, SubmitError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Generic notice surfaced when a submission fails for any reason
pub const SUBMISSION_FAILED_NOTICE: &str =
    "상담 신청 중 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.";

/// Construction-time settings for a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    /// How long the success state is shown before the form resets
    pub reset_delay: Duration,
    /// Character cap applied to the free-text message
    pub message_max_length: usize,
}

impl FormSettings {
    pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(3200);
    pub const DEFAULT_MESSAGE_MAX_LENGTH: usize = 600;
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            reset_delay: Self::DEFAULT_RESET_DELAY,
            message_max_length: Self::DEFAULT_MESSAGE_MAX_LENGTH,
        }
    }
}

/// Results of background work, tagged with the generation that started it
#[derive(Debug)]
pub enum FormEvent {
    SubmissionFinished {
        generation: u64,
        result: Result<SubmissionReceipt, SubmitError>,
    },
    ResetElapsed {
        generation: u64,
    },
}

/// What the host should tell the user after an event was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormNotice {
    Submitted(SubmissionReceipt),
    SubmissionFailed(String),
    Reset,
}

/// Sends the completion event when the submission task ends, however it ends
struct CompletionGuard {
    tx: mpsc::UnboundedSender<FormEvent>,
    generation: u64,
    result: Option<Result<SubmissionReceipt, SubmitError>>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        let result = self.result.take().unwrap_or(Err(SubmitError::Interrupted));
        let _ = self.tx.send(FormEvent::SubmissionFinished {
            generation: self.generation,
            result,
        });
    }
}

/// Drives the intake wizard: transitions, validation and submission
pub struct StepFormController {
    state: FormState,
    settings: FormSettings,
    lookup: Arc<DisplayLookup>,
    client: Arc<dyn SubmissionClient>,
    /// Bumped on every submit start and reset; stale events are ignored
    generation: u64,
    events_tx: mpsc::UnboundedSender<FormEvent>,
    events_rx: mpsc::UnboundedReceiver<FormEvent>,
    in_flight: Option<JoinHandle<()>>,
    pending_reset: Option<JoinHandle<()>>,
}

impl StepFormController {
    pub fn new(
        client: Arc<dyn SubmissionClient>,
        lookup: Arc<DisplayLookup>,
        settings: FormSettings,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: FormState::default(),
            settings,
            lookup,
            client,
            generation: 0,
            events_tx,
            events_rx,
            in_flight: None,
            pending_reset: None,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn lookup(&self) -> &DisplayLookup {
        &self.lookup
    }

    pub fn set_field(&mut self, field: FieldName, value: impl Into<FieldValue>) {
        self.state
            .set_field(field, value.into(), self.settings.message_max_length);
        debug!(field = %field, "form field updated");
    }

    /// Step a choice field to its next/previous option
    pub fn cycle_choice(&mut self, field: FieldName, forward: bool) {
        let current = self.state.fields().text(field).to_string();
        if let Some(code) = self.lookup.cycle(field, &current, forward) {
            let code = code.to_string();
            self.set_field(field, code);
        }
    }

    /// Flip a consent checkbox
    pub fn toggle_flag(&mut self, field: FieldName) {
        if field.kind() == FieldKind::Consent {
            let value = !self.state.fields().flag(field);
            self.set_field(field, value);
        }
    }

    pub fn go_to_next_step(&mut self) -> StepTransition {
        let from = self.state.current_step();
        let outcome = self.state.next_step();
        self.log_transition("next", from, outcome);
        outcome
    }

    pub fn go_to_previous_step(&mut self) -> StepTransition {
        let from = self.state.current_step();
        let outcome = self.state.previous_step();
        self.log_transition("previous", from, outcome);
        outcome
    }

    pub fn go_to_step(&mut self, target: FormStep) -> StepTransition {
        let from = self.state.current_step();
        let outcome = self.state.jump_to_step(target);
        self.log_transition("jump", from, outcome);
        outcome
    }

    /// Validate and, when everything passes, start the submission in the background.
    ///
    /// The outcome arrives later as a [`FormEvent`]; feed it to
    /// [`handle_event`](Self::handle_event) or use [`poll_notices`](Self::poll_notices).
    pub fn submit(&mut self) -> SubmitAttempt {
        let attempt = self.state.try_begin_submit();
        match attempt {
            SubmitAttempt::Started => self.spawn_submission(),
            SubmitAttempt::AlreadySubmitting => {
                debug!("submit ignored: submission already in flight");
            }
            SubmitAttempt::StepInvalid => {
                debug!(
                    step = ?self.state.current_step(),
                    errors = self.state.errors().len(),
                    "submit refused: current step invalid"
                );
            }
            SubmitAttempt::FormInvalid(step) => {
                debug!(
                    step = ?step,
                    errors = self.state.errors().len(),
                    "submit refused: form invalid, moved to first failing step"
                );
            }
        }
        attempt
    }

    /// Restore the initial state and abandon any background work
    pub fn reset(&mut self) {
        self.generation += 1;
        self.abort_background();
        self.state.reset();
        debug!("form reset");
    }

    pub fn project_summary(&self) -> Vec<SummaryItem> {
        project_summary(self.state.fields(), &self.lookup)
    }

    /// Apply a background result to the state
    pub fn handle_event(&mut self, event: FormEvent) -> Option<FormNotice> {
        match event {
            FormEvent::SubmissionFinished { generation, result } => {
                if generation != self.generation || !self.state.is_submitting() {
                    debug!(generation, "stale submission result ignored");
                    return None;
                }
                self.in_flight = None;
                match result {
                    Ok(receipt) => {
                        self.state.finish_submit(true);
                        info!(request_id = %receipt.request_id, "consultation request submitted");
                        self.schedule_reset();
                        Some(FormNotice::Submitted(receipt))
                    }
                    Err(err) => {
                        self.state.finish_submit(false);
                        warn!(error = %err, "consultation request failed");
                        Some(FormNotice::SubmissionFailed(
                            SUBMISSION_FAILED_NOTICE.to_string(),
                        ))
                    }
                }
            }
            FormEvent::ResetElapsed { generation } => {
                if generation != self.generation || !self.state.has_succeeded() {
                    return None;
                }
                self.pending_reset = None;
                self.state.reset();
                self.generation += 1;
                debug!("form auto-reset after success");
                Some(FormNotice::Reset)
            }
        }
    }

    /// Apply every event that is already waiting, without blocking
    pub fn poll_notices(&mut self) -> Vec<FormNotice> {
        let mut notices = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            if let Some(notice) = self.handle_event(event) {
                notices.push(notice);
            }
        }
        notices
    }

    /// Wait for the next event that produces a notice
    pub async fn next_notice(&mut self) -> Option<FormNotice> {
        while let Some(event) = self.events_rx.recv().await {
            if let Some(notice) = self.handle_event(event) {
                return Some(notice);
            }
        }
        None
    }

    fn spawn_submission(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let payload = ConsultationPayload::from_fields(self.state.fields());
        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();

        info!(
            generation,
            filled = self.state.fields().filled_count(),
            "submitting consultation request"
        );

        self.in_flight = Some(tokio::spawn(async move {
            let mut guard = CompletionGuard {
                tx,
                generation,
                result: None,
            };
            let result = client.submit(&payload).await;
            guard.result = Some(result);
        }));
    }

    fn schedule_reset(&mut self) {
        if let Some(handle) = self.pending_reset.take() {
            handle.abort();
        }
        let generation = self.generation;
        let deadline = tokio::time::Instant::now() + self.settings.reset_delay;
        let tx = self.events_tx.clone();
        self.pending_reset = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send(FormEvent::ResetElapsed { generation });
        }));
    }

    fn abort_background(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        if let Some(handle) = self.pending_reset.take() {
            handle.abort();
        }
    }

    fn log_transition(&self, kind: &str, from: FormStep, outcome: StepTransition) {
        match outcome {
            StepTransition::Refused => debug!(
                kind,
                step = ?from,
                errors = self.state.errors().len(),
                "step transition refused"
            ),
            _ => debug!(kind, from = ?from, to = ?self.state.current_step(), "step transition"),
        }
    }
}

impl Drop for StepFormController {
    fn drop(&mut self) {
        self.abort_background();
    }
}
