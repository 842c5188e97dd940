//! Form state and its pure transition functions

use super::field::{FieldName, FieldValue};
use super::step::FormStep;
use super::validation::{first_failing_step, validate_all, validate_step, FieldErrors};
use std::collections::BTreeMap;

static EMPTY_TEXT: FieldValue = FieldValue::Text(String::new());

/// Current value of every field; always holds all of [`FieldName::ALL`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields(BTreeMap<FieldName, FieldValue>);

impl Default for FormFields {
    fn default() -> Self {
        Self(
            FieldName::ALL
                .into_iter()
                .map(|field| (field, FieldValue::empty_for(field.kind())))
                .collect(),
        )
    }
}

impl FormFields {
    pub fn get(&self, field: FieldName) -> &FieldValue {
        self.0.get(&field).unwrap_or(&EMPTY_TEXT)
    }

    pub fn text(&self, field: FieldName) -> &str {
        self.get(field).as_text()
    }

    pub fn flag(&self, field: FieldName) -> bool {
        self.get(field).as_flag()
    }

    /// Store a value as-is, without normalizing
    pub fn insert(&mut self, field: FieldName, value: FieldValue) {
        self.0.insert(field, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    /// Number of fields holding a non-blank value
    pub fn filled_count(&self) -> usize {
        self.0.values().filter(|v| !v.is_blank()).count()
    }
}

/// Outcome of a step navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTransition {
    /// `current_step` changed
    Moved,
    /// Allowed, but already at the target (or clamped at an end)
    Stayed,
    /// Current step failed validation; errors were recorded
    Refused,
}

/// Outcome of the synchronous part of a submit request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Validation passed and the payload was handed to the collaborator
    Started,
    /// A submission is already in flight
    AlreadySubmitting,
    /// The current step failed validation
    StepInvalid,
    /// Another step failed; `current_step` moved to it
    FormInvalid(FormStep),
}

/// The single source of truth for the wizard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    fields: FormFields,
    errors: FieldErrors,
    current_step: FormStep,
    is_submitting: bool,
    has_succeeded: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn current_step(&self) -> FormStep {
        self.current_step
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn has_succeeded(&self) -> bool {
        self.has_succeeded
    }

    pub fn step_has_errors(&self, step: FormStep) -> bool {
        step.fields().iter().any(|f| self.errors.contains_key(f))
    }

    /// Normalize and store one value, clearing only that field's error
    pub fn set_field(&mut self, field: FieldName, value: FieldValue, max_message_len: usize) {
        let value = value.normalized_for(field.kind(), max_message_len);
        self.fields.insert(field, value);
        self.errors.remove(&field);
    }

    /// Re-check the current step, replacing errors for the fields it owns.
    /// Errors belonging to other steps are kept.
    pub fn validate_current_step(&mut self) -> bool {
        let step = self.current_step;
        let step_errors = validate_step(step, &self.fields);
        self.errors.retain(|field, _| !step.owns(*field));
        let passed = step_errors.is_empty();
        self.errors.extend(step_errors);
        passed
    }

    pub fn next_step(&mut self) -> StepTransition {
        if !self.validate_current_step() {
            return StepTransition::Refused;
        }
        self.move_to(self.current_step.next())
    }

    pub fn previous_step(&mut self) -> StepTransition {
        self.move_to(self.current_step.prev())
    }

    /// Forward jumps are guarded by the current step; backward jumps are free
    pub fn jump_to_step(&mut self, target: FormStep) -> StepTransition {
        if target > self.current_step && !self.validate_current_step() {
            return StepTransition::Refused;
        }
        self.move_to(target)
    }

    /// Run the submit guards and mark the form as submitting when they pass
    pub fn try_begin_submit(&mut self) -> SubmitAttempt {
        if self.is_submitting {
            return SubmitAttempt::AlreadySubmitting;
        }
        if !self.validate_current_step() {
            return SubmitAttempt::StepInvalid;
        }

        let all_errors = validate_all(&self.fields);
        if let Some(step) = first_failing_step(&all_errors) {
            self.errors = all_errors;
            self.current_step = step;
            return SubmitAttempt::FormInvalid(step);
        }

        self.is_submitting = true;
        SubmitAttempt::Started
    }

    /// Settle an in-flight submission
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.is_submitting = false;
        if succeeded {
            self.has_succeeded = true;
            self.errors.clear();
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn move_to(&mut self, target: FormStep) -> StepTransition {
        if target == self.current_step {
            StepTransition::Stayed
        } else {
            self.current_step = target;
            StepTransition::Moved
        }
    }
}
