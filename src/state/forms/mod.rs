//! Form domain layer
//!
//! The consultation intake wizard: field definitions, input normalization,
//! per-step validation, the form state machine and the
//! [`StepFormController`] that drives submission.

mod controller;
mod field;
mod form_state;
mod normalize;
mod step;
mod summary;
mod validation;

pub use controller::{FormNotice, FormSettings, StepFormController};
pub use field::{FieldKind, FieldName, FieldValue};
pub use form_state::{FormFields, StepTransition, SubmitAttempt};
pub use step::FormStep;
pub use summary::{summary_text, DisplayLookup, NOT_AGREED, NOT_ENTERED, NOT_SELECTED};
