//! Trait abstraction for the submission collaborator to enable mocking in tests

use super::payload::{ConsultationPayload, SubmissionReceipt, SubmitError};
use async_trait::async_trait;

/// Sends a completed consultation request somewhere that accepts it
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Deliver the payload once. Any non-success outcome is an error.
    async fn submit(&self, payload: &ConsultationPayload) -> Result<SubmissionReceipt, SubmitError>;
}
