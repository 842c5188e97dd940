//! Submission collaborator: wire types, trait seam and HTTP client

mod client;
mod payload;
mod traits;

pub use client::{HttpSubmissionClient, DEFAULT_ENDPOINT};
pub use payload::{ConsultationPayload, SubmissionReceipt, SubmitError};
pub use traits::SubmissionClient;

#[cfg(test)]
pub use traits::MockSubmissionClient;
