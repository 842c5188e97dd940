//! Wire types exchanged with the consultation submission endpoint

use crate::state::{FieldName, FormFields};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// JSON body posted to the endpoint; keys match the form's field names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationPayload {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub business_number: String,
    pub region: String,
    pub desired_time: String,
    pub consult_type: String,
    pub annual_revenue: String,
    pub employee_count: String,
    pub preferred_time: String,
    pub message: String,
    pub privacy_consent: bool,
    pub marketing_consent: bool,
}

impl ConsultationPayload {
    /// Snapshot every field of the form
    pub fn from_fields(fields: &FormFields) -> Self {
        let text = |field: FieldName| fields.text(field).to_string();
        Self {
            name: text(FieldName::Name),
            phone: text(FieldName::Phone),
            email: text(FieldName::Email),
            business_number: text(FieldName::BusinessNumber),
            region: text(FieldName::Region),
            desired_time: text(FieldName::DesiredTime),
            consult_type: text(FieldName::ConsultType),
            annual_revenue: text(FieldName::AnnualRevenue),
            employee_count: text(FieldName::EmployeeCount),
            preferred_time: text(FieldName::PreferredTime),
            message: text(FieldName::Message),
            privacy_consent: fields.flag(FieldName::PrivacyConsent),
            marketing_consent: fields.flag(FieldName::MarketingConsent),
        }
    }
}

/// Body of a 2xx response; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitAck {
    pub success: Option<bool>,
    #[serde(default)]
    pub notifications_forwarded: bool,
    pub notification_error: Option<String>,
    pub message: Option<String>,
}

/// Confirmation that the endpoint accepted a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Client-generated id, sent as `x-request-id`
    pub request_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub status: u16,
    pub notifications_forwarded: bool,
    pub notification_error: Option<String>,
}

impl SubmissionReceipt {
    /// Receipt for a plain 200 with no body details
    pub fn accepted(request_id: Uuid) -> Self {
        Self {
            request_id,
            submitted_at: Utc::now(),
            status: 200,
            notifications_forwarded: false,
            notification_error: None,
        }
    }
}

/// Why a submission did not go through
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("submission rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("failed to reach submission endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("submission ended before a response arrived")]
    Interrupted,
}
