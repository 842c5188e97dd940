//! Per-field validation rules for the intake form

use super::field::{FieldKind, FieldName, FieldValue};
use super::form_state::FormFields;
use super::normalize::digits_only;
use super::step::FormStep;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Field name -> human-readable error, only for fields that failed
pub type FieldErrors = BTreeMap<FieldName, String>;

/// Minimum digits for a reachable mobile number
pub const PHONE_MIN_DIGITS: usize = 10;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

const PHONE_MISSING: &str = "연락 가능한 휴대전화 번호를 입력해 주세요.";
const PHONE_TOO_SHORT: &str = "올바른 형식의 휴대전화 번호인지 확인해 주세요.";
const EMAIL_INVALID: &str = "올바른 형식의 이메일 주소인지 확인해 주세요.";

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

/// Message shown when a required field is left empty
fn required_message(field: FieldName) -> &'static str {
    match field {
        FieldName::Name => "이름 또는 회사명을 입력해 주세요.",
        FieldName::Region => "활동 지역을 입력해주세요.",
        FieldName::DesiredTime => "상담 희망 시간을 입력해주세요.",
        FieldName::Phone => PHONE_MISSING,
        FieldName::ConsultType => "필요한 상담 유형을 선택해 주세요.",
        FieldName::AnnualRevenue => "연 매출 규모를 선택해 주세요.",
        FieldName::EmployeeCount => "직원 수를 선택해 주세요.",
        FieldName::PreferredTime => "희망 상담 시기를 선택해 주세요.",
        FieldName::PrivacyConsent => "개인정보 수집 및 이용에 동의해 주세요.",
        _ => "이 필드는 필수입니다.",
    }
}

/// Whether `value` has the conservative `local@domain.tld` shape
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(value))
}

/// Check one field. Returns the error message when it fails.
///
/// Length is never a failure: long text is capped when it is set.
pub fn validate_field(field: FieldName, value: &FieldValue, required: bool) -> Option<&'static str> {
    match field.kind() {
        FieldKind::Phone => {
            let digits = digits_only(value.as_text());
            if digits.is_empty() {
                required.then_some(PHONE_MISSING)
            } else if digits.len() < PHONE_MIN_DIGITS {
                Some(PHONE_TOO_SHORT)
            } else {
                None
            }
        }
        FieldKind::Email => {
            let text = value.as_text().trim();
            if text.is_empty() {
                required.then(|| required_message(field))
            } else if !is_valid_email(text) {
                Some(EMAIL_INVALID)
            } else {
                None
            }
        }
        FieldKind::Text
        | FieldKind::Choice
        | FieldKind::Consent
        | FieldKind::BusinessNumber
        | FieldKind::LongText => (required && value.is_blank()).then(|| required_message(field)),
    }
}

/// Validate every field a step owns
pub fn validate_step(step: FormStep, fields: &FormFields) -> FieldErrors {
    step.fields()
        .iter()
        .filter_map(|&field| {
            validate_field(field, fields.get(field), step.is_required(field))
                .map(|msg| (field, msg.to_string()))
        })
        .collect()
}

/// Validate all steps, in step order
pub fn validate_all(fields: &FormFields) -> FieldErrors {
    FormStep::ALL
        .into_iter()
        .flat_map(|step| validate_step(step, fields))
        .collect()
}

/// First step (in sequence order) that owns a failing field
pub fn first_failing_step(errors: &FieldErrors) -> Option<FormStep> {
    FormStep::ALL
        .into_iter()
        .find(|step| step.fields().iter().any(|f| errors.contains_key(f)))
}
