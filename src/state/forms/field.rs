//! Form field value objects

use super::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every input slot of the consultation intake form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Name,
    Phone,
    Email,
    BusinessNumber,
    Region,
    DesiredTime,
    ConsultType,
    AnnualRevenue,
    EmployeeCount,
    PreferredTime,
    Message,
    PrivacyConsent,
    MarketingConsent,
}

impl FieldName {
    pub const ALL: [FieldName; 13] = [
        FieldName::Name,
        FieldName::Phone,
        FieldName::Email,
        FieldName::BusinessNumber,
        FieldName::Region,
        FieldName::DesiredTime,
        FieldName::ConsultType,
        FieldName::AnnualRevenue,
        FieldName::EmployeeCount,
        FieldName::PreferredTime,
        FieldName::Message,
        FieldName::PrivacyConsent,
        FieldName::MarketingConsent,
    ];

    /// JSON key used by the submission endpoint
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::BusinessNumber => "businessNumber",
            Self::Region => "region",
            Self::DesiredTime => "desiredTime",
            Self::ConsultType => "consultType",
            Self::AnnualRevenue => "annualRevenue",
            Self::EmployeeCount => "employeeCount",
            Self::PreferredTime => "preferredTime",
            Self::Message => "message",
            Self::PrivacyConsent => "privacyConsent",
            Self::MarketingConsent => "marketingConsent",
        }
    }

    /// Input label shown next to the field
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "이름 / 회사명",
            Self::Phone => "휴대전화",
            Self::Email => "이메일",
            Self::BusinessNumber => "사업자등록번호",
            Self::Region => "지역",
            Self::DesiredTime => "상담 희망 시간",
            Self::ConsultType => "상담 유형",
            Self::AnnualRevenue => "연 매출 규모",
            Self::EmployeeCount => "직원 수",
            Self::PreferredTime => "희망 상담 시기",
            Self::Message => "상담 요청 내용",
            Self::PrivacyConsent => "개인정보 수집 및 이용에 동의합니다",
            Self::MarketingConsent => "마케팅 정보 수신에 동의합니다 (선택)",
        }
    }

    /// Placeholder hint for empty text inputs
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::Name => Some("예: 홍길동 / 나라똔"),
            Self::Phone => Some("010-0000-0000"),
            Self::Email => Some("you@example.com"),
            Self::BusinessNumber => Some("123-45-67890"),
            Self::Region => Some("예: 서울 강남구"),
            Self::DesiredTime => Some("예: 평일 오후 2시 이후"),
            Self::Message => Some("필요한 지원이나 궁금한 내용을 자유롭게 작성해 주세요."),
            _ => None,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Name | Self::Region | Self::DesiredTime => FieldKind::Text,
            Self::Phone => FieldKind::Phone,
            Self::Email => FieldKind::Email,
            Self::BusinessNumber => FieldKind::BusinessNumber,
            Self::ConsultType | Self::AnnualRevenue | Self::EmployeeCount | Self::PreferredTime => {
                FieldKind::Choice
            }
            Self::Message => FieldKind::LongText,
            Self::PrivacyConsent | Self::MarketingConsent => FieldKind::Consent,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How a field is edited, normalized and validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Phone,
    Email,
    BusinessNumber,
    Choice,
    LongText,
    Consent,
}

impl FieldKind {
    pub fn is_flag(&self) -> bool {
        matches!(self, FieldKind::Consent)
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, FieldKind::LongText)
    }

    /// Whether keystrokes edit the value directly
    pub fn accepts_typing(&self) -> bool {
        !matches!(self, FieldKind::Choice | FieldKind::Consent)
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Empty value of the right shape for a field
    pub fn empty_for(kind: FieldKind) -> Self {
        if kind.is_flag() {
            FieldValue::Flag(false)
        } else {
            FieldValue::Text(String::new())
        }
    }

    /// Get the text value (returns empty string for flags)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Flag(_) => "",
        }
    }

    /// Get the flag value (returns false for text)
    pub fn as_flag(&self) -> bool {
        match self {
            FieldValue::Flag(b) => *b,
            FieldValue::Text(_) => false,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Flag(b) => !*b,
        }
    }

    /// Coerce into the shape `kind` stores, then run its normalizer
    pub fn normalized_for(self, kind: FieldKind, max_message_len: usize) -> Self {
        if kind.is_flag() {
            return match self {
                FieldValue::Flag(b) => FieldValue::Flag(b),
                FieldValue::Text(s) => {
                    let trimmed = s.trim();
                    FieldValue::Flag(!trimmed.is_empty() && trimmed != "false")
                }
            };
        }

        let text = match self {
            FieldValue::Text(s) => s,
            FieldValue::Flag(b) => b.to_string(),
        };

        FieldValue::Text(match kind {
            FieldKind::Phone => normalize::format_phone_number(&text),
            FieldKind::BusinessNumber => normalize::format_business_number(&text),
            FieldKind::LongText => normalize::truncate_chars(&text, max_message_len),
            _ => text,
        })
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}
