//! Display lookup tables and the "answers so far" projection

use super::field::{FieldKind, FieldName};
use super::form_state::FormFields;

/// Placeholder for a text field that has no value yet
pub const NOT_ENTERED: &str = "미입력";
/// Placeholder for a choice field with no (or an unknown) selection
pub const NOT_SELECTED: &str = "미선택";
/// Consent flag states
pub const AGREED: &str = "동의";
pub const NOT_AGREED: &str = "미동의";

/// One selectable option of a choice field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Code -> label tables for every choice field, supplied by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLookup {
    pub consult_types: Vec<ChoiceOption>,
    pub annual_revenue: Vec<ChoiceOption>,
    pub employee_count: Vec<ChoiceOption>,
    pub preferred_time: Vec<ChoiceOption>,
}

impl Default for DisplayLookup {
    fn default() -> Self {
        Self {
            consult_types: vec![
                ChoiceOption::new("policy-fund", "정책자금"),
                ChoiceOption::new("grant", "정부지원금"),
                ChoiceOption::new("certification", "기업 인증"),
                ChoiceOption::new("startup", "창업 지원"),
                ChoiceOption::new("other", "기타 상담"),
            ],
            annual_revenue: vec![
                ChoiceOption::new("under1", "1억 미만"),
                ChoiceOption::new("1to5", "1억 ~ 5억"),
                ChoiceOption::new("5to10", "5억 ~ 10억"),
                ChoiceOption::new("10to50", "10억 ~ 50억"),
                ChoiceOption::new("over50", "50억 이상"),
            ],
            employee_count: vec![
                ChoiceOption::new("under5", "5인 미만"),
                ChoiceOption::new("5to19", "5 ~ 19인"),
                ChoiceOption::new("20to49", "20 ~ 49인"),
                ChoiceOption::new("50to99", "50 ~ 99인"),
                ChoiceOption::new("over100", "100인 이상"),
            ],
            preferred_time: vec![
                ChoiceOption::new("asap", "최대한 빨리"),
                ChoiceOption::new("thisWeek", "이번 주 내"),
                ChoiceOption::new("thisMonth", "이번 달 내"),
                ChoiceOption::new("flexible", "일정 협의"),
            ],
        }
    }
}

impl DisplayLookup {
    /// Options for a choice field; empty for any other field
    pub fn options(&self, field: FieldName) -> &[ChoiceOption] {
        match field {
            FieldName::ConsultType => &self.consult_types,
            FieldName::AnnualRevenue => &self.annual_revenue,
            FieldName::EmployeeCount => &self.employee_count,
            FieldName::PreferredTime => &self.preferred_time,
            _ => &[],
        }
    }

    pub fn label(&self, field: FieldName, code: &str) -> Option<&str> {
        self.options(field)
            .iter()
            .find(|opt| opt.value == code)
            .map(|opt| opt.label.as_str())
    }

    /// Code of the option after (`forward`) or before `current`, wrapping.
    /// An empty or unknown code starts at the first (or last) option.
    pub fn cycle(&self, field: FieldName, current: &str, forward: bool) -> Option<&str> {
        let options = self.options(field);
        if options.is_empty() {
            return None;
        }
        let len = options.len();
        let next = match options.iter().position(|opt| opt.value == current) {
            Some(idx) if forward => (idx + 1) % len,
            Some(idx) => (idx + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        Some(options[next].value.as_str())
    }
}

/// One row of the summary side panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    pub label: &'static str,
    pub value: String,
}

/// Rows shown in the summary panel, in display order
const SUMMARY_ROWS: [(FieldName, &str); 13] = [
    (FieldName::Name, "이름 / 회사명"),
    (FieldName::Phone, "연락처"),
    (FieldName::Region, "지역"),
    (FieldName::DesiredTime, "상담 희망 시간"),
    (FieldName::Email, "이메일"),
    (FieldName::ConsultType, "상담 유형"),
    (FieldName::AnnualRevenue, "연 매출"),
    (FieldName::EmployeeCount, "직원 수"),
    (FieldName::PreferredTime, "희망 상담 시기"),
    (FieldName::BusinessNumber, "사업자등록번호"),
    (FieldName::Message, "문의 내용"),
    (FieldName::PrivacyConsent, "개인정보 수집 동의"),
    (FieldName::MarketingConsent, "마케팅 수신 동의"),
];

/// Project the current answers into label/display-value rows
pub fn project_summary(fields: &FormFields, lookup: &DisplayLookup) -> Vec<SummaryItem> {
    SUMMARY_ROWS
        .iter()
        .map(|&(field, label)| SummaryItem {
            label,
            value: display_value(field, fields, lookup),
        })
        .collect()
}

fn display_value(field: FieldName, fields: &FormFields, lookup: &DisplayLookup) -> String {
    match field.kind() {
        FieldKind::Consent if fields.flag(field) => AGREED.to_string(),
        FieldKind::Consent => NOT_AGREED.to_string(),
        FieldKind::Choice => lookup
            .label(field, fields.text(field))
            .unwrap_or(NOT_SELECTED)
            .to_string(),
        _ => {
            let raw = fields.text(field);
            if raw.trim().is_empty() {
                NOT_ENTERED.to_string()
            } else {
                // One row per field
                raw.lines().collect::<Vec<_>>().join(" ")
            }
        }
    }
}

/// Plain-text rendering of the summary, one `label: value` per line
pub fn summary_text(items: &[SummaryItem]) -> String {
    items
        .iter()
        .map(|item| format!("{}: {}", item.label, item.value))
        .collect::<Vec<_>>()
        .join("\n")
}
