//! Wizard steps and the fields each one owns

use super::field::FieldName;
use serde::{Deserialize, Serialize};

/// Ordered steps of the intake wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormStep {
    #[default]
    Contact,
    Business,
    Details,
}

impl FormStep {
    pub const ALL: [FormStep; 3] = [FormStep::Contact, FormStep::Business, FormStep::Details];

    pub fn first() -> Self {
        Self::ALL[0]
    }

    pub fn last() -> Self {
        Self::ALL[Self::ALL.len() - 1]
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Contact => 0,
            Self::Business => 1,
            Self::Details => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Following step, clamped at the last one
    pub fn next(&self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(Self::last())
    }

    /// Preceding step, clamped at the first one
    pub fn prev(&self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(Self::first())
    }

    pub fn is_first(&self) -> bool {
        *self == Self::first()
    }

    pub fn is_last(&self) -> bool {
        *self == Self::last()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Contact => "기본 정보",
            Self::Business => "상담 조건",
            Self::Details => "상세 요청 및 동의",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Contact => "연락 가능한 정보를 알려주세요.",
            Self::Business => "기업 규모와 원하는 상담 유형을 선택해 주세요.",
            Self::Details => "필요한 내용을 남겨 주시면 더 정확히 도와드릴 수 있어요.",
        }
    }

    pub fn helper(&self) -> &'static str {
        match self {
            Self::Contact => "필수 항목은 * 표시되어 있습니다.",
            Self::Business => "선택한 정보는 요약 카드에 바로 반영됩니다.",
            Self::Details => "개인정보 수집 및 이용에 동의해야 상담이 가능합니다.",
        }
    }

    /// All fields shown on this step, in focus order
    pub fn fields(&self) -> &'static [FieldName] {
        match self {
            Self::Contact => &[
                FieldName::Name,
                FieldName::Phone,
                FieldName::Email,
                FieldName::BusinessNumber,
                FieldName::Region,
                FieldName::DesiredTime,
            ],
            Self::Business => &[
                FieldName::ConsultType,
                FieldName::AnnualRevenue,
                FieldName::EmployeeCount,
                FieldName::PreferredTime,
            ],
            Self::Details => &[
                FieldName::Message,
                FieldName::PrivacyConsent,
                FieldName::MarketingConsent,
            ],
        }
    }

    /// Fields that must be filled before leaving the step
    pub fn required_fields(&self) -> &'static [FieldName] {
        match self {
            Self::Contact => &[
                FieldName::Name,
                FieldName::Phone,
                FieldName::Region,
                FieldName::DesiredTime,
            ],
            Self::Business => &[
                FieldName::ConsultType,
                FieldName::AnnualRevenue,
                FieldName::EmployeeCount,
                FieldName::PreferredTime,
            ],
            Self::Details => &[FieldName::PrivacyConsent],
        }
    }

    pub fn owns(&self, field: FieldName) -> bool {
        self.fields().contains(&field)
    }

    pub fn is_required(&self, field: FieldName) -> bool {
        self.required_fields().contains(&field)
    }

    /// Step that shows `field`
    pub fn owning(field: FieldName) -> Self {
        Self::ALL
            .into_iter()
            .find(|step| step.owns(field))
            .unwrap_or(Self::first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_is_first() {
        assert_eq!(FormStep::default(), FormStep::Contact);
        assert!(FormStep::default().is_first());
    }

    #[test]
    fn test_next_clamps_at_last() {
        assert_eq!(FormStep::Contact.next(), FormStep::Business);
        assert_eq!(FormStep::Business.next(), FormStep::Details);
        assert_eq!(FormStep::Details.next(), FormStep::Details);
    }

    #[test]
    fn test_prev_clamps_at_first() {
        assert_eq!(FormStep::Details.prev(), FormStep::Business);
        assert_eq!(FormStep::Contact.prev(), FormStep::Contact);
    }

    #[test]
    fn test_index_round_trips() {
        for step in FormStep::ALL {
            assert_eq!(FormStep::from_index(step.index()), Some(step));
        }
        assert_eq!(FormStep::from_index(3), None);
    }

    #[test]
    fn test_steps_own_disjoint_fields_covering_all() {
        let mut seen = HashSet::new();
        for step in FormStep::ALL {
            for field in step.fields() {
                assert!(seen.insert(*field), "{field} owned twice");
            }
        }
        assert_eq!(seen.len(), FieldName::ALL.len());
    }

    #[test]
    fn test_required_fields_are_owned() {
        for step in FormStep::ALL {
            for field in step.required_fields() {
                assert!(step.owns(*field));
            }
        }
    }

    #[test]
    fn test_optional_fields_within_required_step() {
        assert!(FormStep::Contact.owns(FieldName::Email));
        assert!(!FormStep::Contact.is_required(FieldName::Email));
        assert!(!FormStep::Details.is_required(FieldName::Message));
    }

    #[test]
    fn test_owning_step() {
        assert_eq!(FormStep::owning(FieldName::Phone), FormStep::Contact);
        assert_eq!(FormStep::owning(FieldName::PreferredTime), FormStep::Business);
        assert_eq!(FormStep::owning(FieldName::MarketingConsent), FormStep::Details);
    }
}
