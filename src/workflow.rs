use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// High-level disposition of a case. The set is closed and validated at the
/// boundary, but any status may follow any other; there is no transition
/// graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStatus {
    Pending,
    UnderReview,
    InProgress,
    Assigned,
    Resolved,
    Closed,
}

impl CaseStatus {
    pub const ALL: &'static [CaseStatus] = &[
        CaseStatus::Pending,
        CaseStatus::UnderReview,
        CaseStatus::InProgress,
        CaseStatus::Assigned,
        CaseStatus::Resolved,
        CaseStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Pending => "Pending",
            CaseStatus::UnderReview => "Under Review",
            CaseStatus::InProgress => "In Progress",
            CaseStatus::Assigned => "Assigned",
            CaseStatus::Resolved => "Resolved",
            CaseStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|status| status.as_str() == value.trim())
            .copied()
            .ok_or_else(|| {
                AppError::validation(format!(
                    "invalid status '{value}'. Allowed values: {}",
                    allowed_labels(Self::ALL.iter().map(CaseStatus::as_str))
                ))
            })
    }
}

/// Workflow step a case currently occupies, independent of its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStage {
    FrontOfficeReceipt,
    DirectorReview,
    CaseInvestigation,
    CadetAssignment,
    CaseResolution,
}

impl CaseStage {
    pub const ALL: &'static [CaseStage] = &[
        CaseStage::FrontOfficeReceipt,
        CaseStage::DirectorReview,
        CaseStage::CaseInvestigation,
        CaseStage::CadetAssignment,
        CaseStage::CaseResolution,
    ];

    /// Stage every new case starts in.
    pub const INITIAL: CaseStage = CaseStage::FrontOfficeReceipt;

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStage::FrontOfficeReceipt => "Front Office Receipt",
            CaseStage::DirectorReview => "Director Review",
            CaseStage::CaseInvestigation => "Case Investigation",
            CaseStage::CadetAssignment => "Cadet Assignment",
            CaseStage::CaseResolution => "Case Resolution",
        }
    }
}

impl fmt::Display for CaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStage {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|stage| stage.as_str() == value.trim())
            .copied()
            .ok_or_else(|| {
                AppError::validation(format!(
                    "invalid stage '{value}'. Allowed values: {}",
                    allowed_labels(Self::ALL.iter().map(CaseStage::as_str))
                ))
            })
    }
}

fn allowed_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_status_labels() {
        assert_eq!(
            "Under Review".parse::<CaseStatus>().unwrap(),
            CaseStatus::UnderReview
        );
        assert_eq!(
            " In Progress ".parse::<CaseStatus>().unwrap(),
            CaseStatus::InProgress
        );
    }

    #[test]
    fn rejects_unknown_status_with_allowed_values() {
        let err = "Archived".parse::<CaseStatus>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("invalid status 'Archived'"));
        assert!(message.contains("Pending"));
        assert!(message.contains("Closed"));
    }

    #[test]
    fn parses_known_stage_labels() {
        assert_eq!(
            "Cadet Assignment".parse::<CaseStage>().unwrap(),
            CaseStage::CadetAssignment
        );
    }

    #[test]
    fn initial_stage_is_front_office_receipt() {
        assert_eq!(CaseStage::INITIAL.as_str(), "Front Office Receipt");
    }
}
