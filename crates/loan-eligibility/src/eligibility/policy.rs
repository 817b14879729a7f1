use serde::{Deserialize, Serialize};

use super::domain::{ApplicantProfile, LoanType};
use super::StrategyOutcome;

/// Inclusive percentage at or above which an application is likely approved.
pub const APPROVAL_THRESHOLD: u8 = 60;

/// Verdict derived from the aggregate percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    LikelyApproved,
    LikelyRejected,
}

impl EligibilityStatus {
    pub const fn from_percentage(percentage: u8) -> Self {
        if percentage >= APPROVAL_THRESHOLD {
            EligibilityStatus::LikelyApproved
        } else {
            EligibilityStatus::LikelyRejected
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            EligibilityStatus::LikelyApproved => "likely_approved",
            EligibilityStatus::LikelyRejected => "likely_rejected",
        }
    }

    /// Applicant-facing wording; a low score means review, not refusal.
    pub const fn label(self) -> &'static str {
        match self {
            EligibilityStatus::LikelyApproved => "Likely to be Approved",
            EligibilityStatus::LikelyRejected => "May Need Review",
        }
    }
}

/// Round `100 * total / max` to the nearest whole percent.
pub(crate) fn aggregate_percentage(outcomes: &[StrategyOutcome]) -> u8 {
    let total: u32 = outcomes.iter().map(|o| u32::from(o.score)).sum();
    let max: u32 = outcomes.iter().map(|o| u32::from(o.max_score)).sum();
    if max == 0 {
        return 0;
    }

    let percentage = (f64::from(total) / f64::from(max) * 100.0).round();
    percentage.clamp(0.0, 100.0) as u8
}

/// How well pledged collateral covers the requested amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollateralCoverage {
    Strong,
    Adequate,
    Insufficient,
}

impl CollateralCoverage {
    pub fn reason(self) -> &'static str {
        match self {
            CollateralCoverage::Strong => "Strong collateral coverage improves approval chances.",
            CollateralCoverage::Adequate => "Adequate collateral coverage for the loan amount.",
            CollateralCoverage::Insufficient => "Collateral value is less than loan amount.",
        }
    }

    pub fn recommendation(self) -> Option<&'static str> {
        match self {
            CollateralCoverage::Insufficient => {
                Some("Consider providing additional collateral or reducing loan amount.")
            }
            _ => None,
        }
    }
}

/// Coverage note for secured loans with collateral; never affects the score.
pub(crate) fn collateral_coverage(profile: &ApplicantProfile) -> Option<CollateralCoverage> {
    if profile.loan_type != LoanType::Secured {
        return None;
    }

    let collateral = profile.collateral.as_ref()?;
    let coverage = if collateral.estimated_value >= profile.loan_amount * 1.5 {
        CollateralCoverage::Strong
    } else if collateral.estimated_value >= profile.loan_amount {
        CollateralCoverage::Adequate
    } else {
        CollateralCoverage::Insufficient
    };

    Some(coverage)
}

#[cfg(test)]
mod tests {
    use super::super::strategies::StrategyKind;
    use super::*;

    fn outcome(kind: StrategyKind, score: u8) -> StrategyOutcome {
        StrategyOutcome {
            strategy: kind,
            score,
            max_score: kind.max_score(),
            passed: true,
            reason: String::new(),
            recommendation: None,
        }
    }

    #[test]
    fn approval_threshold_is_inclusive() {
        assert_eq!(
            EligibilityStatus::from_percentage(60),
            EligibilityStatus::LikelyApproved
        );
        assert_eq!(
            EligibilityStatus::from_percentage(59),
            EligibilityStatus::LikelyRejected
        );
        assert_eq!(
            EligibilityStatus::from_percentage(100),
            EligibilityStatus::LikelyApproved
        );
    }

    #[test]
    fn percentage_rounds_to_nearest_whole_number() {
        let outcomes = [
            outcome(StrategyKind::DebtToIncome, 15),
            outcome(StrategyKind::CreditCapacity, 10),
        ];
        // 25 / 40 = 62.5%
        assert_eq!(aggregate_percentage(&outcomes), 63);
        assert_eq!(aggregate_percentage(&[]), 0);
    }

    #[test]
    fn status_labels_match_applicant_wording() {
        assert_eq!(EligibilityStatus::LikelyApproved.label(), "Likely to be Approved");
        assert_eq!(EligibilityStatus::LikelyRejected.label(), "May Need Review");
        assert_eq!(EligibilityStatus::LikelyRejected.key(), "likely_rejected");
    }
}
