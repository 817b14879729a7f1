use chrono::NaiveDate;

use crate::eligibility::domain::{ApplicantProfile, ExistingLoan, LoanType, Occupation};
use crate::eligibility::{EligibilityEngine, EligibilityResult, StrategyKind, StrategyOutcome};

pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::default()
}

/// Salaried 30-year-old earning 50,000 a month asking for 150,000 unsecured over a year.
pub(super) fn salaried_profile() -> ApplicantProfile {
    ApplicantProfile {
        loan_type: LoanType::Unsecured,
        loan_amount: 150_000.0,
        preferred_tenure_months: 12,
        monthly_income: 50_000.0,
        occupation: Occupation::Salaried,
        years_of_experience: 5.0,
        date_of_birth: NaiveDate::from_ymd_opt(1995, 1, 10).expect("valid date"),
        existing_loans: Vec::new(),
        collateral: None,
        expected_emi: None,
    }
}

pub(super) fn existing_loan(outstanding_amount: f64, emi: f64) -> ExistingLoan {
    ExistingLoan {
        loan_type: "personal".to_string(),
        outstanding_amount,
        emi,
        frequency: None,
    }
}

pub(super) fn born(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn evaluate(profile: &ApplicantProfile) -> EligibilityResult {
    engine()
        .evaluate(profile, as_of())
        .expect("profile evaluates")
}

pub(super) fn outcome(result: &EligibilityResult, kind: StrategyKind) -> &StrategyOutcome {
    result
        .breakdown
        .iter()
        .find(|outcome| outcome.strategy == kind)
        .expect("strategy reported")
}
