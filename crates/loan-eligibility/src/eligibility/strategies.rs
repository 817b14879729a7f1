use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::config::EligibilityConfig;
use super::domain::{ApplicantProfile, Occupation};
use super::StrategyOutcome;
use crate::amortization::{compute_installment, PaymentFrequency};

/// The five scoring rules, in the order their reasons are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    DebtToIncome,
    FixedObligationToIncome,
    LoanToIncome,
    CreditCapacity,
    DebtLoad,
}

impl StrategyKind {
    pub const ORDERED: [StrategyKind; 5] = [
        StrategyKind::DebtToIncome,
        StrategyKind::FixedObligationToIncome,
        StrategyKind::LoanToIncome,
        StrategyKind::CreditCapacity,
        StrategyKind::DebtLoad,
    ];

    pub const fn max_score(self) -> u8 {
        match self {
            StrategyKind::DebtToIncome => 25,
            StrategyKind::FixedObligationToIncome
            | StrategyKind::LoanToIncome
            | StrategyKind::DebtLoad => 20,
            StrategyKind::CreditCapacity => 15,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            StrategyKind::DebtToIncome => "Debt-to-Income",
            StrategyKind::FixedObligationToIncome => "Fixed Obligation to Income",
            StrategyKind::LoanToIncome => "Loan-to-Income",
            StrategyKind::CreditCapacity => "Credit Capacity",
            StrategyKind::DebtLoad => "Existing Debt Load",
        }
    }

    pub(crate) fn assess(self, context: &ScoringContext<'_>) -> StrategyOutcome {
        match self {
            StrategyKind::DebtToIncome => debt_to_income(context),
            StrategyKind::FixedObligationToIncome => fixed_obligation_to_income(context),
            StrategyKind::LoanToIncome => loan_to_income(context),
            StrategyKind::CreditCapacity => credit_capacity(context),
            StrategyKind::DebtLoad => debt_load(context),
        }
    }
}

/// Figures shared by several strategies, derived once per evaluation.
pub(crate) struct ScoringContext<'a> {
    pub profile: &'a ApplicantProfile,
    pub proposed_emi: f64,
    pub total_obligations: f64,
    pub annual_income: f64,
    pub age: i64,
}

impl<'a> ScoringContext<'a> {
    pub fn new(
        profile: &'a ApplicantProfile,
        config: &EligibilityConfig,
        as_of: NaiveDate,
    ) -> Self {
        let proposed_emi = proposed_emi(profile, config);
        Self {
            profile,
            proposed_emi,
            total_obligations: profile.existing_emi_total() + proposed_emi,
            annual_income: profile.annual_income(),
            age: profile.age_on(as_of),
        }
    }

    /// Monthly obligations as a percentage of monthly income.
    fn obligation_ratio(&self) -> f64 {
        self.total_obligations / self.profile.monthly_income * 100.0
    }
}

/// The applicant's stated EMI, or one derived at the default rate over the preferred tenure.
pub(crate) fn proposed_emi(profile: &ApplicantProfile, config: &EligibilityConfig) -> f64 {
    match profile.expected_emi {
        Some(emi) if emi > 0.0 => emi,
        _ => {
            compute_installment(
                profile.loan_amount,
                config.default_annual_rate,
                f64::from(profile.preferred_tenure_months) / 12.0,
                PaymentFrequency::Monthly,
            )
            .installment_amount
        }
    }
}

fn debt_to_income(context: &ScoringContext<'_>) -> StrategyOutcome {
    let kind = StrategyKind::DebtToIncome;
    let dti = context.obligation_ratio();

    if dti < 40.0 {
        StrategyOutcome::passed(
            kind,
            25,
            format!(
                "Excellent DTI ratio of {dti:.1}%. Your debt obligations are well within acceptable limits."
            ),
        )
    } else if dti <= 50.0 {
        StrategyOutcome::passed(
            kind,
            15,
            format!("DTI ratio of {dti:.1}% is moderate. Consider reducing existing debts."),
        )
        .recommending("Consider paying off some existing loans to improve your debt ratio.")
    } else {
        StrategyOutcome::failed(
            kind,
            5,
            format!("High DTI ratio of {dti:.1}%. Total EMIs exceed 50% of your income."),
        )
        .recommending("Reduce loan amount or clear existing debts before applying.")
    }
}

fn fixed_obligation_to_income(context: &ScoringContext<'_>) -> StrategyOutcome {
    let kind = StrategyKind::FixedObligationToIncome;
    let foir = context.obligation_ratio();
    let occupation = context.profile.occupation;
    let ceiling = occupation.foir_ceiling();

    if foir <= f64::from(ceiling) {
        StrategyOutcome::passed(
            kind,
            20,
            format!(
                "FOIR of {foir:.1}% is within the acceptable limit of {ceiling}% for {occupation} individuals."
            ),
        )
    } else {
        StrategyOutcome::failed(
            kind,
            5,
            format!(
                "FOIR of {foir:.1}% exceeds the {ceiling}% limit for {occupation} individuals."
            ),
        )
        .recommending("Consider a smaller loan amount or longer tenure to reduce monthly EMI.")
    }
}

fn loan_to_income(context: &ScoringContext<'_>) -> StrategyOutcome {
    let kind = StrategyKind::LoanToIncome;
    let loan_type = context.profile.loan_type;
    let max_ratio = loan_type.max_income_multiple();
    let lti = context.profile.loan_amount / context.annual_income;

    if lti <= f64::from(max_ratio) * 0.6 {
        StrategyOutcome::passed(
            kind,
            20,
            format!(
                "Loan amount is {lti:.1}x your annual income. Well within the {max_ratio}x limit for {loan_type} loans."
            ),
        )
    } else if lti <= f64::from(max_ratio) {
        StrategyOutcome::passed(
            kind,
            12,
            format!(
                "Loan amount is {lti:.1}x your annual income. Within the {max_ratio}x limit but on the higher side."
            ),
        )
        .recommending("Consider reducing loan amount for better approval chances.")
    } else {
        StrategyOutcome::failed(
            kind,
            3,
            format!(
                "Loan amount is {lti:.1}x your annual income. Exceeds the {max_ratio}x limit for {loan_type} loans."
            ),
        )
        .recommending(format!(
            "For {loan_type} loans, consider reducing the loan amount to within {max_ratio}x your annual income."
        ))
    }
}

fn credit_capacity(context: &ScoringContext<'_>) -> StrategyOutcome {
    let profile = context.profile;
    let occupation = profile.occupation;
    let mut tally = Tally::default();

    let experience = profile.years_of_experience;
    let minimum = occupation.minimum_experience_years();
    if experience >= f64::from(minimum) * 3.0 {
        tally.add(7, format!("Strong work experience of {experience} years."));
    } else if experience >= f64::from(minimum) {
        tally.add(4, format!("Adequate work experience of {experience} years."));
    } else {
        tally.add(1, format!("Limited work experience of {experience} years."));
        tally.recommend(format!(
            "Minimum {minimum} years of experience recommended for {occupation} individuals."
        ));
    }

    let age = context.age;
    match age {
        25..=55 => tally.add(5, format!("Age {age} is within the optimal range.")),
        21..=24 => tally.add(3, format!("Age {age} is acceptable but on the younger side.")),
        56..=65 => {
            tally.add(3, format!("Age {age} may limit tenure options."));
            tally.recommend("Consider shorter loan tenure based on retirement age.");
        }
        _ => tally.add(1, format!("Age {age} is outside the preferred range.")),
    }

    match occupation {
        Occupation::Salaried => tally.add(3, "Salaried employment provides stable income."),
        Occupation::Business | Occupation::SelfEmployed => tally.add(
            2,
            "Self-employment/Business requires additional income verification.",
        ),
        Occupation::Retired | Occupation::Other => {
            tally.add(1, "Retired status may require pension proof.")
        }
    }

    tally.finish(StrategyKind::CreditCapacity, 8)
}

fn debt_load(context: &ScoringContext<'_>) -> StrategyOutcome {
    let profile = context.profile;
    let mut tally = Tally::default();

    let loan_count = profile.existing_loans.len();
    match loan_count {
        0 => tally.add(10, "No existing loans. Clean credit profile."),
        1..=2 => tally.add(7, format!("{loan_count} existing loan(s) is manageable.")),
        3 => {
            tally.add(
                4,
                format!("{loan_count} existing loans. Multiple debt obligations noted."),
            );
            tally.recommend("Consider consolidating existing loans.");
        }
        _ => {
            tally.add(
                1,
                format!("{loan_count} existing loans is a red flag. Too many debt obligations."),
            );
            tally.recommend("Clear some existing loans before applying for new credit.");
        }
    }

    let outstanding_ratio = profile.outstanding_total() / context.annual_income;
    if outstanding_ratio <= 0.5 {
        tally.add(10, "Outstanding debt is well within manageable limits.");
    } else if outstanding_ratio <= 1.0 {
        tally.add(6, "Outstanding debt is moderate relative to income.");
    } else if outstanding_ratio <= 2.0 {
        tally.add(3, "Outstanding debt is on the higher side.");
        tally.recommend("Focus on reducing outstanding debt.");
    } else {
        tally.add(0, "Outstanding debt significantly exceeds annual income.");
        tally.recommend("High existing debt load may affect loan approval.");
    }

    tally.finish(StrategyKind::DebtLoad, 10)
}

/// Accumulates sub-check points and text for the composite strategies.
#[derive(Default)]
struct Tally {
    score: u8,
    reasons: Vec<String>,
    recommendations: Vec<String>,
}

impl Tally {
    fn add(&mut self, points: u8, reason: impl Into<String>) {
        self.score += points;
        self.reasons.push(reason.into());
    }

    fn recommend(&mut self, recommendation: impl Into<String>) {
        self.recommendations.push(recommendation.into());
    }

    fn finish(self, kind: StrategyKind, pass_mark: u8) -> StrategyOutcome {
        let recommendation = if self.recommendations.is_empty() {
            None
        } else {
            Some(self.recommendations.join(" "))
        };

        StrategyOutcome {
            strategy: kind,
            score: self.score,
            max_score: kind.max_score(),
            passed: self.score >= pass_mark,
            reason: self.reasons.join(" "),
            recommendation,
        }
    }
}
