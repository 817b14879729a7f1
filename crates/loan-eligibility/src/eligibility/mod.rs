//! Five-strategy loan eligibility scoring.
//!
//! Each strategy scores one aspect of the applicant's finances against a fixed
//! maximum; the scores are summed into a percentage that decides the verdict.
//! Reasons and recommendations are always reported in [`StrategyKind::ORDERED`]
//! order, followed by the collateral note for secured loans.

mod config;
pub mod domain;
mod policy;
mod strategies;
mod validation;

#[cfg(test)]
mod tests;

pub use config::{EligibilityConfig, DEFAULT_ANNUAL_RATE};
pub use domain::{
    ApplicantProfile, Collateral, ExistingLoan, LoanType, Occupation, OwnershipStatus,
    PropertyType,
};
pub use policy::{CollateralCoverage, EligibilityStatus, APPROVAL_THRESHOLD};
pub use strategies::StrategyKind;
pub use validation::EligibilityError;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use strategies::ScoringContext;

/// Stateless scorer; one instance can serve any number of concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    /// Score `profile`, computing age as of `as_of`.
    pub fn evaluate(
        &self,
        profile: &ApplicantProfile,
        as_of: NaiveDate,
    ) -> Result<EligibilityResult, EligibilityError> {
        if let Err(err) = validation::validate(profile, as_of) {
            warn!(error = %err, "rejected applicant profile");
            return Err(err);
        }

        let context = ScoringContext::new(profile, &self.config, as_of);
        let breakdown: Vec<StrategyOutcome> = StrategyKind::ORDERED
            .into_iter()
            .map(|kind| kind.assess(&context))
            .collect();

        for outcome in &breakdown {
            debug!(
                strategy = outcome.strategy.label(),
                score = outcome.score,
                max_score = outcome.max_score,
                passed = outcome.passed,
                "strategy assessed"
            );
        }

        let score = policy::aggregate_percentage(&breakdown);
        let status = EligibilityStatus::from_percentage(score);

        let mut reasons: Vec<String> = breakdown.iter().map(|o| o.reason.clone()).collect();
        let mut recommendations: Vec<String> = breakdown
            .iter()
            .filter_map(|o| o.recommendation.clone())
            .collect();

        let collateral = policy::collateral_coverage(profile);
        if let Some(coverage) = collateral {
            reasons.push(coverage.reason().to_string());
            if let Some(recommendation) = coverage.recommendation() {
                recommendations.push(recommendation.to_string());
            }
        }

        info!(
            score,
            status = status.key(),
            proposed_emi = context.proposed_emi,
            "eligibility evaluated"
        );

        Ok(EligibilityResult {
            score,
            status,
            reasons,
            recommendations,
            collateral,
            breakdown,
        })
    }

    /// Score `profile` as of the local calendar date.
    pub fn evaluate_today(
        &self,
        profile: &ApplicantProfile,
    ) -> Result<EligibilityResult, EligibilityError> {
        self.evaluate(profile, Local::now().date_naive())
    }

    /// Installment used for the debt ratios: the stated EMI, or one derived at the default rate.
    pub fn proposed_emi(&self, profile: &ApplicantProfile) -> f64 {
        strategies::proposed_emi(profile, &self.config)
    }
}

/// Score one strategy contributed, with the text explaining it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyOutcome {
    pub strategy: StrategyKind,
    pub score: u8,
    pub max_score: u8,
    pub passed: bool,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl StrategyOutcome {
    pub(crate) fn passed(kind: StrategyKind, score: u8, reason: String) -> Self {
        Self::new(kind, score, true, reason)
    }

    pub(crate) fn failed(kind: StrategyKind, score: u8, reason: String) -> Self {
        Self::new(kind, score, false, reason)
    }

    fn new(kind: StrategyKind, score: u8, passed: bool, reason: String) -> Self {
        Self {
            strategy: kind,
            score,
            max_score: kind.max_score(),
            passed,
            reason,
            recommendation: None,
        }
    }

    pub(crate) fn recommending(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }
}

/// Verdict, explanation and per-strategy audit trail for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub score: u8,
    pub status: EligibilityStatus,
    pub reasons: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collateral: Option<CollateralCoverage>,
    pub breakdown: Vec<StrategyOutcome>,
}
