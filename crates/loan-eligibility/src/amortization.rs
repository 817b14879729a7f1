//! Equated-installment (EMI) amortization calculator.
//!
//! `EMI = P × r × (1 + r)^n / ((1 + r)^n − 1)` where `r` is the rate per
//! payment period and `n` the number of payments over the tenure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::currency::round_to_cents;

/// How often installments fall due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Quarterly,
    HalfYearly,
    Yearly,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 4] = [
        PaymentFrequency::Monthly,
        PaymentFrequency::Quarterly,
        PaymentFrequency::HalfYearly,
        PaymentFrequency::Yearly,
    ];

    pub const fn payments_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::HalfYearly => 2,
            PaymentFrequency::Yearly => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "Monthly",
            PaymentFrequency::Quarterly => "Quarterly",
            PaymentFrequency::HalfYearly => "Half-Yearly",
            PaymentFrequency::Yearly => "Yearly",
        }
    }

    const fn key(self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::HalfYearly => "half-yearly",
            PaymentFrequency::Yearly => "yearly",
        }
    }

    /// Parse a frequency, falling back to monthly for anything unrecognized.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized payment frequency '{0}' (expected monthly, quarterly, half-yearly or yearly)")]
pub struct UnknownFrequency(pub String);

impl FromStr for PaymentFrequency {
    type Err = UnknownFrequency;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
        PaymentFrequency::ALL
            .into_iter()
            .find(|frequency| frequency.key() == normalized)
            .ok_or_else(|| UnknownFrequency(raw.to_string()))
    }
}

impl<'de> Deserialize<'de> for PaymentFrequency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(PaymentFrequency::parse_lenient(&raw))
    }
}

/// Inputs to a single installment computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRequest {
    pub principal: f64,
    #[serde(rename = "annualRate", alias = "annualRatePercent")]
    pub annual_rate_percent: f64,
    pub tenure_years: f64,
    #[serde(default)]
    pub frequency: PaymentFrequency,
}

impl AmortizationRequest {
    pub fn compute(&self) -> AmortizationResult {
        compute_installment(
            self.principal,
            self.annual_rate_percent,
            self.tenure_years,
            self.frequency,
        )
    }
}

/// Installment and payment totals; currency fields are rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationResult {
    pub installment_amount: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub payments_per_year: u32,
    pub total_payments: u32,
}

impl AmortizationResult {
    /// Zeroed result returned for incomplete or out-of-range inputs.
    pub const fn degenerate(frequency: PaymentFrequency) -> Self {
        Self {
            installment_amount: 0.0,
            total_payment: 0.0,
            total_interest: 0.0,
            payments_per_year: frequency.payments_per_year(),
            total_payments: 0,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.total_payments == 0
    }
}

/// Compute the periodic installment that amortizes `principal` over the tenure.
///
/// Non-positive principal or tenure and negative rates are not errors: they
/// yield [`AmortizationResult::degenerate`] so partially filled forms can still
/// be scored.
pub fn compute_installment(
    principal: f64,
    annual_rate_percent: f64,
    tenure_years: f64,
    frequency: PaymentFrequency,
) -> AmortizationResult {
    let all_finite =
        principal.is_finite() && annual_rate_percent.is_finite() && tenure_years.is_finite();
    if !all_finite || principal <= 0.0 || annual_rate_percent < 0.0 || tenure_years <= 0.0 {
        return AmortizationResult::degenerate(frequency);
    }

    let payments_per_year = frequency.payments_per_year();
    let periods_per_year = f64::from(payments_per_year);
    let rate_per_period = annual_rate_percent / 100.0 / periods_per_year;
    let periods = (tenure_years * periods_per_year).round();
    if periods < 1.0 || periods > f64::from(u32::MAX) {
        return AmortizationResult::degenerate(frequency);
    }
    let total_payments = periods as u32;

    if rate_per_period == 0.0 {
        return AmortizationResult {
            installment_amount: round_to_cents(principal / periods),
            total_payment: round_to_cents(principal),
            total_interest: 0.0,
            payments_per_year,
            total_payments,
        };
    }

    let growth = (1.0 + rate_per_period).powf(periods);
    let installment = if growth.is_infinite() {
        principal * rate_per_period
    } else {
        principal * rate_per_period * growth / (growth - 1.0)
    };
    let total_payment = installment * periods;
    let total_interest = total_payment - principal;

    AmortizationResult {
        installment_amount: round_to_cents(installment),
        total_payment: round_to_cents(total_payment),
        total_interest: round_to_cents(total_interest),
        payments_per_year,
        total_payments,
    }
}
