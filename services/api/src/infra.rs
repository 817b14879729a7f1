use chrono::NaiveDate;
use loan_eligibility::eligibility::{Collateral, ExistingLoan, LoanType, Occupation};
use loan_eligibility::{ApplicantProfile, PaymentFrequency};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_rate(raw: &str) -> Result<f64, String> {
    loan_eligibility::config::parse_annual_rate(raw)
        .map_err(|_| format!("'{raw}' is not a finite, non-negative percentage"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Salaried applicant with a modest personal loan request.
pub(crate) fn sample_salaried_applicant() -> Option<ApplicantProfile> {
    Some(ApplicantProfile {
        loan_type: LoanType::Unsecured,
        loan_amount: 300_000.0,
        preferred_tenure_months: 36,
        monthly_income: 65_000.0,
        occupation: Occupation::Salaried,
        years_of_experience: 6.0,
        date_of_birth: date(1991, 8, 14)?,
        existing_loans: vec![ExistingLoan {
            loan_type: "two-wheeler".to_string(),
            outstanding_amount: 40_000.0,
            emi: 3_500.0,
            frequency: Some(PaymentFrequency::Monthly),
        }],
        collateral: None,
        expected_emi: None,
    })
}

/// Business owner pledging a shop against a large secured loan.
pub(crate) fn sample_business_applicant() -> Option<ApplicantProfile> {
    Some(ApplicantProfile {
        loan_type: LoanType::Secured,
        loan_amount: 3_500_000.0,
        preferred_tenure_months: 120,
        monthly_income: 80_000.0,
        occupation: Occupation::Business,
        years_of_experience: 3.0,
        date_of_birth: date(1968, 2, 3)?,
        existing_loans: vec![
            ExistingLoan {
                loan_type: "car".to_string(),
                outstanding_amount: 600_000.0,
                emi: 15_000.0,
                frequency: Some(PaymentFrequency::Monthly),
            },
            ExistingLoan {
                loan_type: "gold".to_string(),
                outstanding_amount: 250_000.0,
                emi: 9_000.0,
                frequency: Some(PaymentFrequency::Quarterly),
            },
        ],
        collateral: Some(Collateral {
            estimated_value: 3_000_000.0,
            property_type: None,
            ownership_status: None,
            property_address: "Shop 9, Station Road, Indore".to_string(),
        }),
        expected_emi: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date(" 2025-06-15 "),
            Ok(NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date"))
        );
        assert!(parse_date("15/06/2025").is_err());
    }

    #[test]
    fn parse_rate_rejects_negative_and_non_finite_values() {
        assert_eq!(parse_rate("10.5"), Ok(10.5));
        assert_eq!(parse_rate("0"), Ok(0.0));
        assert!(parse_rate("-3").is_err());
        assert!(parse_rate("NaN").is_err());
        assert!(parse_rate("inf").is_err());
    }

    #[test]
    fn sample_applicants_are_well_formed() {
        assert!(sample_salaried_applicant().is_some());
        assert!(sample_business_applicant().is_some());
    }
}
