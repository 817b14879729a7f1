use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::amortization::PaymentFrequency;

/// Whether the requested loan is backed by collateral; anything but `secured` is unsecured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    Secured,
    #[default]
    Unsecured,
}

impl LoanType {
    pub fn parse_lenient(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("secured") {
            LoanType::Secured
        } else {
            LoanType::Unsecured
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LoanType::Secured => "secured",
            LoanType::Unsecured => "unsecured",
        }
    }

    /// Largest loan amount allowed, as a multiple of annual income.
    pub const fn max_income_multiple(self) -> u8 {
        match self {
            LoanType::Secured => 6,
            LoanType::Unsecured => 3,
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for LoanType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(LoanType::parse_lenient(&raw))
    }
}

/// Employment category; anything unrecognized on the wire becomes `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occupation {
    Salaried,
    SelfEmployed,
    Business,
    Retired,
    #[default]
    Other,
}

impl Occupation {
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "salaried" => Occupation::Salaried,
            "self-employed" => Occupation::SelfEmployed,
            "business" => Occupation::Business,
            "retired" => Occupation::Retired,
            _ => Occupation::Other,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Occupation::Salaried => "salaried",
            Occupation::SelfEmployed => "self-employed",
            Occupation::Business => "business",
            Occupation::Retired => "retired",
            Occupation::Other => "other",
        }
    }

    /// FOIR ceiling in percent of monthly income.
    pub const fn foir_ceiling(self) -> u8 {
        match self {
            Occupation::Salaried | Occupation::Other => 50,
            Occupation::SelfEmployed | Occupation::Business => 45,
            Occupation::Retired => 40,
        }
    }

    pub const fn minimum_experience_years(self) -> u8 {
        match self {
            Occupation::Salaried => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Occupation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Occupation::parse_lenient(&raw))
    }
}

/// A loan the applicant is already repaying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingLoan {
    #[serde(default)]
    pub loan_type: String,
    pub outstanding_amount: f64,
    pub emi: f64,
    #[serde(default, alias = "tenure", skip_serializing_if = "Option::is_none")]
    pub frequency: Option<PaymentFrequency>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Residential,
    Commercial,
    Land,
    Vehicle,
    Gold,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OwnershipStatus {
    SelfOwned,
    CoOwned,
    Parental,
}

/// Asset pledged against a secured loan. Only the estimated value is scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collateral {
    pub estimated_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownership_status: Option<OwnershipStatus>,
    #[serde(default)]
    pub property_address: String,
}

/// Financial snapshot of one applicant, as submitted by the calling application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantProfile {
    #[serde(default)]
    pub loan_type: LoanType,
    pub loan_amount: f64,
    #[serde(rename = "preferredTenure", alias = "preferredTenureMonths")]
    pub preferred_tenure_months: u32,
    pub monthly_income: f64,
    #[serde(default)]
    pub occupation: Occupation,
    #[serde(default)]
    pub years_of_experience: f64,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub existing_loans: Vec<ExistingLoan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collateral: Option<Collateral>,
    #[serde(
        rename = "expectedEMI",
        alias = "expectedEmi",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_emi: Option<f64>,
}

impl ApplicantProfile {
    pub fn annual_income(&self) -> f64 {
        self.monthly_income * 12.0
    }

    pub fn existing_emi_total(&self) -> f64 {
        self.existing_loans.iter().map(|loan| loan.emi).sum()
    }

    pub fn outstanding_total(&self) -> f64 {
        self.existing_loans
            .iter()
            .map(|loan| loan.outstanding_amount)
            .sum()
    }

    /// Whole years of age on `as_of`, counting a year as 365.25 days.
    pub fn age_on(&self, as_of: NaiveDate) -> i64 {
        let days = (as_of - self.date_of_birth).num_days() as f64;
        (days / 365.25).floor() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_occupation_deserializes_as_other() {
        let occupation: Occupation =
            serde_json::from_str("\"freelancer\"").expect("lenient occupation");
        assert_eq!(occupation, Occupation::Other);
        assert_eq!(occupation.foir_ceiling(), 50);

        let occupation: Occupation =
            serde_json::from_str("\"self-employed\"").expect("known occupation");
        assert_eq!(occupation, Occupation::SelfEmployed);
    }

    #[test]
    fn unrecognized_loan_type_is_treated_as_unsecured() {
        for raw in ["\"\"", "\"personal\"", "\"unsecured\""] {
            let loan_type: LoanType = serde_json::from_str(raw).expect("lenient loan type");
            assert_eq!(loan_type, LoanType::Unsecured, "{raw}");
            assert_eq!(loan_type.max_income_multiple(), 3);
        }

        let loan_type: LoanType = serde_json::from_str("\" Secured \"").expect("known loan type");
        assert_eq!(loan_type, LoanType::Secured);
    }

    #[test]
    fn missing_loan_type_and_occupation_fall_back_to_defaults() {
        let profile: ApplicantProfile = serde_json::from_value(serde_json::json!({
            "loanAmount": 100000,
            "preferredTenure": 12,
            "monthlyIncome": 40000,
            "dateOfBirth": "1990-03-01"
        }))
        .expect("profile parses");

        assert_eq!(profile.loan_type, LoanType::Unsecured);
        assert_eq!(profile.occupation, Occupation::Other);
    }

    #[test]
    fn age_counts_whole_years_of_365_25_days() {
        let profile: ApplicantProfile = serde_json::from_value(serde_json::json!({
            "loanType": "unsecured",
            "loanAmount": 100000,
            "preferredTenure": 12,
            "monthlyIncome": 40000,
            "occupation": "salaried",
            "yearsOfExperience": 2,
            "dateOfBirth": "2000-03-01"
        }))
        .expect("profile parses");

        // 9131 days separate the dates, just short of 25 * 365.25.
        let birthday = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
        let day_after = NaiveDate::from_ymd_opt(2025, 3, 2).expect("valid date");
        assert_eq!(profile.age_on(birthday), 24);
        assert_eq!(profile.age_on(day_after), 25);
    }

    #[test]
    fn parses_application_form_field_names() {
        let profile: ApplicantProfile = serde_json::from_value(serde_json::json!({
            "loanType": "secured",
            "loanAmount": 2500000,
            "preferredTenure": 120,
            "monthlyIncome": 90000,
            "occupation": "business",
            "yearsOfExperience": 8,
            "dateOfBirth": "1984-07-19",
            "existingLoans": [
                { "loanType": "car", "outstandingAmount": 300000, "emi": 12000, "tenure": "monthly" }
            ],
            "collateral": {
                "propertyType": "residential",
                "estimatedValue": 4000000,
                "ownershipStatus": "self-owned",
                "propertyAddress": "12 MG Road, Pune"
            },
            "expectedEMI": 35868
        }))
        .expect("profile parses");

        assert_eq!(profile.preferred_tenure_months, 120);
        assert_eq!(profile.expected_emi, Some(35_868.0));
        assert_eq!(profile.existing_emi_total(), 12_000.0);
        assert_eq!(
            profile.existing_loans[0].frequency,
            Some(PaymentFrequency::Monthly)
        );
        let collateral = profile.collateral.expect("collateral present");
        assert_eq!(collateral.property_type, Some(PropertyType::Residential));
        assert_eq!(collateral.ownership_status, Some(OwnershipStatus::SelfOwned));
    }
}
