use chrono::NaiveDate;

use super::domain::ApplicantProfile;

/// Input problems that abort an evaluation before any strategy runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EligibilityError {
    #[error("monthly income must be greater than zero (got {value})")]
    NonPositiveIncome { value: f64 },
    #[error("loan amount must be greater than zero (got {value})")]
    NonPositiveLoanAmount { value: f64 },
    #[error("preferred tenure must be at least one month")]
    MissingTenure,
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidAmount { field: String, value: f64 },
    #[error("date of birth {date_of_birth} is after the evaluation date {as_of}")]
    DateOfBirthInFuture {
        date_of_birth: NaiveDate,
        as_of: NaiveDate,
    },
}

pub(crate) fn validate(
    profile: &ApplicantProfile,
    as_of: NaiveDate,
) -> Result<(), EligibilityError> {
    let income = profile.monthly_income;
    ensure_finite("monthlyIncome", income)?;
    if income <= 0.0 {
        return Err(EligibilityError::NonPositiveIncome { value: income });
    }

    let amount = profile.loan_amount;
    ensure_finite("loanAmount", amount)?;
    if amount <= 0.0 {
        return Err(EligibilityError::NonPositiveLoanAmount { value: amount });
    }

    if profile.preferred_tenure_months == 0 {
        return Err(EligibilityError::MissingTenure);
    }

    ensure_non_negative("yearsOfExperience", profile.years_of_experience)?;
    if let Some(emi) = profile.expected_emi {
        ensure_non_negative("expectedEMI", emi)?;
    }

    for (index, loan) in profile.existing_loans.iter().enumerate() {
        ensure_non_negative(
            &format!("existingLoans[{index}].outstandingAmount"),
            loan.outstanding_amount,
        )?;
        ensure_non_negative(&format!("existingLoans[{index}].emi"), loan.emi)?;
    }

    if let Some(collateral) = &profile.collateral {
        ensure_non_negative("collateral.estimatedValue", collateral.estimated_value)?;
    }

    if profile.date_of_birth > as_of {
        return Err(EligibilityError::DateOfBirthInFuture {
            date_of_birth: profile.date_of_birth,
            as_of,
        });
    }

    Ok(())
}

fn ensure_finite(field: &str, value: f64) -> Result<(), EligibilityError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EligibilityError::InvalidAmount {
            field: field.to_string(),
            value,
        })
    }
}

fn ensure_non_negative(field: &str, value: f64) -> Result<(), EligibilityError> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(EligibilityError::InvalidAmount {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
