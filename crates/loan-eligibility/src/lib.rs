//! Loan eligibility engine: an EMI amortization calculator and a five-strategy
//! scorer that turns an applicant's financial profile into a verdict with
//! reasons and recommendations.

pub mod amortization;
pub mod config;
pub mod currency;
pub mod eligibility;
pub mod error;
pub mod telemetry;

pub use amortization::{
    compute_installment, AmortizationRequest, AmortizationResult, PaymentFrequency,
};
pub use eligibility::{
    ApplicantProfile, EligibilityConfig, EligibilityEngine, EligibilityError, EligibilityResult,
    EligibilityStatus,
};
