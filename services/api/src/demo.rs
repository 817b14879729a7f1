use crate::infra::{sample_business_applicant, sample_salaried_applicant};
use chrono::{Local, NaiveDate};
use clap::Args;
use loan_eligibility::config::AppConfig;
use loan_eligibility::currency::{format_indian_number, format_inr};
use loan_eligibility::error::AppError;
use loan_eligibility::{
    compute_installment, AmortizationResult, ApplicantProfile, EligibilityEngine,
    EligibilityResult, PaymentFrequency,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EmiArgs {
    /// Loan principal
    #[arg(long)]
    pub(crate) principal: f64,
    /// Annual interest rate in percent
    #[arg(long, default_value_t = 12.0)]
    pub(crate) rate: f64,
    /// Loan tenure in years (fractions allowed)
    #[arg(long)]
    pub(crate) tenure_years: f64,
    /// Repayment frequency: monthly, quarterly, half-yearly or yearly
    #[arg(long, default_value_t = PaymentFrequency::Monthly)]
    pub(crate) frequency: PaymentFrequency,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file holding one applicant profile
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Date used to compute the applicant's age (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Override the default annual rate used when no expected EMI is given
    #[arg(long, value_parser = crate::infra::parse_rate)]
    pub(crate) rate: Option<f64>,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date used to compute applicant ages (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) fn run_emi(args: EmiArgs) -> Result<(), AppError> {
    let EmiArgs {
        principal,
        rate,
        tenure_years,
        frequency,
        json,
    } = args;

    let result = compute_installment(principal, rate, tenure_years, frequency);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render_installment(&result, frequency);
    }

    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        input,
        as_of,
        rate,
        json,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(rate) = rate {
        config.eligibility.default_annual_rate = rate;
    }

    let raw = std::fs::read_to_string(&input)?;
    let profile: ApplicantProfile = serde_json::from_str(&raw)?;
    let engine = EligibilityEngine::new(config.eligibility);
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let result = engine.evaluate(&profile, as_of)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render_eligibility(&engine, &profile, &result);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let engine = EligibilityEngine::default();

    println!("Loan eligibility demo (as of {as_of})");

    println!("\nInstallment for ₹10,00,000 at 12% over 5 years");
    for frequency in PaymentFrequency::ALL {
        let result = compute_installment(1_000_000.0, 12.0, 5.0, frequency);
        println!(
            "- {:<11} {} x {}",
            frequency.label(),
            format_inr(result.installment_amount),
            result.total_payments
        );
    }

    let applicants = [
        ("Salaried professional", sample_salaried_applicant()),
        ("Business owner", sample_business_applicant()),
    ];
    for (title, profile) in applicants {
        let Some(profile) = profile else {
            continue;
        };
        println!("\n{title}");
        let result = engine.evaluate(&profile, as_of)?;
        render_eligibility(&engine, &profile, &result);
    }

    Ok(())
}

fn render_installment(result: &AmortizationResult, frequency: PaymentFrequency) {
    if result.is_degenerate() {
        println!("No installment: principal, rate and tenure must all be positive.");
        return;
    }

    println!(
        "{} installment: {} ({})",
        frequency.label(),
        format_inr(result.installment_amount),
        format_indian_number(result.installment_amount)
    );
    println!(
        "- {} payments ({} per year)",
        result.total_payments, result.payments_per_year
    );
    println!("- Total payment: {}", format_inr(result.total_payment));
    println!("- Total interest: {}", format_inr(result.total_interest));
}

fn render_eligibility(
    engine: &EligibilityEngine,
    profile: &ApplicantProfile,
    result: &EligibilityResult,
) {
    println!(
        "- {} {} loan of {} over {} months | income {} per month | EMI considered {}",
        profile.occupation.label(),
        profile.loan_type.label(),
        format_inr(profile.loan_amount),
        profile.preferred_tenure_months,
        format_inr(profile.monthly_income),
        format_inr(engine.proposed_emi(profile))
    );
    println!("- Score {}% | {}", result.score, result.status.label());

    println!("Breakdown:");
    for outcome in &result.breakdown {
        let mark = if outcome.passed { "pass" } else { "fail" };
        println!(
            "  - {:<27} {:>2}/{:<2} {mark}",
            outcome.strategy.label(),
            outcome.score,
            outcome.max_score
        );
    }

    println!("Reasons:");
    for reason in &result.reasons {
        println!("  - {reason}");
    }

    if result.recommendations.is_empty() {
        println!("Recommendations: none");
    } else {
        println!("Recommendations:");
        for recommendation in &result.recommendations {
            println!("  - {recommendation}");
        }
    }
}
