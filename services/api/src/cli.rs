use crate::demo::{run_demo, run_emi, run_evaluate, DemoArgs, EmiArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_eligibility::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Eligibility Engine",
    about = "Compute EMIs and score loan applications from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute the installment and payment totals for a loan
    Emi(EmiArgs),
    /// Score an applicant profile read from a JSON file
    Evaluate(EvaluateArgs),
    /// Score a few sample applicants end to end
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Emi(args) => run_emi(args),
        Command::Evaluate(args) => run_evaluate(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_eligibility::PaymentFrequency;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["loan-eligibility-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_emi_arguments() {
        let cli = Cli::try_parse_from([
            "loan-eligibility-api",
            "emi",
            "--principal",
            "1000000",
            "--tenure-years",
            "5",
            "--frequency",
            "half-yearly",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Emi(args)) => {
                assert_eq!(args.principal, 1_000_000.0);
                assert_eq!(args.rate, 12.0);
                assert_eq!(args.frequency, PaymentFrequency::HalfYearly);
            }
            other => panic!("expected emi command, got {other:?}"),
        }
    }

    #[test]
    fn evaluate_rejects_a_negative_rate_override() {
        let result = Cli::try_parse_from([
            "loan-eligibility-api",
            "evaluate",
            "--input",
            "applicant.json",
            "--rate=-5",
        ]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "loan-eligibility-api",
            "evaluate",
            "--input",
            "applicant.json",
            "--rate",
            "9.5",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Evaluate(args)) => assert_eq!(args.rate, Some(9.5)),
            other => panic!("expected evaluate command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_frequency_on_the_command_line() {
        let result = Cli::try_parse_from([
            "loan-eligibility-api",
            "emi",
            "--principal",
            "1000",
            "--tenure-years",
            "1",
            "--frequency",
            "weekly",
        ]);
        assert!(result.is_err());
    }
}
