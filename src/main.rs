//! Loan Affordability CLI
//!
//! Command-line interface for quoting loan requests, gating batches and
//! previewing the backend's risk score

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use loan_affordability::application::{load_applications, GateOutcome};
use loan_affordability::risk::{
    AffiliateProfile, AffiliateStatus, EligibilityChecker, RiskEvaluationRequest, RiskEvaluator,
};
use loan_affordability::runner::QuoteRunner;
use loan_affordability::{AffordabilityRules, ApplicationStatus, LoanQuoteInput, QuoteEngine};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Affordability rules CSV (name,value); defaults to 40% warning / 50% ceiling
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Quote a single loan request
    Quote {
        /// Requested amount
        #[arg(long)]
        amount: f64,
        /// Interest rate as a percentage figure (12.5 = 12.5)
        #[arg(long)]
        rate: f64,
        /// Term in months
        #[arg(long)]
        term: u32,
        /// Monthly income
        #[arg(long)]
        income: f64,
        /// Existing monthly debt
        #[arg(long, default_value_t = 0.0)]
        debt: f64,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a CSV of applications through the submission gate
    Batch {
        /// Input applications CSV
        input: PathBuf,
        /// Output CSV (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Preview the backend's credit risk evaluation
    Evaluate {
        /// Applicant document number
        #[arg(long)]
        document: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        term: u32,
        #[arg(long)]
        income: Decimal,
        #[arg(long, default_value = "0")]
        debt: Decimal,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Preview the backend's registration rules for a request
    Eligibility {
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        term: u32,
        /// Affiliate's monthly salary
        #[arg(long)]
        salary: Decimal,
        /// Affiliation date (YYYY-MM-DD)
        #[arg(long)]
        affiliated_since: NaiveDate,
        /// Affiliate is no longer active
        #[arg(long)]
        inactive: bool,
        /// Affiliate already has a pending application
        #[arg(long)]
        pending: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let rules = load_rules(cli.rules.as_deref())?;

    match cli.command {
        Command::Quote { amount, rate, term, income, debt, json } => {
            run_quote(rules, LoanQuoteInput::new(amount, rate, term, income, debt), json)
        }
        Command::Batch { input, output } => run_batch(rules, &input, output.as_deref()),
        Command::Evaluate { document, amount, term, income, debt, json } => {
            let request = RiskEvaluationRequest {
                document_number: document,
                requested_amount: amount,
                term_months: term,
                monthly_income: income,
                current_debt: debt,
            };
            run_evaluate(&request, json)
        }
        Command::Eligibility { amount, term, salary, affiliated_since, inactive, pending } => {
            let mut affiliate = AffiliateProfile::new(salary, affiliated_since);
            if inactive {
                affiliate.status = AffiliateStatus::Inactive;
            }
            run_eligibility(&affiliate, amount, term, pending);
            Ok(())
        }
    }
}

fn load_rules(path: Option<&Path>) -> Result<AffordabilityRules> {
    match path {
        Some(path) => AffordabilityRules::from_csv_path(path)
            .with_context(|| format!("failed to load rules from {}", path.display())),
        None => Ok(AffordabilityRules::default()),
    }
}

fn run_quote(rules: AffordabilityRules, input: LoanQuoteInput, json: bool) -> Result<()> {
    let engine = QuoteEngine::new(rules);
    let result = engine.quote(&input).context("invalid loan request")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Loan Quote");
    println!("==========");
    println!("  Requested amount: {:>16.2}", input.principal);
    println!("  Term (months):    {:>16}", input.term_months);
    println!("  Rate (%):         {:>16}", input.annual_rate_percent);
    println!();
    println!("  Monthly payment:  {:>16.2}", result.monthly_payment);
    println!("  Total payment:    {:>16.2}", result.total_payment);
    println!("  Total interest:   {:>16.2}", result.total_interest(input.principal));
    println!("  Debt/income (%):  {:>16.2}", result.debt_to_income_ratio_percent);
    println!("  Decision:         {:>16}", result.decision);

    if !result.decision.allows_submission() {
        println!(
            "\nSubmission blocked: the maximum debt-to-income ratio is {}%",
            rules.max_ratio_percent
        );
    }

    Ok(())
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchRow {
    affiliate_id: Option<u64>,
    requested_amount: f64,
    term_months: u32,
    monthly_payment: Option<f64>,
    total_payment: Option<f64>,
    debt_ratio_percent: Option<f64>,
    decision: Option<String>,
    outcome: &'static str,
    error: Option<String>,
}

fn run_batch(rules: AffordabilityRules, input: &Path, output: Option<&Path>) -> Result<()> {
    let applications = load_applications(input)
        .with_context(|| format!("failed to load applications from {}", input.display()))?;

    let runner = QuoteRunner::new(rules);
    let outcomes = runner.gate_batch(&applications);

    let sink: Box<dyn io::Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("unable to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = csv::Writer::from_writer(sink);

    let mut ready = 0;
    let mut blocked = 0;
    let mut invalid = 0;

    for (app, outcome) in applications.iter().zip(&outcomes) {
        let mut row = BatchRow {
            affiliate_id: app.affiliate_id,
            requested_amount: app.requested_amount,
            term_months: app.term_months,
            monthly_payment: None,
            total_payment: None,
            debt_ratio_percent: None,
            decision: None,
            outcome: "INVALID",
            error: None,
        };

        match outcome {
            Ok(outcome) => {
                let quote = outcome.quote();
                row.monthly_payment = Some(quote.monthly_payment);
                row.total_payment = Some(quote.total_payment);
                row.debt_ratio_percent = Some(quote.debt_to_income_ratio_percent);
                row.decision = Some(quote.decision.to_string());
                if let GateOutcome::Ready { .. } = outcome {
                    row.outcome = "READY";
                    ready += 1;
                } else {
                    row.outcome = "BLOCKED";
                    blocked += 1;
                }
            }
            Err(e) => {
                row.error = Some(e.to_string());
                invalid += 1;
            }
        }

        writer.serialize(&row)?;
    }
    writer.flush()?;

    eprintln!(
        "\nBatch summary: {} applications, {} ready, {} blocked, {} invalid",
        applications.len(),
        ready,
        blocked,
        invalid
    );

    Ok(())
}

fn run_evaluate(request: &RiskEvaluationRequest, json: bool) -> Result<()> {
    let evaluation = RiskEvaluator::new()
        .evaluate(request)
        .context("invalid risk evaluation request")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
        return Ok(());
    }

    println!("Risk Evaluation");
    println!("===============");
    println!("  Document:        {}", evaluation.document_number);
    println!("  Score:           {}", evaluation.score);
    println!("  Risk level:      {}", evaluation.risk_level);
    println!("  Recommendation:  {}", evaluation.recommendation);
    println!("  Resulting status: {}", ApplicationStatus::from_score(evaluation.score));
    println!("  Factors:");
    for factor in &evaluation.risk_factors {
        println!("    - {}", factor);
    }

    Ok(())
}

fn run_eligibility(affiliate: &AffiliateProfile, amount: Decimal, term: u32, pending: bool) {
    let result = EligibilityChecker::new().check_now(affiliate, amount, term, pending);

    println!("Registration Eligibility");
    println!("========================");
    println!("  Requested amount: {}", amount);
    println!("  Term (months):    {}", term);
    match affiliate.max_credit_amount() {
        Some(limit) => println!("  Salary limit:     {}", limit),
        None => println!("  Salary limit:     unbounded"),
    }
    match result {
        Ok(()) => println!("  Result:           ELIGIBLE"),
        Err(e) => println!("  Result:           {} ({})", e.code(), e),
    }
}
