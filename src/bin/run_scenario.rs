//! Project a single compound-interest scenario from the command line
//!
//! Parameters come from flags or a JSON file (`--scenario`). Passing
//! `--start-date` (with `--rate-basis`) switches to the calendar-date
//! engine; otherwise the period-index engine runs. Prints the summary
//! table, optionally the full breakdown, and can export it to CSV.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use compound_interest::projection::{CalendarEngine, PeriodEngine, Projection};
use compound_interest::report;
use compound_interest::ScenarioParams;

#[derive(Parser, Debug)]
#[command(
    name = "run_scenario",
    about = "Project compound-interest growth with contributions and tax"
)]
struct Args {
    /// JSON file with scenario parameters (takes precedence over flags)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Initial investment amount
    #[arg(long, default_value_t = 10_000.0)]
    initial: f64,

    /// Annual interest rate as a decimal (nominal per --rate-basis for
    /// calendar runs)
    #[arg(long, default_value_t = 0.05)]
    rate: f64,

    /// Investment duration in years
    #[arg(long, default_value_t = 10.0)]
    years: f64,

    /// Compounding frequency (annually, semiannually, quarterly, monthly,
    /// biweekly, weekly, daily)
    #[arg(long)]
    compounding: Option<String>,

    /// Contribution amount per contribution event
    #[arg(long, default_value_t = 0.0)]
    contribution: f64,

    /// Contribution frequency (defaults to the compounding frequency)
    #[arg(long)]
    contribution_frequency: Option<String>,

    /// Contribution timing: start or end of period
    #[arg(long, default_value = "end")]
    timing: String,

    /// Tax rate applied to interest, as a decimal
    #[arg(long, default_value_t = 0.0)]
    tax_rate: f64,

    /// Anchor the projection to a calendar start date (switches engines)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Rate basis tag for calendar runs: p.a., p.s., p.q., p.m., p.biw.,
    /// p.w., p.d.
    #[arg(long)]
    rate_basis: Option<String>,

    /// Report the future value deflated by this annual inflation rate
    #[arg(long)]
    inflation: Option<f64>,

    /// Print the full per-period breakdown table
    #[arg(long)]
    breakdown: bool,

    /// Export the breakdown to this CSV file (bare filename)
    #[arg(long)]
    output: Option<String>,
}

fn params_from_flags(args: &Args) -> ScenarioParams {
    ScenarioParams {
        initial_value: args.initial,
        annual_rate: args.rate,
        duration_years: args.years,
        compounding: args.compounding.clone(),
        contribution: args.contribution,
        contribution_frequency: args.contribution_frequency.clone(),
        contribution_timing: args.timing.clone(),
        tax_rate: args.tax_rate,
        start_date: args.start_date,
        rate_basis: args.rate_basis.clone(),
    }
}

fn print_breakdown(projection: &Projection) {
    println!(
        "{:<8} {:>12} {:>14} {:>14} {:>14} {:>14} {:>12} {:>14}",
        "label",
        "period",
        "start_balance",
        "contribution",
        "gross_interest",
        "net_interest",
        "tax_paid",
        "end_balance"
    );
    for r in projection.records() {
        println!(
            "{:<8} {:>12} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>12.2} {:>14.2}",
            r.moment.label(),
            r.moment.value(),
            r.starting_balance,
            r.contribution,
            r.gross_interest,
            r.net_interest,
            r.tax_paid,
            r.ending_balance
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let params = match &args.scenario {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read scenario file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse scenario file {}", path.display()))?
        }
        None => {
            let mut params = params_from_flags(&args);
            if params.compounding.is_none() && !params.is_calendar() {
                params.compounding = Some("annually".to_string());
            }
            params
        }
    };

    let start = Instant::now();
    let (projection, summary) = if params.is_calendar() {
        let scenario = params.validate_calendar()?;
        log::info!(
            "calendar projection: {} -> {}, compounding {}",
            scenario.start_date(),
            scenario.end_date(),
            scenario.compounding()
        );
        let projection = CalendarEngine::new(&scenario).run();
        let summary = report::render_calendar_summary(&scenario, &projection.totals());
        (projection, summary)
    } else {
        let scenario = params.validate()?;
        log::info!(
            "period projection: {} years, compounding {}",
            scenario.duration_years(),
            scenario.compounding()
        );
        let projection = PeriodEngine::new(&scenario).run();
        let summary = report::render_summary(&scenario, &projection.totals());
        (projection, summary)
    };
    log::info!(
        "projected {} records in {:?}",
        projection.records().len(),
        start.elapsed()
    );

    println!("{summary}");

    if let Some(inflation) = args.inflation {
        let adjusted = projection.future_value_deflated(inflation)?;
        println!("Future Value (inflation-adjusted): {adjusted:.2}");
    }

    if args.breakdown {
        println!();
        print_breakdown(&projection);
    }

    if let Some(filename) = &args.output {
        report::export_csv(projection.records(), filename)?;
        println!("Breakdown written to {filename}");
    }

    Ok(())
}
