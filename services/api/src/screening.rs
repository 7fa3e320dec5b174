use crate::infra::parse_date;
use chrono::{Local, NaiveDate};
use clap::Args;
use internlink::config::AppConfig;
use internlink::error::AppError;
use internlink::workflows::eligibility::{
    screen_roster_file, CandidateProfile, EligibilityEvaluator, RosterReport,
};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// JSON file holding one candidate profile (camelCase keys)
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct RosterArgs {
    /// CSV roster with one candidate per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let CheckArgs { profile, today } = args;
    let evaluator = configured_evaluator()?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let raw = fs::read_to_string(&profile)?;
    let candidate: CandidateProfile = serde_json::from_str(&raw)?;
    let status = evaluator.evaluate(&candidate, today);

    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

pub(crate) fn run_roster(args: RosterArgs) -> Result<(), AppError> {
    let RosterArgs { csv, today } = args;
    let evaluator = configured_evaluator()?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let report = screen_roster_file(&csv, &evaluator, today)?;
    println!("Roster screening as of {}", today.format("%Y-%m-%d"));
    for line in render_roster(&report) {
        println!("{line}");
    }
    Ok(())
}

fn configured_evaluator() -> Result<EligibilityEvaluator, AppError> {
    let config = AppConfig::load()?;
    Ok(EligibilityEvaluator::new(config.eligibility))
}

fn render_roster(report: &RosterReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .screenings
        .iter()
        .map(|screening| {
            format!(
                "{:>4}  {:<28} {}",
                screening.row,
                screening.name,
                screening.status.summary()
            )
        })
        .collect();

    lines.push(format!(
        "Totals: {} eligible, {} not eligible, {} pending, {} partial",
        report.eligible, report.not_eligible, report.pending, report.partial
    ));
    lines
}
