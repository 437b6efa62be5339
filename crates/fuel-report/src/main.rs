//! Fuel Statistics Report - Main Entry Point

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use fuel_record::VehicleSelector;
use fuel_report::{init_logging, render, run, JsonFileSource, Query, ReportConfig};
use fuel_stats::UnitSystem;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "fuel-report", version)]
#[command(about = "Fuel consumption and cost statistics from a JSON fill-up export")]
struct Cli {
    /// Config file (TOML). Defaults to `fuel-report.toml` when present.
    #[arg(long, env = "FUEL_REPORT_CONFIG")]
    config: Option<PathBuf>,

    /// JSON array of fill-ups
    #[arg(long)]
    fill_ups: Option<PathBuf>,

    /// JSON array of vehicles (`id`, `displayName`)
    #[arg(long)]
    vehicles: Option<PathBuf>,

    /// Vehicle id, or `all`. Checked against `--vehicles` when given,
    /// otherwise against the vehicles found in the fill-ups.
    #[arg(long, default_value = "all")]
    vehicle: VehicleSelector,

    /// First day of the window (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day of the window (YYYY-MM-DD), defaults to today
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Window length in days when no start is given
    #[arg(long, conflicts_with = "start")]
    days: Option<u32>,

    /// Year to date, ending at `--end` or today
    #[arg(long, conflicts_with_all = ["start", "days", "year"])]
    ytd: bool,

    /// A whole calendar year
    #[arg(long, value_name = "YYYY", conflicts_with_all = ["start", "end", "days"])]
    year: Option<i32>,

    #[arg(long)]
    brand: Option<String>,

    #[arg(long)]
    grade: Option<String>,

    #[arg(long)]
    station: Option<String>,

    /// `metric` or `imperial`
    #[arg(long)]
    units: Option<UnitSystem>,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,

    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ReportConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if cli.fill_ups.is_some() {
        config.fill_ups = cli.fill_ups;
    }
    if cli.vehicles.is_some() {
        config.vehicles = cli.vehicles;
    }
    if let Some(units) = cli.units {
        config.units = units;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    config.pretty |= cli.pretty;

    init_logging(&config.log_level)?;
    info!("=== Fuel Report v{} ===", env!("CARGO_PKG_VERSION"));

    let path = config
        .fill_ups
        .clone()
        .ok_or(fuel_report::ReportError::MissingInput)?;
    let source = JsonFileSource::new(path);
    let query = Query {
        vehicle: cli.vehicle,
        start: cli.start,
        end: cli.end,
        days: cli.days,
        year_to_date: cli.ytd,
        year: cli.year,
        brand: cli.brand,
        grade: cli.grade,
        station: cli.station,
    };

    let today = Local::now().date_naive();
    let report = run(&config, &source, &query, today)
        .with_context(|| format!("building report from {}", source.path().display()))?;
    println!("{}", render(&report, config.pretty)?);

    Ok(())
}
