//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvEventAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{parse_date, read_rate, validate_engine_config, RateSetting};
use crate::domain::engine::{self, ComputationResult};
use crate::domain::error::AccrualError;
use crate::domain::event::ContributionEvent;
use crate::domain::grouping::group_by_investor;
use crate::domain::params::EngineParams;
use crate::ports::config_port::ConfigPort;
use crate::ports::event_port::EventPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "accrual", about = "Investor contribution ledger and interest compounding")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build ledgers, time series and portfolio statistics
    Compute {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        events: Option<PathBuf>,
        /// Evaluation date (YYYY-MM-DD), overrides [engine] as_of
        #[arg(long)]
        as_of: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate configuration and events without computing
    Validate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        events: Option<PathBuf>,
    },
    /// List investors found in an events file
    Investors {
        #[arg(short, long)]
        events: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Compute {
            config,
            events,
            as_of,
            output,
        } => run_compute(&config, events.as_ref(), as_of.as_deref(), output.as_ref()),
        Command::Validate { config, events } => run_validate(&config, events.as_ref()),
        Command::Investors { events } => run_investors(&events),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Build engine parameters from `[engine]`, with an optional `as_of` override.
pub fn build_engine_params(
    config: &dyn ConfigPort,
    as_of_override: Option<&str>,
) -> Result<EngineParams, AccrualError> {
    let as_of_str = match as_of_override {
        Some(s) => s.to_string(),
        None => config
            .get_path("engine", "as_of")
            .ok_or_else(|| AccrualError::ConfigMissing {
                section: "engine".into(),
                key: "as_of".into(),
            })?,
    };
    let as_of = parse_date(&as_of_str, "engine", "as_of")?;

    match read_rate(config)? {
        RateSetting::Daily(rate) => EngineParams::new(rate, as_of),
        RateSetting::Annual(rate) => EngineParams::from_annual_rate(rate, as_of),
    }
}

pub fn resolve_events_path(
    events_override: Option<&PathBuf>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, AccrualError> {
    if let Some(p) = events_override {
        return Ok(p.clone());
    }
    config
        .get_path("data", "events_path")
        .map(PathBuf::from)
        .ok_or_else(|| AccrualError::ConfigMissing {
            section: "data".into(),
            key: "events_path".into(),
        })
}

pub fn resolve_output_dir(
    output_override: Option<&PathBuf>,
    config: &dyn ConfigPort,
) -> Option<PathBuf> {
    output_override
        .cloned()
        .or_else(|| config.get_path("report", "output_dir").map(PathBuf::from))
}

fn run_compute(
    config_path: &Path,
    events_override: Option<&PathBuf>,
    as_of_override: Option<&str>,
    output_override: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    if let Err(e) = validate_engine_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 2: Engine parameters
    let params = match build_engine_params(&config, as_of_override) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 3: Resolve collaborators
    let events_path = match resolve_events_path(events_override, &config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loading events from {}", events_path.display());
    let event_port = CsvEventAdapter::new(events_path);
    let report_port = CsvReportAdapter::from_config(&config);
    let output_dir = resolve_output_dir(output_override, &config);

    // Stages 4-6
    let report = output_dir
        .as_deref()
        .map(|dir| (&report_port as &dyn ReportPort, dir));
    run_compute_pipeline(&event_port, report, &params)
}

/// Fetch events, run the engine, print summaries and write reports.
pub fn run_compute_pipeline(
    event_port: &dyn EventPort,
    report: Option<(&dyn ReportPort, &Path)>,
    params: &EngineParams,
) -> ExitCode {
    // Stage 4: Fetch events
    let events = match event_port.fetch_events() {
        Ok(ev) => ev,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 5: Compute
    eprintln!(
        "Computing: {} events, daily rate {} ({:.2}% effective annual), as of {}",
        events.len(),
        params.daily_rate(),
        params.effective_annual_rate() * 100.0,
        params.as_of(),
    );
    let result = match engine::compute(&events, params) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    print_summary(&result);

    // Stage 6: Write reports
    if let Some((port, dir)) = report {
        if let Err(e) = port.write(&result, params, dir) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("\nReports written to: {}", dir.display());
    }
    ExitCode::SUCCESS
}

fn print_summary(result: &ComputationResult) {
    let stats = &result.stats;
    eprintln!("\n=== Portfolio Summary ===");
    eprintln!("Investors:          {}", stats.investor_count);
    eprintln!("Net Contributed:    {:.2}", stats.net_contributed);
    eprintln!("Interest Accrued:   {:.2}", stats.total_interest_accrued);
    eprintln!("Total Balance:      {:.2}", stats.total_balance);
    eprintln!("Return:             {:.2}%", stats.return_percentage);
    eprintln!("Avg per Investor:   {:.2}", stats.average_per_investor);

    if !result.investors.is_empty() {
        println!(
            "{:<12} {:<20} {:>6} {:>14} {:>12} {:>14} {:>7}",
            "investor", "name", "events", "contributed", "interest", "balance", "share"
        );
        for s in &result.investors {
            println!(
                "{:<12} {:<20} {:>6} {:>14.2} {:>12.2} {:>14.2} {:>6.1}%",
                s.investor_id,
                s.investor_name,
                s.event_count,
                s.net_contributed,
                s.interest_accrued,
                s.current_balance,
                s.share_of_portfolio * 100.0,
            );
        }
    }
}

fn run_validate(config_path: &Path, events_override: Option<&PathBuf>) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    match validate_engine_config(&config) {
        Ok(RateSetting::Daily(r)) => eprintln!("  daily_rate:  {r}"),
        Ok(RateSetting::Annual(r)) => eprintln!("  annual_rate: {r}"),
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }
    match config.get_path("engine", "as_of") {
        Some(d) => eprintln!("  as_of:       {d}"),
        None => eprintln!("  as_of:       (must be given with --as-of)"),
    }

    let events_path = match resolve_events_path(events_override, &config) {
        Ok(p) => p,
        Err(_) => {
            eprintln!("\nConfiguration is valid (no events file to check).");
            return ExitCode::SUCCESS;
        }
    };

    eprintln!("\nValidating events: {}", events_path.display());
    match CsvEventAdapter::new(events_path).fetch_events() {
        Ok(events) => {
            let investors = group_by_investor(&events).len();
            eprintln!("  {} events, {} investors", events.len(), investors);
        }
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    eprintln!("\nConfiguration and events are valid.");
    ExitCode::SUCCESS
}

fn run_investors(events_path: &Path) -> ExitCode {
    let events = match CsvEventAdapter::new(events_path.to_path_buf()).fetch_events() {
        Ok(ev) => ev,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let lines = investor_lines(&events);
    if lines.is_empty() {
        eprintln!("No investors found in {}", events_path.display());
    } else {
        for line in &lines {
            println!("{line}");
        }
        eprintln!("{} investors found", lines.len());
    }
    ExitCode::SUCCESS
}

/// One line per investor: id, name, event count and date range.
pub fn investor_lines(events: &[ContributionEvent]) -> Vec<String> {
    group_by_investor(events)
        .iter()
        .filter_map(|(id, evs)| {
            let first = evs.first()?;
            let last = evs.last()?;
            Some(format!(
                "{}: {} ({} events, {} to {})",
                id,
                first.investor_name,
                evs.len(),
                first.date,
                last.date
            ))
        })
        .collect()
}
