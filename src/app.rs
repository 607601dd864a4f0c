//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - sets up logging
//! - parses CLI arguments
//! - runs the stats pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, RangeArgs, StatsArgs};
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::io::export::{write_cards_json, write_series_csv};
use crate::report::ReportOptions;

pub mod pipeline;

/// Environment variable holding the log filter (falls back to `RUST_LOG`).
pub const LOG_ENV: &str = "GSTAT_LOG";

/// Entry point for the `gstat` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Stats(args) => handle_stats(&args, OutputMode::Cards),
        Command::Plot(args) => handle_stats(&args, OutputMode::PlotOnly),
        Command::Range(args) => handle_range(&args),
    }
}

/// Logs go to stderr so stdout stays clean for reports.
fn init_logging() {
    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Cards,
    PlotOnly,
}

fn handle_stats(args: &StatsArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = args.to_config();
    let run = pipeline::run_stats(&config)?;

    let errors = crate::report::format_row_errors(&run.ingest.row_errors);
    if !errors.is_empty() {
        eprint!("{errors}");
    }

    println!("{}", crate::report::format_graph_header(&run.ingest.graph).trim_end());

    let opts = report_options(&config);
    for report in &run.reports {
        if mode == OutputMode::Cards {
            print!("{}", crate::report::format_dataset_report(report, opts));
        } else {
            println!("\n--- {} ---", report.display_name);
        }

        if mode == OutputMode::PlotOnly || config.plot {
            println!();
            print!(
                "{}",
                crate::plot::render_series_plot(&report.windowed.series, config.plot_width, config.plot_height)
            );
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_series {
        let exports: Vec<_> = run.reports.iter().map(|r| r.series_export()).collect();
        write_series_csv(path, &exports)?;
    }
    if let Some(path) = &config.export_cards {
        let exports: Vec<_> = run.reports.iter().map(|r| r.cards_export()).collect();
        write_cards_json(path, &exports)?;
    }

    Ok(())
}

fn report_options(config: &RunConfig) -> ReportOptions {
    ReportOptions {
        show_about: config.show_about,
        show_recent: config.show_recent,
        recent_limit: config.summary_limit,
    }
}

fn handle_range(args: &RangeArgs) -> Result<(), AppError> {
    print!("{}", crate::report::format_year_table(&args.labels));
    if let Some(coverage) = crate::period::coverage_text(&args.labels) {
        println!("Coverage: {coverage}");
    }
    Ok(())
}
