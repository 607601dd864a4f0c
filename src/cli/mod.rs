//! Command-line parsing for `gstat`.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! statistics code. Flags are turned into a [`RunConfig`] by
//! [`StatsArgs::to_config`] and nothing below this layer sees clap types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{MetricBehavior, RunConfig, Source, WindowKind, WindowSpec};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gstat", version, about = "Summary statistics for published economic time series")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print stat cards for every dataset of a graph (or one, with `--dataset`).
    Stats(StatsArgs),
    /// Draw the windowed series as an ASCII chart.
    Plot(StatsArgs),
    /// Show the year keys recovered from period labels.
    Range(RangeArgs),
}

/// Options shared by `stats` and `plot`.
#[derive(Debug, Args, Clone)]
pub struct StatsArgs {
    /// Graph source: a `.json`/`.csv` file, or `api:<slug>` for the graph endpoint.
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Window over the series.
    #[arg(short = 'w', long, value_enum, default_value_t = WindowKind::Custom)]
    pub window: WindowKind,

    /// First period label of a custom window.
    #[arg(long, value_name = "LABEL")]
    pub start: Option<String>,

    /// Last period label of a custom window.
    #[arg(long, value_name = "LABEL")]
    pub end: Option<String>,

    /// Append a "Latest" observation with this value (never exported).
    #[arg(long, value_name = "VALUE", allow_hyphen_values = true)]
    pub latest: Option<f64>,

    /// Only summarize the dataset with this id.
    #[arg(short = 'd', long = "dataset", value_name = "ID")]
    pub dataset_id: Option<i64>,

    /// Override the declared metric behavior (required context for CSV input).
    #[arg(short = 'b', long, value_enum)]
    pub behavior: Option<MetricBehavior>,

    /// Override the dataset unit.
    #[arg(short = 'u', long)]
    pub unit: Option<String>,

    /// Render an ASCII plot after the cards.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,

    /// Skip the "about this metric" text.
    #[arg(long)]
    pub no_about: bool,

    /// Also print a compact "label: value" digest of the most recent points.
    #[arg(long)]
    pub recent: bool,

    /// Number of points in the recent-values digest.
    #[arg(long, default_value_t = 40)]
    pub recent_limit: usize,

    /// Export the windowed series (recorded observations only) to CSV.
    #[arg(long = "export-series", value_name = "CSV")]
    pub export_series: Option<PathBuf>,

    /// Export stat cards to JSON.
    #[arg(long = "export-cards", value_name = "JSON")]
    pub export_cards: Option<PathBuf>,
}

impl StatsArgs {
    pub fn to_config(&self) -> RunConfig {
        let window = WindowSpec {
            kind: self.window,
            start_label: self.start.clone(),
            end_label: self.end.clone(),
            synthetic_latest: self.latest.and_then(clamp_latest),
        };

        RunConfig {
            window,
            dataset_id: self.dataset_id,
            behavior: self.behavior,
            unit: self.unit.clone(),
            plot: self.plot,
            plot_width: self.width,
            plot_height: self.height,
            show_about: !self.no_about,
            show_recent: self.recent,
            summary_limit: self.recent_limit,
            export_series: self.export_series.clone(),
            export_cards: self.export_cards.clone(),
            ..RunConfig::new(Source::parse(&self.source))
        }
    }
}

/// Options for `range`.
#[derive(Debug, Args, Clone)]
pub struct RangeArgs {
    /// Period labels, e.g. "FY 2020-21" "2019" "Apr 2020 – Dec 2025".
    #[arg(required = true, value_name = "LABEL")]
    pub labels: Vec<String>,
}

/// Latest values follow the site's input box: negatives clamp to zero and a
/// zero value means "no latest value".
pub fn clamp_latest(value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let value = value.max(0.0);
    (value > 0.0).then_some(value)
}
