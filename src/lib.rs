//! `graph-stats` library crate.
//!
//! Turns published economic time series into the summary cards shown beside
//! each chart (CAGR, total return, min/max, latest value, index change).
//!
//! The core is three pure modules wired in this order:
//!
//! - [`period`]: period labels → chronological keys and display ranges
//! - [`window`]: last-5 / last-10 / custom slices plus the synthetic "Latest" point
//! - [`stats`]: behavior-specific stat cards
//!
//! Everything else (ingest, HTTP, CLI, plots, exports) sits around that core
//! and is only used by the `gstat` binary.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod period;
pub mod plot;
pub mod report;
pub mod stats;
pub mod window;

pub use domain::{MetricBehavior, Observation, StatCard, WindowKind, WindowSpec, YearRange};
pub use period::{extract_year, extract_year_range, normalize_periods};
pub use stats::compute_stats;
pub use window::{apply_window, WindowIssue, Windowed};
