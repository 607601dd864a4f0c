//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - series inputs (`Observation`, `Dataset`, `Graph`)
//! - the declared `MetricBehavior` tag and window policy (`WindowSpec`)
//! - outputs (`StatCard`, `YearRange`) and the run configuration

pub mod types;

pub use types::*;
