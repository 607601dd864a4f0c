//! Shared "stats pipeline" logic used by every subcommand that reads a graph.
//!
//! load (file or endpoint) -> normalize periods -> window -> stat cards
//!
//! Datasets are independent, so they are summarized in parallel; results come
//! back in dataset order.

use rayon::prelude::*;

use crate::data::GraphClient;
use crate::domain::{Dataset, Graph, RunConfig, Source};
use crate::error::AppError;
use crate::io::ingest::{load_graph, IngestedGraph};
use crate::period::{coverage_text, normalize_periods};
use crate::report::DatasetReport;
use crate::stats::compute_cards;
use crate::window::apply_window;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedGraph,
    pub reports: Vec<DatasetReport>,
}

/// Load the configured source and summarize it.
pub fn run_stats(config: &RunConfig) -> Result<RunOutput, AppError> {
    let ingest = load_source(&config.source)?;
    let reports = summarize_graph(&ingest.graph, config)?;
    Ok(RunOutput { ingest, reports })
}

pub fn load_source(source: &Source) -> Result<IngestedGraph, AppError> {
    match source {
        Source::File(path) => load_graph(path),
        Source::Api { slug } => GraphClient::from_env()?.fetch_graph(slug),
    }
}

/// Summarize every selected dataset of `graph`.
pub fn summarize_graph(graph: &Graph, config: &RunConfig) -> Result<Vec<DatasetReport>, AppError> {
    if graph.datasets.is_empty() {
        return Err(AppError::no_data("The graph has no datasets."));
    }

    let selected: Vec<&Dataset> = match config.dataset_id {
        Some(id) => {
            let found: Vec<&Dataset> = graph.datasets.iter().filter(|d| d.id == id).collect();
            if found.is_empty() {
                let known: Vec<String> = graph.datasets.iter().map(|d| d.id.to_string()).collect();
                return Err(AppError::no_data(format!(
                    "No dataset with id {id}. Available: {}.",
                    known.join(", ")
                )));
            }
            found
        }
        None => graph.datasets.iter().collect(),
    };

    Ok(selected
        .par_iter()
        .map(|dataset| summarize_dataset(dataset, config))
        .collect())
}

/// Normalize, window and summarize one dataset.
///
/// CLI overrides for behavior and unit take precedence over what the dataset
/// declares.
pub fn summarize_dataset(dataset: &Dataset, config: &RunConfig) -> DatasetReport {
    let behavior = config.behavior.unwrap_or_else(|| dataset.behavior());
    let unit = config.unit.clone().unwrap_or_else(|| dataset.unit.clone());

    let mut window = config.window.clone();
    let allows_latest = dataset
        .allow_latest_value
        .unwrap_or_else(|| behavior.allows_latest_value());
    let latest_ignored = window.synthetic_latest.is_some() && !allows_latest;
    if latest_ignored {
        tracing::warn!(dataset = dataset.id, %behavior, "dataset does not accept a latest value; ignoring it");
        window.synthetic_latest = None;
    }

    let series = normalize_periods(&dataset.series);
    let labels: Vec<&str> = series.iter().map(|o| o.period_label.as_str()).collect();
    let coverage = coverage_text(&labels);

    let windowed = apply_window(&series, &window);
    let cards = compute_cards(&windowed.series, behavior, &unit);

    tracing::debug!(
        dataset = dataset.id,
        %behavior,
        points = series.len(),
        windowed = windowed.len(),
        "summarized dataset"
    );

    DatasetReport {
        dataset_id: dataset.id,
        display_name: dataset.display_name(),
        unit,
        behavior,
        coverage,
        windowed,
        cards,
        latest_ignored,
    }
}
