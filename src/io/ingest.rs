//! Graph ingest and normalization.
//!
//! This module turns loosely typed graph payloads into well-typed
//! [`Graph`]/[`Dataset`]/[`Observation`] values. Two inputs are accepted:
//!
//! - **JSON** in the shape of the `/api/graph/{slug}` response. A bare array of
//!   datasets, or a single dataset object, is accepted too.
//! - **CSV** with one row per observation
//!   (`period_label,value[,period_start,period_end]`). CSV input always yields
//!   a single dataset; its unit and behavior come from CLI flags.
//!
//! Values may arrive as numbers, numeric strings or `null`; anything that is
//! not a number becomes NaN so statistics can skip it while charts keep the
//! gap. No sorting happens here.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Dataset, Graph, Observation};
use crate::error::AppError;

/// A row-level problem encountered while reading CSV input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub label: Option<String>,
    pub message: String,
}

/// Ingest output: the graph plus what was skipped on the way.
#[derive(Debug, Clone)]
pub struct IngestedGraph {
    pub graph: Graph,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl IngestedGraph {
    pub fn from_graph(graph: Graph) -> Self {
        let rows_read = graph.datasets.iter().map(|d| d.series.len()).sum();
        Self {
            graph,
            row_errors: Vec::new(),
            rows_read,
        }
    }
}

/// Load a graph from a `.json` or `.csv` file.
pub fn load_graph(path: &Path) -> Result<IngestedGraph, AppError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let ingested = if is_csv {
        let file = File::open(path)
            .map_err(|e| AppError::usage(format!("Failed to open '{}': {e}", path.display())))?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("series")
            .to_string();
        read_csv_graph(file, &name)?
    } else {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::usage(format!("Failed to read '{}': {e}", path.display())))?;
        IngestedGraph::from_graph(parse_graph_json(&text)?)
    };

    tracing::info!(
        path = %path.display(),
        datasets = ingested.graph.datasets.len(),
        rows = ingested.rows_read,
        row_errors = ingested.row_errors.len(),
        "loaded graph"
    );
    Ok(ingested)
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPayload {
    Graph(RawGraph),
    Datasets(Vec<RawDataset>),
    Dataset(RawDataset),
}

#[derive(Debug, Deserialize)]
struct RawGraph {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    source: Option<String>,
    // Required so that a bare dataset object does not match this shape.
    datasets: Vec<RawDataset>,
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    metric_type: Option<String>,
    #[serde(default)]
    metric_behavior: Option<String>,
    #[serde(default)]
    allow_latest_value: Option<bool>,
    data_points: Vec<RawPoint>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    #[serde(default)]
    period_label: Option<Value>,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    period_start: Option<String>,
    #[serde(default)]
    period_end: Option<String>,
}

/// Parse a graph payload from JSON text.
pub fn parse_graph_json(text: &str) -> Result<Graph, AppError> {
    let payload: RawPayload = serde_json::from_str(text)
        .map_err(|e| AppError::usage(format!("Invalid graph JSON: {e}")))?;

    let graph = match payload {
        RawPayload::Graph(raw) => raw.into_graph(),
        RawPayload::Datasets(datasets) => Graph {
            datasets: normalize_datasets(datasets),
            ..Graph::default()
        },
        RawPayload::Dataset(dataset) => Graph {
            datasets: normalize_datasets(vec![dataset]),
            ..Graph::default()
        },
    };
    Ok(graph)
}

impl RawGraph {
    fn into_graph(self) -> Graph {
        Graph {
            id: self.id.as_ref().and_then(coerce_i64),
            slug: self.slug.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            source: self.source.unwrap_or_default(),
            datasets: normalize_datasets(self.datasets),
        }
    }
}

fn normalize_datasets(raw: Vec<RawDataset>) -> Vec<Dataset> {
    raw.into_iter()
        .enumerate()
        .map(|(idx, d)| normalize_dataset(d, idx))
        .collect()
}

fn normalize_dataset(raw: RawDataset, idx: usize) -> Dataset {
    // Datasets without an id get their 1-based position so `--dataset` still
    // has something to select.
    let id = raw
        .id
        .as_ref()
        .and_then(coerce_i64)
        .unwrap_or(idx as i64 + 1);

    let behavior_tag = raw
        .metric_behavior
        .filter(|t| !t.trim().is_empty())
        .or(raw.metric_type.filter(|t| !t.trim().is_empty()));

    let series = raw
        .data_points
        .into_iter()
        .map(|p| {
            let label = p.period_label.as_ref().map(label_text).unwrap_or_default();
            let value = p.value.as_ref().map(coerce_f64).unwrap_or(f64::NAN);
            Observation::new(label, value).with_period(
                p.period_start.as_deref().and_then(parse_date),
                p.period_end.as_deref().and_then(parse_date),
            )
        })
        .collect();

    Dataset {
        id,
        name: raw.name.unwrap_or_default(),
        unit: raw.unit.unwrap_or_default(),
        behavior_tag,
        allow_latest_value: raw.allow_latest_value,
        series,
    }
}

/// Numbers pass through, numeric strings are parsed, everything else is NaN.
fn coerce_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_number(s),
        _ => f64::NAN,
    }
}

fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn parse_number(s: &str) -> f64 {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().unwrap_or(f64::NAN)
}

/// `YYYY-MM-DD`, ignoring any trailing time component.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.trim().split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Read a single-dataset CSV series.
///
/// Rows without a label are reported and skipped; unparseable values become
/// NaN and are kept.
pub fn read_csv_graph<R: Read>(reader: R, name: &str) -> Result<IngestedGraph, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::usage(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    for required in ["period_label", "value"] {
        if !header_map.contains_key(required) {
            return Err(AppError::usage(format!("Missing required column: `{required}`")));
        }
    }

    let mut series = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    label: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let Some(label) = get_optional(&record, &header_map, "period_label") else {
            row_errors.push(RowError {
                line,
                label: None,
                message: "Missing required value: `period_label`".to_string(),
            });
            continue;
        };

        let value = get_optional(&record, &header_map, "value")
            .map(parse_number)
            .unwrap_or(f64::NAN);
        let start = get_optional(&record, &header_map, "period_start").and_then(parse_date);
        let end = get_optional(&record, &header_map, "period_end").and_then(parse_date);

        series.push(Observation::new(label, value).with_period(start, end));
    }

    for err in &row_errors {
        tracing::warn!(line = err.line, message = %err.message, "skipped CSV row");
    }

    let dataset = Dataset {
        id: 1,
        name: name.to_string(),
        series,
        ..Dataset::default()
    };

    Ok(IngestedGraph {
        graph: Graph {
            title: name.to_string(),
            datasets: vec![dataset],
            ..Graph::default()
        },
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}
