//! Export windowed series (CSV) and stat cards (JSON).
//!
//! Exports are meant to be easy to consume in spreadsheets or downstream
//! scripts. Synthetic observations (the reader's "Latest" value) are never
//! written.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::{MetricBehavior, StatCard};
use crate::error::AppError;
use crate::window::Windowed;

/// One dataset's windowed series, as handed to [`write_series_csv`].
#[derive(Debug, Clone, Copy)]
pub struct SeriesExport<'a> {
    pub dataset_id: i64,
    pub windowed: &'a Windowed,
}

/// One dataset's stat cards, as written by [`write_cards_json`].
#[derive(Debug, Clone, Serialize)]
pub struct CardsExport<'a> {
    pub dataset_id: i64,
    pub name: &'a str,
    pub behavior: MetricBehavior,
    pub cards: &'a [StatCard],
}

/// Write windowed series to a CSV file.
pub fn write_series_csv(path: &Path, exports: &[SeriesExport<'_>]) -> Result<usize, AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let rows = write_series(file, exports)?;
    tracing::info!(path = %path.display(), rows, "wrote series export");
    Ok(rows)
}

/// CSV body of [`write_series_csv`]; returns the number of data rows.
pub fn write_series<W: Write>(writer: W, exports: &[SeriesExport<'_>]) -> Result<usize, AppError> {
    let mut csv = csv::Writer::from_writer(writer);
    let write_err = |e: csv::Error| AppError::io(format!("Failed to write export CSV: {e}"));

    csv.write_record(["dataset_id", "period_label", "value", "period_start", "period_end"])
        .map_err(write_err)?;

    let mut rows = 0usize;
    for export in exports {
        let id = export.dataset_id.to_string();
        for obs in export.windowed.persistable() {
            let value = if obs.value.is_finite() {
                obs.value.to_string()
            } else {
                String::new()
            };
            let start = obs.period_start.map(|d| d.to_string()).unwrap_or_default();
            let end = obs.period_end.map(|d| d.to_string()).unwrap_or_default();
            csv.write_record([id.as_str(), &obs.period_label, &value, &start, &end])
                .map_err(write_err)?;
            rows += 1;
        }
    }

    csv.flush()
        .map_err(|e| AppError::io(format!("Failed to flush export CSV: {e}")))?;
    Ok(rows)
}

/// Write stat cards to a JSON file.
pub fn write_cards_json(path: &Path, exports: &[CardsExport<'_>]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create cards JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, exports)
        .map_err(|e| AppError::io(format!("Failed to write cards JSON: {e}")))?;
    tracing::info!(path = %path.display(), datasets = exports.len(), "wrote cards export");
    Ok(())
}
