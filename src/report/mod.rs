//! Reporting: per-dataset results and formatted terminal output.

use crate::domain::{MetricBehavior, StatCard};
use crate::io::export::{CardsExport, SeriesExport};
use crate::window::Windowed;

pub mod format;

pub use format::*;

/// Everything computed for one dataset of a graph.
#[derive(Debug, Clone)]
pub struct DatasetReport {
    pub dataset_id: i64,
    /// Picker name, `"Name (unit)"`.
    pub display_name: String,
    pub unit: String,
    pub behavior: MetricBehavior,
    /// Year range of the full (unwindowed) series, e.g. `"1991–2025"`.
    pub coverage: Option<String>,
    pub windowed: Windowed,
    pub cards: Vec<StatCard>,
    /// A latest value was requested but the dataset does not accept one.
    pub latest_ignored: bool,
}

impl DatasetReport {
    pub fn series_export(&self) -> SeriesExport<'_> {
        SeriesExport {
            dataset_id: self.dataset_id,
            windowed: &self.windowed,
        }
    }

    pub fn cards_export(&self) -> CardsExport<'_> {
        CardsExport {
            dataset_id: self.dataset_id,
            name: &self.display_name,
            behavior: self.behavior,
            cards: &self.cards,
        }
    }
}
