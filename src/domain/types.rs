//! Shared domain types.
//!
//! Observations, datasets and graphs are read-only inputs. Windows and stat
//! cards are derived fresh on every computation and never written back.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

/// Label given to the user-supplied observation appended by a window.
pub const LATEST_LABEL: &str = "Latest";

/// Where an observation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// Loaded from the dataset.
    #[default]
    Recorded,
    /// Appended by the windower from a user-supplied latest value.
    ///
    /// Synthetic observations take part in charts and statistics but must
    /// never be persisted.
    Synthetic,
}

/// One `(period, value)` point of a series.
///
/// `value` may be NaN when the source row was malformed. Statistics skip such
/// entries; charts keep them so gaps stay visible.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub period_label: String,
    pub value: f64,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub origin: Origin,
}

impl Observation {
    pub fn new(period_label: impl Into<String>, value: f64) -> Self {
        Self {
            period_label: period_label.into(),
            value,
            period_start: None,
            period_end: None,
            origin: Origin::Recorded,
        }
    }

    pub fn with_period(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.period_start = start;
        self.period_end = end;
        self
    }

    /// The `"Latest"` observation appended from a user-entered value.
    pub fn synthetic_latest(value: f64) -> Self {
        Self {
            origin: Origin::Synthetic,
            ..Self::new(LATEST_LABEL, value)
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.origin == Origin::Synthetic
    }

    /// Finite values count toward min/max/mean statistics.
    pub fn is_valid(&self) -> bool {
        self.value.is_finite()
    }
}

/// Declared classification of a dataset; selects which summary statistics
/// are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MetricBehavior {
    Growth,
    Rate,
    Index,
    Stock,
    Ratio,
    Forex,
    Trade,
    #[default]
    Value,
}

impl MetricBehavior {
    pub const ALL: [MetricBehavior; 8] = [
        MetricBehavior::Growth,
        MetricBehavior::Rate,
        MetricBehavior::Index,
        MetricBehavior::Stock,
        MetricBehavior::Ratio,
        MetricBehavior::Forex,
        MetricBehavior::Trade,
        MetricBehavior::Value,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricBehavior::Growth => "growth",
            MetricBehavior::Rate => "rate",
            MetricBehavior::Index => "index",
            MetricBehavior::Stock => "stock",
            MetricBehavior::Ratio => "ratio",
            MetricBehavior::Forex => "forex",
            MetricBehavior::Trade => "trade",
            MetricBehavior::Value => "value",
        }
    }

    /// Parse a tag exactly as stored with a dataset (case-insensitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(tag))
    }

    /// Resolve a possibly missing or unknown tag. Anything unrecognized falls
    /// back to `Value`.
    pub fn resolve(tag: Option<&str>) -> Self {
        match tag.map(str::trim).filter(|t| !t.is_empty()) {
            None => MetricBehavior::Value,
            Some(t) => Self::from_tag(t).unwrap_or_else(|| {
                tracing::debug!(tag = t, "unknown metric behavior, using `value`");
                MetricBehavior::Value
            }),
        }
    }

    /// Whether datasets of this kind accept a user-entered latest value when
    /// they do not say so explicitly.
    pub fn allows_latest_value(self) -> bool {
        matches!(self, MetricBehavior::Growth | MetricBehavior::Value)
    }
}

impl fmt::Display for MetricBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single series plus the metadata needed to summarize it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub id: i64,
    pub name: String,
    pub unit: String,
    /// Behavior tag as stored (`metric_behavior`, else legacy `metric_type`).
    pub behavior_tag: Option<String>,
    pub allow_latest_value: Option<bool>,
    pub series: Vec<Observation>,
}

impl Dataset {
    pub fn behavior(&self) -> MetricBehavior {
        MetricBehavior::resolve(self.behavior_tag.as_deref())
    }

    pub fn allows_latest_value(&self) -> bool {
        self.allow_latest_value
            .unwrap_or_else(|| self.behavior().allows_latest_value())
    }

    /// Name shown in dataset pickers: `"Name (unit)"` unless the name already
    /// mentions the unit.
    pub fn display_name(&self) -> String {
        if self.unit.is_empty() || self.name.contains(&self.unit) {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.unit)
        }
    }
}

/// A published graph: one or more datasets sharing a page.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub id: Option<i64>,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub source: String,
    pub datasets: Vec<Dataset>,
}

/// Window policy selected by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WindowKind {
    #[value(name = "last-5", aliases = ["last5", "5"])]
    Last5,
    #[value(name = "last-10", aliases = ["last10", "10"])]
    Last10,
    #[default]
    #[value(name = "custom")]
    Custom,
}

impl WindowKind {
    /// Number of trailing observations a tail window keeps.
    ///
    /// "Last N" keeps N+1 points so that N period-over-period deltas exist.
    pub fn tail_len(self) -> Option<usize> {
        match self {
            WindowKind::Last5 => Some(6),
            WindowKind::Last10 => Some(11),
            WindowKind::Custom => None,
        }
    }
}

/// How a series is sliced before statistics are computed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowSpec {
    pub kind: WindowKind,
    pub start_label: Option<String>,
    pub end_label: Option<String>,
    pub synthetic_latest: Option<f64>,
}

impl WindowSpec {
    pub fn tail(kind: WindowKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn custom(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            kind: WindowKind::Custom,
            start_label: Some(start.into()),
            end_label: Some(end.into()),
            synthetic_latest: None,
        }
    }

    pub fn with_latest(mut self, value: f64) -> Self {
        self.synthetic_latest = Some(value);
        self
    }
}

/// One labeled summary tile shown beside a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub label: String,
    pub value: String,
}

impl StatCard {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Start/end years recovered from a single period label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YearRange {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

impl YearRange {
    pub fn new(start: Option<i32>, end: Option<i32>) -> Self {
        Self { start, end }
    }

    pub fn single(year: i32) -> Self {
        Self::new(Some(year), Some(year))
    }
}

/// Where the binary loads a graph from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A `.json` graph payload or a `.csv` series.
    File(PathBuf),
    /// `GET {GRAPH_API_BASE}/api/graph/{slug}`.
    Api { slug: String },
}

impl Source {
    /// `api:<slug>` selects the endpoint; anything else is a path.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix("api:") {
            Some(slug) => Source::Api {
                slug: slug.trim().to_string(),
            },
            None => Source::File(PathBuf::from(raw)),
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// Derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: Source,
    pub window: WindowSpec,
    /// Only summarize this dataset (by id).
    pub dataset_id: Option<i64>,
    /// Overrides the dataset's declared behavior (and sets it for CSV input).
    pub behavior: Option<MetricBehavior>,
    /// Overrides the dataset's unit (and sets it for CSV input).
    pub unit: Option<String>,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    /// Print the "about this metric" text under each dataset.
    pub show_about: bool,
    /// Print the recent-values digest under each dataset.
    pub show_recent: bool,
    /// How many trailing observations the recent-values digest lists.
    pub summary_limit: usize,
    pub export_series: Option<PathBuf>,
    pub export_cards: Option<PathBuf>,
}

impl RunConfig {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            window: WindowSpec::default(),
            dataset_id: None,
            behavior: None,
            unit: None,
            plot: false,
            plot_width: 72,
            plot_height: 16,
            show_about: true,
            show_recent: false,
            summary_limit: 40,
            export_series: None,
            export_cards: None,
        }
    }
}
