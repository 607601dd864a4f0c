//! Series windowing.
//!
//! A window selects the slice of a (chronologically sorted) series that feeds
//! both the chart and the statistics, and optionally appends the reader's own
//! "Latest" value. Invalid custom ranges fail open: the full series is returned
//! together with a [`WindowIssue`] the caller can show next to the inputs.

use std::fmt;

use crate::domain::{Observation, WindowSpec};

/// Why a custom window fell back to the full series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowIssue {
    /// Only one of start/end was chosen.
    Incomplete,
    /// A chosen label does not exist in the series.
    UnknownLabel(String),
    /// The end label comes before the start label.
    EndBeforeStart,
}

impl WindowIssue {
    pub fn message(&self) -> String {
        match self {
            WindowIssue::Incomplete => "Select both a start and an end period.".to_string(),
            WindowIssue::UnknownLabel(label) => format!("Period '{label}' is not part of this series."),
            WindowIssue::EndBeforeStart => "End year cannot be earlier than start year.".to_string(),
        }
    }
}

impl fmt::Display for WindowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Output of [`apply_window`].
#[derive(Debug, Clone, Default)]
pub struct Windowed {
    pub series: Vec<Observation>,
    pub issue: Option<WindowIssue>,
}

impl Windowed {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Chart x-axis labels.
    pub fn labels(&self) -> Vec<String> {
        self.series.iter().map(|o| o.period_label.clone()).collect()
    }

    /// Chart values, NaN entries included.
    pub fn values(&self) -> Vec<f64> {
        self.series.iter().map(|o| o.value).collect()
    }

    /// Observations that may be written anywhere durable.
    pub fn persistable(&self) -> impl Iterator<Item = &Observation> {
        self.series.iter().filter(|o| !o.is_synthetic())
    }
}

/// Slice `series` according to `window`.
///
/// The input is expected to be sorted already (see
/// [`crate::period::normalize_periods`]); it is never modified.
pub fn apply_window(series: &[Observation], window: &WindowSpec) -> Windowed {
    let (slice, issue) = match window.kind.tail_len() {
        Some(n) => (tail(series, n), None),
        None => custom_slice(
            series,
            window.start_label.as_deref(),
            window.end_label.as_deref(),
        ),
    };

    if let Some(issue) = &issue {
        tracing::debug!(%issue, kind = ?window.kind, "custom window fell back to the full series");
    }

    let mut out = slice.to_vec();
    if let Some(value) = window.synthetic_latest {
        out.push(Observation::synthetic_latest(value));
    }

    Windowed { series: out, issue }
}

fn tail(series: &[Observation], n: usize) -> &[Observation] {
    &series[series.len().saturating_sub(n)..]
}

fn custom_slice<'a>(
    series: &'a [Observation],
    start: Option<&str>,
    end: Option<&str>,
) -> (&'a [Observation], Option<WindowIssue>) {
    let start = start.filter(|s| !s.is_empty());
    let end = end.filter(|s| !s.is_empty());

    let (start, end) = match (start, end) {
        (None, None) => return (series, None),
        (Some(s), Some(e)) => (s, e),
        _ => return (series, Some(WindowIssue::Incomplete)),
    };

    let Some(start_idx) = position_of(series, start) else {
        return (series, Some(WindowIssue::UnknownLabel(start.to_string())));
    };
    let Some(end_idx) = position_of(series, end) else {
        return (series, Some(WindowIssue::UnknownLabel(end.to_string())));
    };

    if end_idx < start_idx {
        return (series, Some(WindowIssue::EndBeforeStart));
    }

    (&series[start_idx..=end_idx], None)
}

fn position_of(series: &[Observation], label: &str) -> Option<usize> {
    series.iter().position(|o| o.period_label == label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WindowKind;

    fn yearly(from: i32, to: i32) -> Vec<Observation> {
        (from..=to)
            .map(|y| Observation::new(y.to_string(), f64::from(y - from + 1)))
            .collect()
    }

    fn labels(w: &Windowed) -> Vec<String> {
        w.labels()
    }

    #[test]
    fn last5_and_last10_keep_n_plus_one_points() {
        let series = yearly(2000, 2024);
        let w5 = apply_window(&series, &WindowSpec::tail(WindowKind::Last5));
        assert_eq!(w5.len(), 6);
        assert_eq!(w5.series[0].period_label, "2019");

        let w10 = apply_window(&series, &WindowSpec::tail(WindowKind::Last10));
        assert_eq!(w10.len(), 11);
        assert_eq!(w10.series[0].period_label, "2014");
        assert!(w10.issue.is_none());
    }

    #[test]
    fn tail_window_on_short_series_keeps_everything() {
        let series = yearly(2020, 2022);
        let w = apply_window(&series, &WindowSpec::tail(WindowKind::Last10));
        assert_eq!(w.len(), 3);
    }

    #[test]
    fn custom_range_is_inclusive() {
        let series = yearly(2000, 2010);
        let w = apply_window(&series, &WindowSpec::custom("2003", "2005"));
        assert_eq!(labels(&w), vec!["2003", "2004", "2005"]);
        assert!(w.issue.is_none());
    }

    #[test]
    fn custom_range_with_unknown_label_returns_full_series() {
        let series = yearly(2000, 2004);
        let w = apply_window(&series, &WindowSpec::custom("1999", "2003"));
        assert_eq!(w.len(), series.len());
        assert_eq!(w.issue, Some(WindowIssue::UnknownLabel("1999".to_string())));
    }

    #[test]
    fn custom_range_end_before_start_fails_open_with_message() {
        let series = yearly(2000, 2004);
        let w = apply_window(&series, &WindowSpec::custom("2003", "2001"));
        assert_eq!(w.len(), 5);
        let issue = w.issue.expect("issue");
        assert_eq!(issue.message(), "End year cannot be earlier than start year.");
    }

    #[test]
    fn custom_range_with_one_label_is_incomplete() {
        let series = yearly(2000, 2004);
        let window = WindowSpec {
            start_label: Some("2001".to_string()),
            ..WindowSpec::default()
        };
        let w = apply_window(&series, &window);
        assert_eq!(w.len(), 5);
        assert_eq!(w.issue, Some(WindowIssue::Incomplete));

        let w = apply_window(&series, &WindowSpec::default());
        assert_eq!(w.len(), 5);
        assert!(w.issue.is_none());
    }

    #[test]
    fn synthetic_latest_is_appended_for_every_kind() {
        let series = yearly(2000, 2020);
        for kind in [WindowKind::Last5, WindowKind::Last10, WindowKind::Custom] {
            let w = apply_window(&series, &WindowSpec::tail(kind).with_latest(500.0));
            let last = w.series.last().expect("non-empty");
            assert_eq!(last.period_label, "Latest");
            assert_eq!(last.value, 500.0);
            assert_eq!(w.series.iter().filter(|o| o.is_synthetic()).count(), 1);
            assert_eq!(w.persistable().count(), w.len() - 1);
        }
    }

    #[test]
    fn empty_series_yields_empty_window() {
        let w = apply_window(&[], &WindowSpec::tail(WindowKind::Last5));
        assert!(w.is_empty());
        let w = apply_window(&[], &WindowSpec::custom("2001", "2002"));
        assert!(w.is_empty());
    }

    #[test]
    fn chart_values_keep_nan_gaps() {
        let series = vec![Observation::new("2023", f64::NAN), Observation::new("2024", 2.0)];
        let w = apply_window(&series, &WindowSpec::default());
        let values = w.values();
        assert!(values[0].is_nan());
        assert_eq!(values[1], 2.0);
    }
}
