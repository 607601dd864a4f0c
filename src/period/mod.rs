//! Period label normalization.
//!
//! Period labels are free text ("FY 2020-21", "2020", "Apr 2020 – Dec 2025",
//! "FY 24"). The helpers here turn them into sortable year keys and display
//! ranges. None of them can fail: unparseable labels map to `0` or `None`,
//! which sorts first and renders predictably.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Observation, YearRange};

static FOUR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("four-digit year pattern"));

// `FY 24`, `FY24`, `fy 98`; the two digits must not continue into a longer number.
static SHORT_FY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bFY\s?([0-9]{2})\b").expect("short fiscal-year pattern"));

static TWO_YEARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{4}).*?([0-9]{4})").expect("year pair pattern"));

static FY_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{4})[–-]([0-9]{2,4})").expect("fiscal range pattern"));

/// Sortable year key for a period label.
///
/// Rules, first match wins:
/// 1. two or more 4-digit numbers: the largest (ranges sort by their end)
/// 2. `FY <yy>`: `yy < 50` is `20yy`, otherwise `19yy`
/// 3. a single 4-digit number
/// 4. `0`
pub fn extract_year(label: &str) -> i32 {
    let years: Vec<i32> = FOUR_DIGITS
        .find_iter(label)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    if years.len() >= 2 {
        return years.into_iter().max().unwrap_or(0);
    }

    if let Some(yy) = SHORT_FY
        .captures(label)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok())
    {
        return if yy < 50 { 2000 + yy } else { 1900 + yy };
    }

    years.first().copied().unwrap_or(0)
}

/// Start and end years of a label, used for page subtitles.
///
/// Accepts explicit pairs ("2019-2020", "Apr 2020 – Dec 2025"), fiscal ranges
/// with a short end ("2020–21", "1999-00") and single years.
pub fn extract_year_range(label: &str) -> YearRange {
    if let Some(caps) = TWO_YEARS.captures(label) {
        return YearRange::new(capture_year(&caps, 1), capture_year(&caps, 2));
    }

    if let Some(caps) = FY_RANGE.captures(label) {
        if let (Some(start), Some(end_part)) = (capture_year(&caps, 1), capture_year(&caps, 2)) {
            let mut end = if end_part < 100 {
                start - start % 100 + end_part
            } else {
                end_part
            };
            if end < start {
                end += 100;
            }
            return YearRange::new(Some(start), Some(end));
        }
    }

    FOUR_DIGITS
        .find(label)
        .and_then(|m| m.as_str().parse().ok())
        .map(YearRange::single)
        .unwrap_or_default()
}

fn capture_year(caps: &regex::Captures<'_>, idx: usize) -> Option<i32> {
    caps.get(idx).and_then(|m| m.as_str().parse().ok())
}

/// Stable chronological sort, in place.
///
/// When every observation carries `period_start`, that date is the key.
/// Otherwise the key is [`extract_year`] of the label. Ties keep input order.
pub fn sort_chronologically(series: &mut [Observation]) {
    if !series.is_empty() && series.iter().all(|o| o.period_start.is_some()) {
        series.sort_by_key(|o| o.period_start);
    } else {
        series.sort_by_cached_key(|o| extract_year(&o.period_label));
    }
}

/// Chronologically ordered copy of `series`.
pub fn normalize_periods(series: &[Observation]) -> Vec<Observation> {
    let mut out = series.to_vec();
    sort_chronologically(&mut out);
    out
}

/// `"{first} → {last}"` for a slice, `"--"` when empty.
pub fn period_range_text(series: &[Observation]) -> String {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) => format!("{} → {}", first.period_label, last.period_label),
        _ => "--".to_string(),
    }
}

/// Year coverage of a chronologically sorted label list, e.g. `"1991–2025"`.
pub fn coverage_text<S: AsRef<str>>(labels: &[S]) -> Option<String> {
    let start = labels
        .first()
        .and_then(|l| extract_year_range(l.as_ref()).start);
    let end = labels
        .last()
        .and_then(|l| extract_year_range(l.as_ref()).end);

    match (start, end) {
        (Some(s), Some(e)) if s != e => Some(format!("{s}–{e}")),
        (Some(y), _) | (None, Some(y)) => Some(y.to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn extract_year_examples() {
        assert_eq!(extract_year("FY 24"), 2024);
        assert_eq!(extract_year("FY 60"), 1960);
        assert_eq!(extract_year("fy49"), 2049);
        assert_eq!(extract_year("1991 to 2025"), 2025);
        assert_eq!(extract_year("no year here"), 0);
        assert_eq!(extract_year(""), 0);
    }

    #[test]
    fn extract_year_prefers_full_years_over_short_fy() {
        assert_eq!(extract_year("FY 2024"), 2024);
        assert_eq!(extract_year("FY2020-21"), 2020);
        assert_eq!(extract_year("2019-2020"), 2020);
        assert_eq!(extract_year("Apr 2020 – Dec 2025"), 2025);
    }

    #[test]
    fn year_range_from_pairs_and_fiscal_labels() {
        assert_eq!(extract_year_range("2019-2020"), YearRange::new(Some(2019), Some(2020)));
        assert_eq!(extract_year_range("2020–21"), YearRange::new(Some(2020), Some(2021)));
        assert_eq!(extract_year_range("FY 1999-00"), YearRange::new(Some(1999), Some(2000)));
        assert_eq!(extract_year_range("2024"), YearRange::single(2024));
        assert_eq!(extract_year_range("Q3"), YearRange::default());
    }

    #[test]
    fn sort_is_stable_and_uses_label_years() {
        let series = vec![
            Observation::new("2021", 3.0),
            Observation::new("n/a", 0.0),
            Observation::new("FY 19", 1.0),
            Observation::new("2021 (rev)", 4.0),
        ];
        let sorted = normalize_periods(&series);
        let labels: Vec<&str> = sorted.iter().map(|o| o.period_label.as_str()).collect();
        assert_eq!(labels, vec!["n/a", "FY 19", "2021", "2021 (rev)"]);
    }

    #[test]
    fn sort_prefers_period_start_when_complete() {
        let d = |y: i32, m: u32| NaiveDate::from_ymd_opt(y, m, 1);
        let series = vec![
            Observation::new("Q2", 2.0).with_period(d(2024, 4), d(2024, 6)),
            Observation::new("Q1", 1.0).with_period(d(2024, 1), d(2024, 3)),
        ];
        let sorted = normalize_periods(&series);
        assert_eq!(sorted[0].period_label, "Q1");
        assert_eq!(sorted[1].period_label, "Q2");
    }

    #[test]
    fn range_text_and_coverage() {
        let series = vec![Observation::new("1991-92", 1.0), Observation::new("2024-25", 2.0)];
        assert_eq!(period_range_text(&series), "1991-92 → 2024-25");
        assert_eq!(period_range_text(&[]), "--");

        assert_eq!(coverage_text(&["1991-92", "2024-25"]), Some("1991–2025".to_string()));
        assert_eq!(coverage_text(&["2024"]), Some("2024".to_string()));
        assert_eq!(coverage_text(&["Q1", "Q2"]), None);
        assert_eq!(coverage_text::<&str>(&[]), None);
    }
}
