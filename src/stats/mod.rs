//! Metric strategy dispatch: windowed series → ordered stat cards.
//!
//! Each [`MetricBehavior`] maps to one strategy producing two numeric cards;
//! every strategy is followed by the same `Years` card. The card labels are
//! fixed per behavior, so the output shape never depends on the data:
//! an empty or single-point series yields the same three cards with `"--"`
//! in the numeric slots.
//!
//! Values are taken in chronological order with NaN entries preserved;
//! strategies that work on "valid values" filter non-finite entries
//! themselves.

pub mod about;
pub mod format;
pub mod growth;

pub use about::{about, MetricAbout};
pub use growth::GrowthSummary;

use crate::domain::{MetricBehavior, Observation, StatCard};
use crate::period::period_range_text;

use format::{fixed, grouped, or_sentinel, pct_change, percent, with_unit, SENTINEL};

/// Label of the trailing range card.
pub const YEARS_LABEL: &str = "Years";

/// Stat cards for a behavior given as a raw tag.
///
/// Unknown or empty tags fall back to the `value` strategy.
pub fn compute_stats(series: &[Observation], behavior: &str, unit: &str) -> Vec<StatCard> {
    compute_cards(series, MetricBehavior::resolve(Some(behavior)), unit)
}

/// Stat cards for an already-resolved behavior.
pub fn compute_cards(series: &[Observation], behavior: MetricBehavior, unit: &str) -> Vec<StatCard> {
    let [first_label, second_label] = card_labels(behavior);
    let range_text = period_range_text(series);

    let [first, second] = if series.len() < 2 {
        [SENTINEL.to_string(), SENTINEL.to_string()]
    } else {
        let inputs = StatInputs::new(series, unit);
        match behavior {
            MetricBehavior::Growth => growth(&inputs),
            MetricBehavior::Rate => rate(&inputs),
            MetricBehavior::Index => index(&inputs),
            MetricBehavior::Stock => stock(&inputs),
            MetricBehavior::Ratio => ratio(&inputs),
            MetricBehavior::Forex => forex(&inputs),
            MetricBehavior::Trade => trade(&inputs),
            MetricBehavior::Value => value(&inputs),
        }
    };

    vec![
        StatCard::new(first_label, first),
        StatCard::new(second_label, second),
        StatCard::new(YEARS_LABEL, range_text),
    ]
}

/// Labels of the two numeric cards for a behavior.
pub fn card_labels(behavior: MetricBehavior) -> [&'static str; 2] {
    match behavior {
        MetricBehavior::Growth => ["CAGR", "Total Return"],
        MetricBehavior::Rate => ["Max", "Average"],
        MetricBehavior::Index => ["Latest FY Index", "Change Since Base"],
        MetricBehavior::Stock => ["Latest", "Growth Since Start"],
        MetricBehavior::Ratio => ["Max", "Min"],
        MetricBehavior::Forex => ["Latest FY Rate", "YoY Change"],
        MetricBehavior::Trade => ["Max", "Growth Since Start"],
        MetricBehavior::Value => ["Max", "Average"],
    }
}

/// Shared inputs handed to every strategy.
struct StatInputs<'a> {
    values: Vec<f64>,
    valid: Vec<f64>,
    growth: GrowthSummary,
    unit: &'a str,
}

impl<'a> StatInputs<'a> {
    fn new(series: &[Observation], unit: &'a str) -> Self {
        let values = series.iter().map(|o| o.value).collect();
        let valid = series.iter().filter(|o| o.is_valid()).map(|o| o.value).collect();
        Self {
            values,
            valid,
            growth: GrowthSummary::from_series(series),
            unit,
        }
    }

    fn max(&self) -> Option<f64> {
        self.valid.iter().copied().reduce(f64::max)
    }

    fn min(&self) -> Option<f64> {
        self.valid.iter().copied().reduce(f64::min)
    }

    fn mean(&self) -> Option<f64> {
        if self.valid.is_empty() {
            return None;
        }
        Some(self.valid.iter().sum::<f64>() / self.valid.len() as f64)
    }

    /// First and last valid values, when at least two exist.
    fn valid_ends(&self) -> Option<(f64, f64)> {
        match self.valid.as_slice() {
            [first, .., last] => Some((*first, *last)),
            _ => None,
        }
    }

    fn last_two_valid(&self) -> Option<(f64, f64)> {
        match self.valid.as_slice() {
            [.., prev, last] => Some((*prev, *last)),
            _ => None,
        }
    }

    fn spaced(&self, value: Option<String>) -> String {
        with_unit(value, self.unit, true)
    }

    fn tight(&self, value: Option<String>) -> String {
        with_unit(value, self.unit, false)
    }
}

fn growth(i: &StatInputs<'_>) -> [String; 2] {
    [i.growth.cagr_text(), i.growth.total_return_text()]
}

fn rate(i: &StatInputs<'_>) -> [String; 2] {
    [
        i.tight(i.max().and_then(|v| fixed(v, 2))),
        i.tight(i.mean().and_then(|v| fixed(v, 2))),
    ]
}

// Uses raw first/last values: a missing endpoint shows as "--".
fn index(i: &StatInputs<'_>) -> [String; 2] {
    let first = i.values.first().copied().unwrap_or(f64::NAN);
    let last = i.values.last().copied().unwrap_or(f64::NAN);
    [
        i.spaced(grouped(last)),
        percent(pct_change(first, last), 1),
    ]
}

fn stock(i: &StatInputs<'_>) -> [String; 2] {
    [
        i.spaced(i.valid.last().and_then(|v| grouped(*v))),
        percent(i.valid_ends().and_then(|(a, b)| pct_change(a, b)), 1),
    ]
}

fn ratio(i: &StatInputs<'_>) -> [String; 2] {
    [
        i.tight(i.max().and_then(|v| fixed(v, 2))),
        i.tight(i.min().and_then(|v| fixed(v, 2))),
    ]
}

fn forex(i: &StatInputs<'_>) -> [String; 2] {
    [
        i.spaced(i.valid.last().and_then(|v| fixed(*v, 2))),
        percent(i.last_two_valid().and_then(|(a, b)| pct_change(a, b)), 2),
    ]
}

fn trade(i: &StatInputs<'_>) -> [String; 2] {
    [
        i.spaced(i.max().and_then(grouped)),
        percent(i.valid_ends().and_then(|(a, b)| pct_change(a, b)), 1),
    ]
}

fn value(i: &StatInputs<'_>) -> [String; 2] {
    [
        i.spaced(i.max().and_then(grouped)),
        i.spaced(i.mean().and_then(|v| fixed(v, 2))),
    ]
}

/// Compact `"label: value"` digest of the last `limit` observations, oldest
/// first.
pub fn recent_summary(series: &[Observation], limit: usize) -> String {
    let start = series.len().saturating_sub(limit);
    series[start..]
        .iter()
        .map(|o| format!("{}: {}", o.period_label, or_sentinel(grouped(o.value))))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(&str, f64)]) -> Vec<Observation> {
        points.iter().map(|(l, v)| Observation::new(*l, *v)).collect()
    }

    fn values(cards: &[StatCard]) -> Vec<&str> {
        cards.iter().map(|c| c.value.as_str()).collect()
    }

    #[test]
    fn growth_cards() {
        let s = series(&[("1991", 100.0), ("2001", 200.0)]);
        let cards = compute_cards(&s, MetricBehavior::Growth, "₹");
        assert_eq!(cards[0], StatCard::new("CAGR", "7.18%"));
        assert_eq!(cards[1], StatCard::new("Total Return", "100.00%"));
        assert_eq!(cards[2], StatCard::new("Years", "1991 → 2001"));
    }

    #[test]
    fn rate_ignores_nan() {
        let s = series(&[("2024", f64::NAN), ("2025", 8.2)]);
        let cards = compute_stats(&s, "rate", "%");
        assert_eq!(values(&cards), vec!["8.20%", "8.20%", "2024 → 2025"]);
    }

    #[test]
    fn index_uses_raw_endpoints() {
        let s = series(&[("2012", 100.0), ("2018", 140.0), ("2024", 187.5)]);
        let cards = compute_cards(&s, MetricBehavior::Index, "pts");
        assert_eq!(cards[0], StatCard::new("Latest FY Index", "187.5 pts"));
        assert_eq!(cards[1], StatCard::new("Change Since Base", "87.5%"));

        let gap = series(&[("2012", 100.0), ("2024", f64::NAN)]);
        let cards = compute_cards(&gap, MetricBehavior::Index, "pts");
        assert_eq!(values(&cards)[..2], ["--", "--"]);
    }

    #[test]
    fn stock_uses_valid_endpoints() {
        let s = series(&[("2020", 1000.0), ("2021", 1500.0), ("2022", f64::NAN)]);
        let cards = compute_cards(&s, MetricBehavior::Stock, "tonnes");
        assert_eq!(values(&cards)[..2], ["1,500 tonnes", "50.0%"]);
    }

    #[test]
    fn ratio_reports_max_and_min() {
        let s = series(&[("2020", 48.1), ("2021", 52.6), ("2022", 50.0)]);
        let cards = compute_cards(&s, MetricBehavior::Ratio, "%");
        assert_eq!(values(&cards)[..2], ["52.60%", "48.10%"]);
    }

    #[test]
    fn forex_reports_yoy_change_between_last_two_valid() {
        let s = series(&[("2022", 80.0), ("2023", 82.0), ("2024", f64::NAN), ("2025", 86.1)]);
        let cards = compute_cards(&s, MetricBehavior::Forex, "₹/USD");
        assert_eq!(cards[0], StatCard::new("Latest FY Rate", "86.10 ₹/USD"));
        assert_eq!(cards[1], StatCard::new("YoY Change", "5.00%"));
    }

    #[test]
    fn trade_and_value_group_large_numbers() {
        let s = series(&[("2020", 120000.0), ("2021", 150000.0)]);
        let trade = compute_cards(&s, MetricBehavior::Trade, "tonnes");
        assert_eq!(values(&trade)[..2], ["1,50,000 tonnes", "25.0%"]);

        let value = compute_cards(&s, MetricBehavior::Value, "₹ crore");
        assert_eq!(values(&value)[..2], ["1,50,000 ₹ crore", "135000.00 ₹ crore"]);
    }

    #[test]
    fn zero_baseline_is_guarded() {
        let s = series(&[("2020", 0.0), ("2021", 10.0)]);
        for b in [MetricBehavior::Index, MetricBehavior::Stock, MetricBehavior::Trade] {
            let cards = compute_cards(&s, b, "");
            assert_eq!(cards[1].value, "--", "{b}");
        }
    }

    #[test]
    fn all_nan_series_yields_sentinels() {
        let s = series(&[("2020", f64::NAN), ("2021", f64::NAN)]);
        for b in MetricBehavior::ALL {
            let cards = compute_cards(&s, b, "%");
            assert_eq!(values(&cards)[..2], ["--", "--"], "{b}");
        }
    }

    #[test]
    fn empty_and_single_point_series_keep_the_shape() {
        for b in MetricBehavior::ALL {
            let empty = compute_cards(&[], b, "%");
            assert_eq!(empty.len(), 3);
            assert_eq!(values(&empty), vec!["--", "--", "--"]);

            let single = compute_cards(&series(&[("2024", 5.0)]), b, "%");
            assert_eq!(values(&single), vec!["--", "--", "2024 → 2024"]);
            assert_eq!(single[0].label, card_labels(b)[0]);
        }
    }

    #[test]
    fn unknown_tag_matches_value_strategy() {
        let s = series(&[("2020", 10.0), ("2021", 12.0)]);
        assert_eq!(compute_stats(&s, "unknown-tag", "₹"), compute_stats(&s, "value", "₹"));
        assert_eq!(compute_stats(&s, "", "₹"), compute_stats(&s, "value", "₹"));
    }

    #[test]
    fn recent_summary_lists_tail_oldest_first() {
        let s = series(&[("2021", 1.0), ("2022", 2500.0), ("2023", f64::NAN)]);
        assert_eq!(recent_summary(&s, 2), "2022: 2,500, 2023: --");
        assert_eq!(recent_summary(&s, 40), "2021: 1, 2022: 2,500, 2023: --");
        assert_eq!(recent_summary(&[], 40), "");
    }
}
