//! CAGR and total return over a windowed series.
//!
//! Computed once per window change and handed to the `growth` strategy.

use crate::domain::Observation;
use crate::period::extract_year;
use crate::stats::format::{fixed, SENTINEL};

/// Growth figures for the first and last observation of a window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GrowthSummary {
    /// Compound annual growth rate, in percent.
    pub cagr: Option<f64>,
    /// Total change from first to last value, in percent.
    pub total_return: Option<f64>,
}

impl GrowthSummary {
    pub fn from_series(series: &[Observation]) -> Self {
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return Self::default();
        };
        if series.len() < 2 {
            return Self::default();
        }

        let periods = compounding_periods(series);
        Self {
            cagr: periods.and_then(|n| cagr(first.value, last.value, n)),
            total_return: total_return(first.value, last.value),
        }
    }

    pub fn cagr_text(&self) -> String {
        pct_text(self.cagr)
    }

    pub fn total_return_text(&self) -> String {
        pct_text(self.total_return)
    }
}

fn pct_text(value: Option<f64>) -> String {
    value
        .and_then(|v| fixed(v, 2))
        .map(|s| format!("{s}%"))
        .unwrap_or_else(|| SENTINEL.to_string())
}

/// Number of compounding periods between the first and last observation.
///
/// One period per year when every observation carries its own year and the
/// years strictly increase; otherwise one period per interval (`len - 1`).
/// A trailing synthetic "Latest" point counts as one period past the recorded
/// ones. `None` for fewer than two observations.
pub fn compounding_periods(series: &[Observation]) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    match series.split_last() {
        Some((last, recorded)) if last.is_synthetic() => Some(recorded_periods(recorded) + 1.0),
        _ => Some(recorded_periods(series)),
    }
}

fn recorded_periods(series: &[Observation]) -> f64 {
    let intervals = series.len().saturating_sub(1) as f64;
    let years: Vec<i32> = series.iter().map(|o| extract_year(&o.period_label)).collect();
    let (Some(&first), Some(&last)) = (years.first(), years.last()) else {
        return intervals;
    };
    let yearly = first > 0 && years.windows(2).all(|w| w[1] > w[0]);
    if yearly {
        f64::from(last - first)
    } else {
        intervals
    }
}

/// `((end / start)^(1 / periods) - 1) * 100`.
pub fn cagr(start: f64, end: f64, periods: f64) -> Option<f64> {
    if !(start.is_finite() && end.is_finite()) || start <= 0.0 || periods < 1.0 {
        return None;
    }
    let rate = ((end / start).powf(1.0 / periods) - 1.0) * 100.0;
    rate.is_finite().then_some(rate)
}

/// `((end - start) / start) * 100`.
pub fn total_return(start: f64, end: f64) -> Option<f64> {
    if !(start.is_finite() && end.is_finite()) || start <= 0.0 {
        return None;
    }
    let change = (end - start) / start * 100.0;
    change.is_finite().then_some(change)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cagr_over_a_decade() {
        let series = vec![Observation::new("1991", 100.0), Observation::new("2001", 200.0)];
        let g = GrowthSummary::from_series(&series);
        let cagr = g.cagr.expect("cagr");
        assert!((cagr - 7.18).abs() < 0.01, "got {cagr}");
        assert_eq!(g.cagr_text(), "7.18%");
        assert_eq!(g.total_return_text(), "100.00%");
    }

    #[test]
    fn periods_fall_back_to_intervals_without_years() {
        let series = vec![
            Observation::new("Q1", 100.0),
            Observation::new("Q2", 110.0),
            Observation::new("Q3", 121.0),
        ];
        assert_eq!(compounding_periods(&series), Some(2.0));
        let g = GrowthSummary::from_series(&series);
        assert_eq!(g.cagr_text(), "10.00%");
    }

    #[test]
    fn latest_counts_one_period_past_the_recorded_years() {
        let series = vec![
            Observation::new("2020", 100.0),
            Observation::new("2021", 110.0),
            Observation::synthetic_latest(121.0),
        ];
        assert_eq!(compounding_periods(&series), Some(2.0));

        let decade = vec![Observation::new("1991", 100.0), Observation::new("2001", 200.0)];
        let mut with_latest = decade.clone();
        with_latest.push(Observation::synthetic_latest(210.0));
        let mut with_real = decade;
        with_real.push(Observation::new("2002", 210.0));

        assert_eq!(compounding_periods(&with_latest), Some(11.0));
        let latest = GrowthSummary::from_series(&with_latest);
        assert_eq!(latest.cagr_text(), "6.98%");
        assert_eq!(latest, GrowthSummary::from_series(&with_real));

        let only_latest = vec![Observation::new("2024", 100.0), Observation::synthetic_latest(110.0)];
        assert_eq!(compounding_periods(&only_latest), Some(1.0));
    }

    #[test]
    fn repeated_years_count_intervals() {
        let months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
        let year_2020: Vec<Observation> = months
            .iter()
            .map(|m| Observation::new(format!("{m} 2020"), 100.0))
            .collect();
        assert_eq!(compounding_periods(&year_2020), Some(11.0));

        let mut from_dec_2019 = vec![Observation::new("Dec 2019", 100.0)];
        from_dec_2019.extend(year_2020);
        assert_eq!(compounding_periods(&from_dec_2019), Some(12.0));

        let fiscal = vec![Observation::new("FY 2019-20", 1.0), Observation::new("FY 2023-24", 2.0)];
        assert_eq!(compounding_periods(&fiscal), Some(4.0));
    }

    #[test]
    fn guards_produce_sentinels() {
        let single = vec![Observation::new("2024", 100.0)];
        let g = GrowthSummary::from_series(&single);
        assert_eq!(g.cagr_text(), "--");
        assert_eq!(g.total_return_text(), "--");

        let zero_start = vec![Observation::new("2020", 0.0), Observation::new("2024", 10.0)];
        let g = GrowthSummary::from_series(&zero_start);
        assert_eq!(g.cagr_text(), "--");
        assert_eq!(g.total_return_text(), "--");

        let negative_start = vec![Observation::new("2020", -4.0), Observation::new("2024", 10.0)];
        assert_eq!(GrowthSummary::from_series(&negative_start).cagr, None);

        let nan_end = vec![Observation::new("2020", 4.0), Observation::new("2024", f64::NAN)];
        assert_eq!(GrowthSummary::from_series(&nan_end).total_return_text(), "--");

        assert_eq!(GrowthSummary::from_series(&[]), GrowthSummary::default());
    }

    #[test]
    fn negative_end_value_has_no_real_cagr() {
        assert_eq!(cagr(100.0, -50.0, 2.0), None);
        assert_eq!(total_return(100.0, -50.0), Some(-150.0));
    }
}
