//! Number formatting for stat cards.
//!
//! Every helper returns `None` for values that cannot be shown (NaN,
//! infinities, guarded divisions); [`or_sentinel`] turns that into `"--"`.

use num_format::{Locale, ToFormattedString};

/// Displayed in place of any value that cannot be computed.
pub const SENTINEL: &str = "--";

/// At most this many fractional digits are shown for grouped numbers.
const GROUPED_MAX_FRACTION: usize = 3;

/// Fixed-point rendering, e.g. `fixed(8.2, 2) == "8.20"`.
pub fn fixed(value: f64, decimals: usize) -> Option<String> {
    value.is_finite().then(|| format!("{value:.decimals$}"))
}

/// Indian digit grouping (`63,03,630`) with up to three fractional digits and
/// no trailing zeros, the way the site renders large magnitudes.
pub fn grouped(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    let text = format!("{:.prec$}", value.abs(), prec = GROUPED_MAX_FRACTION);
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let int_grouped = match int_part.parse::<u128>() {
        Ok(n) => n.to_formatted_string(&Locale::en_IN),
        Err(_) => int_part.to_string(),
    };

    let is_zero = int_grouped == "0" && frac.is_empty();
    let mut out = String::with_capacity(int_grouped.len() + frac.len() + 2);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&int_grouped);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    Some(out)
}

/// Percentage change from `from` to `to`.
///
/// `None` when the baseline is not strictly positive or either side is not
/// finite.
pub fn pct_change(from: f64, to: f64) -> Option<f64> {
    if !(from.is_finite() && to.is_finite()) || from <= 0.0 {
        return None;
    }
    let change = (to - from) / from * 100.0;
    change.is_finite().then_some(change)
}

/// `"12.5%"` style rendering of an already-computed percentage.
pub fn percent(value: Option<f64>, decimals: usize) -> String {
    value
        .and_then(|v| fixed(v, decimals))
        .map(|s| format!("{s}%"))
        .unwrap_or_else(|| SENTINEL.to_string())
}

/// Attach a unit to a rendered value.
///
/// `spaced` puts a single space between number and unit (`"1,200 ₹ crore"`);
/// otherwise the unit is glued on (`"8.20%"`). Sentinels never carry a unit.
pub fn with_unit(value: Option<String>, unit: &str, spaced: bool) -> String {
    match value {
        None => SENTINEL.to_string(),
        Some(v) if unit.is_empty() => v,
        Some(v) if spaced => format!("{v} {unit}"),
        Some(v) => format!("{v}{unit}"),
    }
}

pub fn or_sentinel(value: Option<String>) -> String {
    value.unwrap_or_else(|| SENTINEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_rejects_non_finite() {
        assert_eq!(fixed(8.2, 2).as_deref(), Some("8.20"));
        assert_eq!(fixed(f64::NAN, 2), None);
        assert_eq!(fixed(f64::INFINITY, 1), None);
    }

    #[test]
    fn grouped_uses_indian_digit_groups() {
        assert_eq!(grouped(6303630.0).as_deref(), Some("63,03,630"));
        assert_eq!(grouped(163001.0).as_deref(), Some("1,63,001"));
        assert_eq!(grouped(999.0).as_deref(), Some("999"));
        assert_eq!(grouped(1234.5).as_deref(), Some("1,234.5"));
        assert_eq!(grouped(82.123456).as_deref(), Some("82.123"));
        assert_eq!(grouped(-12345.0).as_deref(), Some("-12,345"));
        assert_eq!(grouped(0.0).as_deref(), Some("0"));
        assert_eq!(grouped(f64::NAN), None);
    }

    #[test]
    fn pct_change_guards_baseline() {
        assert_eq!(pct_change(100.0, 150.0), Some(50.0));
        assert_eq!(pct_change(0.0, 150.0), None);
        assert_eq!(pct_change(-5.0, 150.0), None);
        assert_eq!(pct_change(100.0, f64::NAN), None);
    }

    #[test]
    fn units_and_sentinels() {
        assert_eq!(with_unit(Some("8.20".into()), "%", false), "8.20%");
        assert_eq!(with_unit(Some("1,200".into()), "₹ crore", true), "1,200 ₹ crore");
        assert_eq!(with_unit(Some("1,200".into()), "", true), "1,200");
        assert_eq!(with_unit(None, "%", false), "--");
        assert_eq!(percent(Some(12.345), 1), "12.3%");
        assert_eq!(percent(None, 1), "--");
    }
}
