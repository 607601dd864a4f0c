//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observations: `o`
//! - the reader's synthetic latest value: `*`
//! - line between consecutive finite points: `-`
//!
//! NaN values are not drawn and break the line, so gaps stay visible.

use crate::domain::Observation;

/// Render a windowed series, one column slot per observation.
pub fn render_series_plot(series: &[Observation], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return "Plot: no data\n".to_string();
    };

    let (y_min, y_max) = y_range(series).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    let x_max = series.len().saturating_sub(1) as f64;

    let cells: Vec<Option<(usize, usize)>> = series
        .iter()
        .enumerate()
        .map(|(i, o)| {
            o.value
                .is_finite()
                .then(|| (map_x(i as f64, 0.0, x_max, width), map_y(o.value, y_min, y_max, height)))
        })
        .collect();

    // Lines first so points overlay them.
    for pair in cells.windows(2) {
        if let [Some((x0, y0)), Some((x1, y1))] = pair {
            draw_line(&mut grid, *x0, *y0, *x1, *y1, '-');
        }
    }

    for (obs, cell) in series.iter().zip(&cells) {
        if let Some((x, y)) = cell {
            grid[*y][*x] = if obs.is_synthetic() { '*' } else { 'o' };
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} → {} | y=[{y_min:.2}, {y_max:.2}]\n",
        first.period_label, last.period_label
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out.push_str(&axis_labels(&first.period_label, &last.period_label, width));
    out.push('\n');
    out
}

/// First label flush left, last label flush right, when both fit.
fn axis_labels(first: &str, last: &str, width: usize) -> String {
    let used = first.chars().count() + last.chars().count();
    if first == last || used + 1 > width {
        return first.to_string();
    }
    format!("{first}{}{last}", " ".repeat(width - used))
}

fn y_range(series: &[Observation]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for o in series.iter().filter(|o| o.value.is_finite()) {
        min_y = min_y.min(o.value);
        max_y = max_y.max(o.value);
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        return None;
    }
    if max_y > min_y {
        Some((min_y, max_y))
    } else {
        // Flat series: centre it.
        Some((min_y - 1.0, max_y + 1.0))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    if t_max <= t_min {
        return 0;
    }
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
