//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the statistics code stays clean and testable
//! - output changes are localized

use crate::domain::{Graph, StatCard};
use crate::io::ingest::RowError;
use crate::period::{extract_year, extract_year_range};
use crate::report::DatasetReport;
use crate::stats::recent_summary;

/// Graph title block.
pub fn format_graph_header(graph: &Graph) -> String {
    let title = [graph.title.as_str(), graph.slug.as_str()]
        .into_iter()
        .find(|s| !s.trim().is_empty())
        .unwrap_or("Untitled graph");

    let mut out = format!("=== {title} ===\n");
    if !graph.category.is_empty() {
        out.push_str(&format!("Category: {}\n", graph.category));
    }
    if !graph.source.is_empty() {
        out.push_str(&format!("Source: {}\n", graph.source));
    }
    if !graph.description.is_empty() {
        out.push_str(&format!("{}\n", graph.description.trim()));
    }
    out
}

/// Options for [`format_dataset_report`].
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub show_about: bool,
    pub show_recent: bool,
    pub recent_limit: usize,
}

/// One dataset: heading, window notes, stat cards and optional extras.
pub fn format_dataset_report(report: &DatasetReport, opts: ReportOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n--- {} [{}] (id {}) ---\n",
        report.display_name, report.behavior, report.dataset_id
    ));
    if let Some(coverage) = &report.coverage {
        out.push_str(&format!("Coverage: {coverage}\n"));
    }
    out.push_str(&format!("Points in window: {}\n", report.windowed.len()));

    if let Some(issue) = &report.windowed.issue {
        out.push_str(&format!("! {issue} Showing the full series.\n"));
    }
    if report.latest_ignored {
        out.push_str("! This dataset does not accept a latest value; ignored.\n");
    }

    out.push_str(&format_cards(&report.cards));

    if opts.show_recent {
        let digest = recent_summary(&report.windowed.series, opts.recent_limit);
        if !digest.is_empty() {
            out.push_str(&format!("Recent: {digest}\n"));
        }
    }

    if opts.show_about {
        let about = report.behavior.about();
        out.push_str("\nAbout this metric:\n");
        out.push_str(&format!("  {}\n", about.formula));
        out.push_str(&format!("  {}\n", about.explanation));
        for hint in about.explore {
            out.push_str(&format!("  - {hint}\n"));
        }
    }

    out
}

/// Two-column card table, labels left-aligned to the longest label.
pub fn format_cards(cards: &[StatCard]) -> String {
    let label_width = cards
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for card in cards {
        let pad = label_width - card.label.chars().count();
        out.push_str(&format!("  {}{}  {}\n", card.label, " ".repeat(pad), card.value));
    }
    out
}

/// Skipped ingest rows, one per line.
pub fn format_row_errors(errors: &[RowError]) -> String {
    let mut out = String::new();
    if errors.is_empty() {
        return out;
    }
    out.push_str(&format!("Skipped {} row(s):\n", errors.len()));
    for err in errors {
        match &err.label {
            Some(label) => out.push_str(&format!("  line {} ({label}): {}\n", err.line, err.message)),
            None => out.push_str(&format!("  line {}: {}\n", err.line, err.message)),
        }
    }
    out
}

/// Year keys recovered from each label (`gstat range`).
pub fn format_year_table<S: AsRef<str>>(labels: &[S]) -> String {
    let label_width = labels
        .iter()
        .map(|l| l.as_ref().chars().count())
        .chain(std::iter::once("label".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<label_width$}  {:>6}  {:>6}  {:>6}\n",
        "label", "year", "start", "end"
    ));

    for label in labels {
        let label = label.as_ref();
        let range = extract_year_range(label);
        let pad = label_width - label.chars().count();
        out.push_str(&format!(
            "{label}{}  {:>6}  {:>6}  {:>6}\n",
            " ".repeat(pad),
            extract_year(label),
            opt_year(range.start),
            opt_year(range.end),
        ));
    }
    out
}

fn opt_year(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MetricBehavior, Observation};
    use crate::window::{WindowIssue, Windowed};

    fn report() -> DatasetReport {
        DatasetReport {
            dataset_id: 2,
            display_name: "Repo rate (%)".to_string(),
            unit: "%".to_string(),
            behavior: MetricBehavior::Rate,
            coverage: Some("2001–2024".to_string()),
            windowed: Windowed {
                series: vec![Observation::new("2023", 6.5), Observation::new("2024", 6.5)],
                issue: Some(WindowIssue::EndBeforeStart),
            },
            cards: vec![
                StatCard::new("Max", "6.50%"),
                StatCard::new("Average", "6.50%"),
                StatCard::new("Years", "2023 → 2024"),
            ],
            latest_ignored: false,
        }
    }

    #[test]
    fn cards_are_aligned() {
        let txt = format_cards(&report().cards);
        assert_eq!(txt, "  Max      6.50%\n  Average  6.50%\n  Years    2023 → 2024\n");
    }

    #[test]
    fn dataset_report_mentions_window_issue_and_about() {
        let opts = ReportOptions {
            show_about: true,
            show_recent: true,
            recent_limit: 1,
        };
        let txt = format_dataset_report(&report(), opts);
        assert!(txt.contains("--- Repo rate (%) [rate] (id 2) ---"));
        assert!(txt.contains("Coverage: 2001–2024"));
        assert!(txt.contains("! End year cannot be earlier than start year."));
        assert!(txt.contains("Recent: 2024: 6.5\n"));
        assert!(txt.contains("Interest Rate = Annual return offered for the period."));

        let quiet = ReportOptions {
            show_about: false,
            show_recent: false,
            recent_limit: 40,
        };
        let txt = format_dataset_report(&report(), quiet);
        assert!(!txt.contains("About this metric"));
        assert!(!txt.contains("Recent:"));
    }

    #[test]
    fn header_falls_back_to_slug() {
        let graph = Graph {
            slug: "repo-rate".to_string(),
            source: "RBI".to_string(),
            ..Graph::default()
        };
        assert_eq!(format_graph_header(&graph), "=== repo-rate ===\nSource: RBI\n");
    }

    #[test]
    fn year_table_lists_keys() {
        let txt = format_year_table(&["FY 2020-21", "misc"]);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "label         year   start     end");
        assert_eq!(lines[1], "FY 2020-21    2020    2020    2021");
        assert_eq!(lines[2], "misc             0      --      --");
    }

    #[test]
    fn row_errors_listing() {
        let errors = vec![RowError {
            line: 3,
            label: None,
            message: "Missing required value: `period_label`".to_string(),
        }];
        assert_eq!(
            format_row_errors(&errors),
            "Skipped 1 row(s):\n  line 3: Missing required value: `period_label`\n"
        );
        assert_eq!(format_row_errors(&[]), "");
    }
}
