//! "About this metric" text shown under each chart.

use crate::domain::MetricBehavior;

/// Formula, one-line explanation and reading hints for a behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricAbout {
    pub formula: &'static str,
    pub explanation: &'static str,
    pub explore: &'static [&'static str],
}

impl MetricBehavior {
    pub fn about(self) -> MetricAbout {
        about(self)
    }
}

pub fn about(behavior: MetricBehavior) -> MetricAbout {
    match behavior {
        MetricBehavior::Growth => MetricAbout {
            formula: "CAGR = [(Ending Value / Starting Value) ^ (1 / Years)] − 1",
            explanation: "CAGR shows the long-term annual growth rate of a metric, smoothing out short-term fluctuations.",
            explore: &[
                "Choose 5Y / 10Y / Custom to compare long-term phases.",
                "Adjust Start–End years to re-evaluate growth periods.",
                "Enter the latest value (optional) to recalculate returns.",
            ],
        },
        MetricBehavior::Value => MetricAbout {
            formula: "Value = As reported by the official source.",
            explanation: "This dataset represents reported values over time. Growth patterns should be interpreted using the chart and filters, not CAGR.",
            explore: &[
                "Use custom date filters to explore different periods.",
                "Track short-term spikes or declines using period-over-period changes.",
                "Compare early vs recent values to understand scale changes.",
            ],
        },
        MetricBehavior::Rate => MetricAbout {
            formula: "Interest Rate = Annual return offered for the period.",
            explanation: "Shows how official rates set by the central bank or government changed over time.",
            explore: &[
                "Use time filters to compare old vs new rate regimes.",
                "Observe policy-driven rate cuts or hikes.",
            ],
        },
        MetricBehavior::Index => MetricAbout {
            formula: "Index = (Current Value / Base Year Value) × 100",
            explanation: "Indexes show change relative to a base year, commonly used for prices or fiscal indicators.",
            explore: &[
                "Switch time ranges to analyze inflationary or deflationary phases.",
                "Identify major economic event impacts on the index.",
            ],
        },
        MetricBehavior::Ratio => MetricAbout {
            formula: "Ratio = Numerator / Denominator × 100",
            explanation: "Represents proportional change between two variables.",
            explore: &[
                "Analyze shifts during economic cycles.",
                "Identify periods of fiscal tightening or loosening.",
            ],
        },
        MetricBehavior::Forex => MetricAbout {
            formula: "Exchange Rate = ₹ per foreign currency unit",
            explanation: "Shows how the rupee has strengthened or weakened against other currencies.",
            explore: &[
                "Compare long-term depreciation trends.",
                "Spot sharp movements around global events.",
            ],
        },
        MetricBehavior::Trade => MetricAbout {
            formula: "Growth = [(Latest − Start) / Start] × 100",
            explanation: "Shows the evolution of trade metrics, measured in volume or value.",
            explore: &[
                "Use the dataset selector for quantity/value comparison.",
                "Track how exports/imports responded to global cycles.",
            ],
        },
        // Stocks have no dedicated copy on the site.
        MetricBehavior::Stock => MetricAbout {
            formula: "Value = As reported by the official source.",
            explanation: "Represents data published directly by government or authoritative sources.",
            explore: &[
                "Use time filters to explore patterns.",
                "Compare early vs recent periods for changes.",
            ],
        },
    }
}
