//! # Summary Calculator
//!
//! Scalar statistics over the shift rows, plus the two-section summary panel
//! shown before exporting.
//!
//! ## Guarded Ratios
//! ```text
//! avg_per_shift   = total_sales / shift_count       (None if shift_count == 0)
//! cash_percentage = total_cash / total_sales * 100  (None if total_sales == 0)
//! ```
//! `None` renders as `N/A`; a NaN or infinity never reaches a formatter.

use serde::Serialize;
use ts_rs::TS;

use crate::currency::CurrencyFormatter;
use crate::types::{fields, shift_rows, Row, SummaryStats};

/// Shown in place of a ratio whose denominator is zero.
pub const NOT_APPLICABLE: &str = "N/A";

/// Computes summary statistics. Pure, total, idempotent.
pub fn summarize(rows: &[Row]) -> SummaryStats {
    let shifts = shift_rows(rows);

    let shift_count = shifts.len();
    let total_sales: f64 = shifts.iter().map(|r| r.amount(fields::GRAND_TOTAL)).sum();
    let total_cash: f64 = shifts.iter().map(|r| r.amount(fields::CASH_SALES)).sum();
    let total_card: f64 = shifts.iter().map(|r| r.amount(fields::CARD_SALES)).sum();

    let avg_per_shift = (shift_count > 0).then(|| total_sales / shift_count as f64);
    let cash_percentage = (total_sales != 0.0).then(|| total_cash / total_sales * 100.0);

    SummaryStats {
        shift_count,
        total_sales,
        total_cash,
        total_card,
        avg_per_shift: avg_per_shift.filter(|v| v.is_finite()),
        cash_percentage: cash_percentage.filter(|v| v.is_finite()),
    }
}

/// Formats an optional amount, `N/A` when absent.
pub fn format_optional_amount(
    amount: Option<f64>,
    formatter: &dyn CurrencyFormatter,
    currency: &str,
) -> String {
    amount
        .map(|a| formatter.format(a, currency))
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

/// `73.3%`, or `N/A`.
pub fn format_percentage(percentage: Option<f64>) -> String {
    percentage
        .map(|p| format!("{:.1}%", p))
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

// =============================================================================
// Summary Panel
// =============================================================================

/// One labelled value in the summary panel.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct PanelLine {
    pub label: String,
    pub value: String,
}

/// A titled group of lines.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct PanelSection {
    pub title: String,
    pub lines: Vec<PanelLine>,
}

/// The export dialog content: performance metrics and payment breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct SummaryPanel {
    pub title: String,
    pub sections: Vec<PanelSection>,
}

impl SummaryPanel {
    /// Looks up a value by section title and line label.
    pub fn value(&self, section: &str, label: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.title == section)?
            .lines
            .iter()
            .find(|l| l.label == label)
            .map(|l| l.value.as_str())
    }
}

fn line(label: &str, value: String) -> PanelLine {
    PanelLine {
        label: label.to_string(),
        value,
    }
}

/// Builds the summary panel for a stats snapshot.
pub fn summary_panel(
    stats: &SummaryStats,
    formatter: &dyn CurrencyFormatter,
    currency: &str,
) -> SummaryPanel {
    SummaryPanel {
        title: "Shift Summary Statistics".to_string(),
        sections: vec![
            PanelSection {
                title: "Performance Metrics".to_string(),
                lines: vec![
                    line("Total Shifts", stats.shift_count.to_string()),
                    line("Total Sales", formatter.format(stats.total_sales, currency)),
                    line(
                        "Average per Shift",
                        format_optional_amount(stats.avg_per_shift, formatter, currency),
                    ),
                ],
            },
            PanelSection {
                title: "Payment Breakdown".to_string(),
                lines: vec![
                    line("Cash Sales", formatter.format(stats.total_cash, currency)),
                    line("Card Sales", formatter.format(stats.total_card, currency)),
                    line("Cash %", format_percentage(stats.cash_percentage)),
                ],
            },
        ],
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::StandardFormatter;
    use crate::types::GRAND_TOTAL_LABEL;

    fn shift(id: &str, total: f64, cash: f64, card: f64) -> Row {
        Row::new()
            .with(fields::IDENTITY, id)
            .with(fields::GRAND_TOTAL, total)
            .with(fields::CASH_SALES, cash)
            .with(fields::CARD_SALES, card)
    }

    #[test]
    fn test_summarize_excludes_grand_total() {
        let rows = vec![
            shift("S1", 100.0, 60.0, 40.0),
            shift("S2", 50.0, 50.0, 0.0),
            shift(GRAND_TOTAL_LABEL, 150.0, 110.0, 40.0),
        ];
        let stats = summarize(&rows);
        assert_eq!(stats.shift_count, 2);
        assert_eq!(stats.total_sales, 150.0);
        assert_eq!(stats.total_cash, 110.0);
        assert_eq!(stats.total_card, 40.0);
        assert_eq!(stats.avg_per_shift, Some(75.0));
        let pct = stats.cash_percentage.unwrap();
        assert!((pct - 73.333).abs() < 0.001);
    }

    #[test]
    fn test_summarize_empty_is_guarded() {
        let stats = summarize(&[]);
        assert_eq!(stats.shift_count, 0);
        assert_eq!(stats.total_sales, 0.0);
        assert_eq!(stats.avg_per_shift, None);
        assert_eq!(stats.cash_percentage, None);
    }

    #[test]
    fn test_zero_sales_guards_percentage_only() {
        let rows = vec![shift("S1", 0.0, 0.0, 0.0)];
        let stats = summarize(&rows);
        assert_eq!(stats.avg_per_shift, Some(0.0));
        assert_eq!(stats.cash_percentage, None);
    }

    #[test]
    fn test_missing_fields_count_as_zero() {
        let rows = vec![Row::new().with(fields::IDENTITY, "S1")];
        let stats = summarize(&rows);
        assert_eq!(stats.shift_count, 1);
        assert_eq!(stats.total_sales, 0.0);
    }

    #[test]
    fn test_summary_panel() {
        let rows = vec![shift("S1", 100.0, 60.0, 40.0), shift("S2", 50.0, 50.0, 0.0)];
        let panel = summary_panel(&summarize(&rows), &StandardFormatter, "USD");

        assert_eq!(panel.value("Performance Metrics", "Total Shifts"), Some("2"));
        assert_eq!(panel.value("Performance Metrics", "Total Sales"), Some("$150.00"));
        assert_eq!(
            panel.value("Performance Metrics", "Average per Shift"),
            Some("$75.00")
        );
        assert_eq!(panel.value("Payment Breakdown", "Cash %"), Some("73.3%"));
    }

    #[test]
    fn test_summary_panel_guarded_values() {
        let panel = summary_panel(&summarize(&[]), &StandardFormatter, "USD");
        assert_eq!(panel.value("Performance Metrics", "Average per Shift"), Some("N/A"));
        assert_eq!(panel.value("Payment Breakdown", "Cash %"), Some("N/A"));
    }
}
