//! # Aggregator
//!
//! Folds the shift rows of a report into the three chart aggregates.
//!
//! ## Fold
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  rows ──► drop GRAND TOTAL ──► for each row:                           │
//! │                                  │                                      │
//! │          ┌───────────────────────┼───────────────────────┐             │
//! │          ▼                       ▼                       ▼             │
//! │  cost_center_* > 0        cash / card sales      total_grand_total     │
//! │  add to bucket            add to payments        push TrendPoint       │
//! │  (display name)                                  (input order)         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - Unparsable / null / absent cells count as zero.
//! - A cost-center cell ≤ 0 is skipped: it neither opens a bucket nor
//!   reduces an existing one.
//! - The trend keeps input order; out-of-order source data gives an
//!   out-of-order line.
//! - Empty input is not an error: empty buckets, zero payments, no trend.

use tracing::debug;

use crate::types::{fields, shift_rows, Aggregates, Row, TrendPoint};
use crate::numeric::to_amount;

/// Aggregates a report's row sequence. Pure and idempotent.
pub fn aggregate(rows: &[Row]) -> Aggregates {
    let shifts = shift_rows(rows);
    let mut aggregates = Aggregates::default();

    for row in &shifts {
        for (name, cell) in row.cost_centers() {
            let amount = to_amount(Some(cell));
            if amount > 0.0 {
                aggregates.cost_centers.add(name, amount);
            }
        }

        aggregates.payments.cash += row.amount(fields::CASH_SALES);
        aggregates.payments.card += row.amount(fields::CARD_SALES);

        aggregates.trend.push(TrendPoint {
            shift_id: row.identity().map(str::to_string),
            date: row.text(fields::POSTING_DATE).map(str::to_string),
            total: row.amount(fields::GRAND_TOTAL),
        });
    }

    debug!(
        rows = rows.len(),
        shift_rows = shifts.len(),
        cost_centers = aggregates.cost_centers.len(),
        cash = aggregates.payments.cash,
        card = aggregates.payments.card,
        trend_points = aggregates.trend.len(),
        "Aggregated report rows"
    );

    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GRAND_TOTAL_LABEL;
    use serde_json::Value;

    fn shift(id: &str, total: f64, cash: f64, card: f64) -> Row {
        Row::new()
            .with(fields::IDENTITY, id)
            .with(fields::GRAND_TOTAL, total)
            .with(fields::CASH_SALES, cash)
            .with(fields::CARD_SALES, card)
    }

    #[test]
    fn test_empty_input() {
        let aggregates = aggregate(&[]);
        assert!(aggregates.cost_centers.is_empty());
        assert_eq!(aggregates.payments.cash, 0.0);
        assert_eq!(aggregates.payments.card, 0.0);
        assert!(aggregates.trend.is_empty());
        assert!(aggregates.is_empty());
    }

    #[test]
    fn test_only_grand_total_row() {
        let rows = vec![shift(GRAND_TOTAL_LABEL, 500.0, 200.0, 300.0)];
        assert_eq!(aggregate(&rows), Aggregates::default());
    }

    #[test]
    fn test_cost_center_names_are_normalized() {
        let rows = vec![shift("S1", 10.0, 10.0, 0.0).with("cost_center_main_dining_hall", 10)];
        let aggregates = aggregate(&rows);
        assert_eq!(aggregates.cost_centers.get("main dining hall"), Some(10.0));
    }

    #[test]
    fn test_non_positive_cost_centers_are_skipped() {
        let rows = vec![
            shift("S1", 0.0, 0.0, 0.0)
                .with("cost_center_A", 0)
                .with("cost_center_B", -20),
            shift("S2", 0.0, 0.0, 0.0).with("cost_center_A", 30),
            shift("S3", 0.0, 0.0, 0.0).with("cost_center_A", -5),
        ];
        let aggregates = aggregate(&rows);
        assert_eq!(aggregates.cost_centers.get("A"), Some(30.0));
        assert_eq!(aggregates.cost_centers.get("B"), None);
        assert_eq!(aggregates.cost_centers.len(), 1);
    }

    #[test]
    fn test_string_and_null_cells() {
        let rows = vec![
            Row::new()
                .with(fields::IDENTITY, "S1")
                .with(fields::CASH_SALES, "12.5")
                .with(fields::CARD_SALES, Value::Null)
                .with(fields::GRAND_TOTAL, "n/a")
                .with("cost_center_Bar", "7"),
            Row::new().with(fields::IDENTITY, "S2"),
        ];
        let aggregates = aggregate(&rows);
        assert_eq!(aggregates.payments.cash, 12.5);
        assert_eq!(aggregates.payments.card, 0.0);
        assert_eq!(aggregates.cost_centers.get("Bar"), Some(7.0));
        assert_eq!(aggregates.trend[0].total, 0.0);
        assert_eq!(aggregates.trend[1].total, 0.0);
    }

    #[test]
    fn test_trend_keeps_input_order() {
        let rows = vec![
            shift("S2", 20.0, 0.0, 0.0).with(fields::POSTING_DATE, "2025-03-02"),
            shift("S1", 10.0, 0.0, 0.0).with(fields::POSTING_DATE, "2025-03-01"),
            shift("S3", 30.0, 0.0, 0.0).with(fields::POSTING_DATE, "2025-03-01"),
        ];
        let trend = aggregate(&rows).trend;
        let ids: Vec<_> = trend.iter().map(|p| p.shift_id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["S2", "S1", "S3"]);
        assert_eq!(trend[2].date.as_deref(), Some("2025-03-01"));
    }

    #[test]
    fn test_cost_center_order_is_first_contribution() {
        let rows = vec![
            shift("S1", 0.0, 0.0, 0.0)
                .with("cost_center_Kitchen", 0)
                .with("cost_center_Bar", 5),
            shift("S2", 0.0, 0.0, 0.0)
                .with("cost_center_Kitchen", 8)
                .with("cost_center_Bar", 5),
        ];
        let aggregates = aggregate(&rows);
        assert_eq!(aggregates.cost_centers.names(), vec!["Bar", "Kitchen"]);
        assert_eq!(aggregates.cost_centers.totals(), vec![10.0, 8.0]);
    }
}
