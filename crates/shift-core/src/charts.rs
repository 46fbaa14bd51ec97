//! # Chart Preparation
//!
//! Converts aggregates into renderer-ready series. The charting widget is a
//! black box: it receives a [`ChartSet`] and draws it.
//!
//! ## Panels
//! ```text
//! ┌───────────────────────────────┬───────────────────────────────┐
//! │  Cost Centers (doughnut)      │  Cash vs Card (pie)           │
//! │  ─────────────────────────    │  ─────────────────────────    │
//! │  cost-center totals           │  cash > 0 || card > 0         │
//! │  └─ else totals by profile    │  └─ else placeholder          │
//! │     └─ else placeholder       │                               │
//! ├───────────────────────────────┴───────────────────────────────┤
//! │  Shift Performance Trend (line)                               │
//! │  one point per shift, input order; else placeholder           │
//! └───────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::types::{fields, shift_rows, Aggregates, Row};

/// Colours cycled over doughnut and pie slices.
pub const PALETTE: [&str; 8] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#FF6384", "#C9CBCF",
];

/// Label used when a row has no POS profile.
pub const UNKNOWN_PROFILE: &str = "Unknown Profile";

pub const NO_SALES_DATA: &str = "No sales data available";
pub const NO_PAYMENT_DATA: &str = "No payment data available";
pub const NO_TREND_DATA: &str = "No trend data available";

/// Kind of chart to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Doughnut,
    Pie,
    Line,
}

/// One drawable series.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub title: String,
    /// Dataset label (legend entry for line charts).
    pub dataset_label: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Slice colours; empty for line charts.
    pub colors: Vec<String>,
}

/// A chart, or the message shown in its place.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ChartPanel {
    Ready(ChartSeries),
    Placeholder(String),
}

impl ChartPanel {
    pub fn series(&self) -> Option<&ChartSeries> {
        match self {
            ChartPanel::Ready(series) => Some(series),
            ChartPanel::Placeholder(_) => None,
        }
    }
}

/// The three panels of the chart view.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ChartSet {
    pub cost_centers: ChartPanel,
    pub payments: ChartPanel,
    pub trend: ChartPanel,
}

/// Builds the chart panels for `rows` from their precomputed `aggregates`.
///
/// `currency` only labels the trend dataset.
pub fn prepare_charts(rows: &[Row], aggregates: &Aggregates, currency: &str) -> ChartSet {
    ChartSet {
        cost_centers: cost_center_panel(rows, aggregates),
        payments: payment_panel(aggregates),
        trend: trend_panel(aggregates, currency),
    }
}

fn palette(len: usize) -> Vec<String> {
    PALETTE
        .iter()
        .cycle()
        .take(len)
        .map(|c| c.to_string())
        .collect()
}

fn cost_center_panel(rows: &[Row], aggregates: &Aggregates) -> ChartPanel {
    if !aggregates.cost_centers.is_empty() {
        let labels = aggregates.cost_centers.names();
        return ChartPanel::Ready(ChartSeries {
            kind: ChartKind::Doughnut,
            title: "Sales by Cost Center".to_string(),
            dataset_label: None,
            colors: palette(labels.len()),
            labels,
            values: aggregates.cost_centers.totals(),
        });
    }

    let by_profile = profile_totals(rows);
    if by_profile.is_empty() {
        return ChartPanel::Placeholder(NO_SALES_DATA.to_string());
    }

    let (labels, values): (Vec<String>, Vec<f64>) = by_profile.into_iter().unzip();
    ChartPanel::Ready(ChartSeries {
        kind: ChartKind::Doughnut,
        title: "Sales by POS Profile".to_string(),
        dataset_label: None,
        colors: palette(labels.len()),
        labels,
        values,
    })
}

/// Grand totals per POS profile, first-seen order, positive totals only.
pub fn profile_totals(rows: &[Row]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();

    for row in shift_rows(rows) {
        let total = row.amount(fields::GRAND_TOTAL);
        if total <= 0.0 {
            continue;
        }

        let profile = row
            .text(fields::POS_PROFILE)
            .filter(|p| !p.is_empty())
            .unwrap_or(UNKNOWN_PROFILE);

        match totals.iter_mut().find(|(name, _)| name == profile) {
            Some((_, sum)) => *sum += total,
            None => totals.push((profile.to_string(), total)),
        }
    }

    totals
}

fn payment_panel(aggregates: &Aggregates) -> ChartPanel {
    if !aggregates.payments.has_sales() {
        return ChartPanel::Placeholder(NO_PAYMENT_DATA.to_string());
    }

    ChartPanel::Ready(ChartSeries {
        kind: ChartKind::Pie,
        title: "Payment Methods Distribution".to_string(),
        dataset_label: None,
        labels: vec!["Cash Sales".to_string(), "Card Sales".to_string()],
        values: vec![aggregates.payments.cash, aggregates.payments.card],
        colors: palette(2),
    })
}

fn trend_panel(aggregates: &Aggregates, currency: &str) -> ChartPanel {
    if aggregates.trend.is_empty() {
        return ChartPanel::Placeholder(NO_TREND_DATA.to_string());
    }

    ChartPanel::Ready(ChartSeries {
        kind: ChartKind::Line,
        title: "Daily Shift Performance".to_string(),
        dataset_label: Some(format!("Shift Total ({})", currency)),
        labels: aggregates
            .trend
            .iter()
            .map(|p| p.date.clone().unwrap_or_default())
            .collect(),
        values: aggregates.trend.iter().map(|p| p.total).collect(),
        colors: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::types::GRAND_TOTAL_LABEL;

    fn charts(rows: &[Row]) -> ChartSet {
        prepare_charts(rows, &aggregate(rows), "QAR")
    }

    #[test]
    fn test_cost_center_doughnut() {
        let rows = vec![
            Row::new()
                .with(fields::IDENTITY, "S1")
                .with("cost_center_Main_Hall", 100)
                .with("cost_center_Bar", 40),
            Row::new().with(fields::IDENTITY, "S2").with("cost_center_Bar", 10),
        ];
        let set = charts(&rows);
        let series = set.cost_centers.series().unwrap();
        assert_eq!(series.title, "Sales by Cost Center");
        assert_eq!(series.labels, vec!["Main Hall", "Bar"]);
        assert_eq!(series.values, vec![100.0, 50.0]);
        assert_eq!(series.colors, vec!["#FF6384", "#36A2EB"]);
    }

    #[test]
    fn test_profile_fallback() {
        let rows = vec![
            Row::new()
                .with(fields::IDENTITY, "S1")
                .with(fields::POS_PROFILE, "Counter")
                .with(fields::GRAND_TOTAL, 70),
            Row::new().with(fields::IDENTITY, "S2").with(fields::GRAND_TOTAL, 30),
            Row::new()
                .with(fields::IDENTITY, "S3")
                .with(fields::POS_PROFILE, "Counter")
                .with(fields::GRAND_TOTAL, 5),
            Row::new()
                .with(fields::IDENTITY, "S4")
                .with(fields::POS_PROFILE, "Terrace")
                .with(fields::GRAND_TOTAL, 0),
            Row::new()
                .with(fields::IDENTITY, GRAND_TOTAL_LABEL)
                .with(fields::GRAND_TOTAL, 105),
        ];
        let set = charts(&rows);
        let series = set.cost_centers.series().unwrap();
        assert_eq!(series.title, "Sales by POS Profile");
        assert_eq!(series.labels, vec!["Counter", UNKNOWN_PROFILE]);
        assert_eq!(series.values, vec![75.0, 30.0]);
    }

    #[test]
    fn test_placeholders_when_nothing_to_draw() {
        let rows = vec![Row::new().with(fields::IDENTITY, "S1")];
        let set = charts(&rows);
        assert_eq!(set.cost_centers, ChartPanel::Placeholder(NO_SALES_DATA.to_string()));
        assert_eq!(set.payments, ChartPanel::Placeholder(NO_PAYMENT_DATA.to_string()));
        // one shift still yields one (zero) trend point
        assert!(set.trend.series().is_some());

        let set = charts(&[]);
        assert_eq!(set.trend, ChartPanel::Placeholder(NO_TREND_DATA.to_string()));
    }

    #[test]
    fn test_payment_pie_and_trend() {
        let rows = vec![
            Row::new()
                .with(fields::IDENTITY, "S1")
                .with(fields::POSTING_DATE, "2025-03-02")
                .with(fields::GRAND_TOTAL, 100)
                .with(fields::CASH_SALES, 60)
                .with(fields::CARD_SALES, 40),
            Row::new()
                .with(fields::IDENTITY, "S2")
                .with(fields::POSTING_DATE, "2025-03-01")
                .with(fields::GRAND_TOTAL, 50),
        ];
        let set = charts(&rows);

        let pie = set.payments.series().unwrap();
        assert_eq!(pie.kind, ChartKind::Pie);
        assert_eq!(pie.values, vec![60.0, 40.0]);

        let line = set.trend.series().unwrap();
        assert_eq!(line.kind, ChartKind::Line);
        assert_eq!(line.dataset_label.as_deref(), Some("Shift Total (QAR)"));
        assert_eq!(line.labels, vec!["2025-03-02", "2025-03-01"]);
        assert_eq!(line.values, vec![100.0, 50.0]);
        assert!(line.colors.is_empty());
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette(10).len(), 10);
        assert_eq!(palette(10)[8], PALETTE[0]);
    }
}
