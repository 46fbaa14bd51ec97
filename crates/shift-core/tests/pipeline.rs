//! End-to-end checks over the full row pipeline: assembled or raw rows in,
//! aggregates, statistics, charts and exports out.

use serde_json::json;
use shift_core::{
    aggregate, assemble_rows, classify, prepare_charts, summarize, summary_panel,
    to_clipboard_text, to_csv, ChartPanel, Row, RowRole, ShiftSource, StandardFormatter,
};

fn worked_example() -> Vec<Row> {
    Row::list_from_json(json!([
        {
            "pos_opening_shift": "POS-OPE-0001",
            "pos_profile": "Main Counter",
            "posting_date": "2025-03-01",
            "cashier": "ali@example.com",
            "total_grand_total": 100,
            "total_cash_sales": 60,
            "total_card_sales": 40,
            "cost_center_Main_Hall": 70,
            "cost_center_Bar": 30
        },
        {
            "pos_opening_shift": "POS-OPE-0002",
            "pos_profile": "Main Counter",
            "posting_date": "2025-03-02",
            "cashier": "sara@example.com",
            "total_grand_total": "50",
            "total_cash_sales": "50",
            "total_card_sales": null,
            "cost_center_Main_Hall": 0,
            "cost_center_Bar": -5
        },
        {
            "pos_opening_shift": "GRAND TOTAL",
            "total_grand_total": 150,
            "total_cash_sales": 110,
            "total_card_sales": 40
        }
    ]))
    .unwrap()
}

#[test]
fn test_worked_example_statistics() {
    let stats = summarize(&worked_example());

    assert_eq!(stats.shift_count, 2);
    assert_eq!(stats.total_sales, 150.0);
    assert_eq!(stats.total_cash, 110.0);
    assert_eq!(stats.total_card, 40.0);
    assert_eq!(stats.avg_per_shift, Some(75.0));

    let pct = stats.cash_percentage.unwrap();
    assert!((pct - 73.333_333).abs() < 1e-4);

    let panel = summary_panel(&stats, &StandardFormatter, "USD");
    assert_eq!(panel.value("Payment Breakdown", "Cash %"), Some("73.3%"));
    assert_eq!(panel.value("Performance Metrics", "Average per Shift"), Some("$75.00"));
}

#[test]
fn test_worked_example_aggregates() {
    let agg = aggregate(&worked_example());

    assert_eq!(agg.cost_centers.get("Main Hall"), Some(70.0));
    assert_eq!(agg.cost_centers.get("Bar"), Some(30.0));
    assert_eq!(agg.payments.cash, 110.0);
    assert_eq!(agg.payments.card, 40.0);
    assert_eq!(agg.trend.len(), 2);
    assert_eq!(agg.trend[1].total, 50.0);
}

#[test]
fn test_grand_total_never_counted() {
    let mut rows = worked_example();
    let with_total = summarize(&rows);
    rows.pop();
    let without_total = summarize(&rows);

    assert_eq!(with_total, without_total);
    assert_eq!(aggregate(&worked_example()), aggregate(&rows));
}

#[test]
fn test_pipeline_is_idempotent() {
    let rows = worked_example();
    assert_eq!(summarize(&rows), summarize(&rows));
    assert_eq!(aggregate(&rows), aggregate(&rows));
    assert_eq!(to_csv(&rows).unwrap(), to_csv(&rows).unwrap());
}

#[test]
fn test_cost_center_totals_are_positive() {
    let agg = aggregate(&worked_example());
    assert!(agg.cost_centers.iter().all(|cc| cc.total > 0.0));
}

#[test]
fn test_csv_has_one_line_per_shift() {
    let rows = worked_example();
    let csv = to_csv(&rows).unwrap();
    assert_eq!(csv.lines().count(), 1 + summarize(&rows).shift_count);
    assert!(!csv.contains("GRAND TOTAL"));
    assert_eq!(
        csv.lines().nth(2),
        Some("POS-OPE-0002,Main Counter,2025-03-02,sara@example.com,50,50,")
    );
}

#[test]
fn test_empty_report() {
    let stats = summarize(&[]);
    assert_eq!(stats.shift_count, 0);
    assert_eq!(stats.avg_per_shift, None);
    assert_eq!(stats.cash_percentage, None);

    let text = to_clipboard_text(&stats, &StandardFormatter, "USD");
    assert!(text.contains("Average per Shift: N/A"));

    assert_eq!(to_csv(&[]).unwrap().lines().count(), 1);
    assert!(aggregate(&[]).is_empty());
}

#[test]
fn test_roles_across_rows() {
    let rows = worked_example();
    let roles: Vec<RowRole> = rows.iter().map(classify).collect();
    assert_eq!(roles, vec![RowRole::Plain, RowRole::Plain, RowRole::GrandTotal]);
}

#[test]
fn test_assembled_rows_feed_the_pipeline() {
    let source: ShiftSource = serde_json::from_value(json!({
        "closing_shifts": [
            {"name": "CS-1", "pos_opening_shift": "OS-1", "pos_profile": "Counter",
             "grand_total": 100, "posting_date": "2025-03-01"},
            {"name": "CS-2", "pos_opening_shift": "OS-2", "pos_profile": "Terrace",
             "grand_total": 40, "posting_date": "2025-03-01"}
        ],
        "payments": [
            {"pos_opening_shift": "OS-1", "mode_of_payment": "Cash", "amount": 100},
            {"pos_opening_shift": "OS-2", "mode_of_payment": "Card", "amount": 40}
        ],
        "payment_modes": {"Cash": "Cash", "Card": "Bank"}
    }))
    .unwrap();

    let rows = assemble_rows(&source);
    assert_eq!(rows.len(), 3);

    let stats = summarize(&rows);
    assert_eq!(stats.shift_count, 2);
    assert_eq!(stats.total_cash, 100.0);
    assert_eq!(stats.total_card, 40.0);

    // no cost-center columns, so the doughnut falls back to profiles
    let charts = prepare_charts(&rows, &aggregate(&rows), "QAR");
    match &charts.cost_centers {
        ChartPanel::Ready(series) => {
            assert_eq!(series.labels, vec!["Counter", "Terrace"]);
            assert_eq!(series.values, vec![100.0, 40.0]);
        }
        ChartPanel::Placeholder(msg) => panic!("unexpected placeholder: {msg}"),
    }
}
