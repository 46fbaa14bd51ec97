//! # Export Formatter
//!
//! Turns a report into the two export artifacts:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SummaryStats ──► to_clipboard_text ──► plain multi-line text          │
//! │                   (amounts through the currency formatter)             │
//! │                                                                         │
//! │  shift rows ────► to_csv ─────────────► header + one line per shift    │
//! │                   (raw values, quoted only when a value needs it)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both skip the grand-total row and both succeed on empty input
//! (stats-only text, header-only CSV).

use chrono::NaiveDate;

use crate::currency::CurrencyFormatter;
use crate::error::{CoreError, CoreResult};
use crate::numeric::raw_text;
use crate::summary::format_optional_amount;
use crate::types::{fields, shift_rows, Row, SummaryStats};

/// CSV header, in column order.
pub const CSV_HEADER: [&str; 7] = [
    "POS Opening Shift",
    "POS Profile",
    "Date",
    "Cashier",
    "Grand Total",
    "Cash Sales",
    "Card Sales",
];

/// Row fields backing each CSV column.
const CSV_FIELDS: [&str; 7] = [
    fields::IDENTITY,
    fields::POS_PROFILE,
    fields::POSTING_DATE,
    fields::CASHIER,
    fields::GRAND_TOTAL,
    fields::CASH_SALES,
    fields::CARD_SALES,
];

/// First line of the clipboard summary.
pub const CLIPBOARD_TITLE: &str = "POS Shift Summary Report";

// =============================================================================
// Clipboard Text
// =============================================================================

/// Human-readable summary block, fixed line order.
///
/// ```text
/// POS Shift Summary Report
/// Total Shifts: 2
/// Total Sales: $150.00
/// Average per Shift: $75.00
/// Cash Sales: $110.00
/// Card Sales: $40.00
/// ```
pub fn to_clipboard_text(
    stats: &SummaryStats,
    formatter: &dyn CurrencyFormatter,
    currency: &str,
) -> String {
    [
        CLIPBOARD_TITLE.to_string(),
        format!("Total Shifts: {}", stats.shift_count),
        format!("Total Sales: {}", formatter.format(stats.total_sales, currency)),
        format!(
            "Average per Shift: {}",
            format_optional_amount(stats.avg_per_shift, formatter, currency)
        ),
        format!("Cash Sales: {}", formatter.format(stats.total_cash, currency)),
        format!("Card Sales: {}", formatter.format(stats.total_card, currency)),
    ]
    .join("\n")
}

// =============================================================================
// CSV
// =============================================================================

/// Serializes the shift rows to CSV: header plus one record per shift,
/// newline separated, no trailing newline.
///
/// Values are written raw. A value containing a comma, quote or line break
/// is quoted so it stays inside its column.
pub fn to_csv(rows: &[Row]) -> CoreResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)?;

    for row in shift_rows(rows) {
        let record: Vec<String> = CSV_FIELDS
            .iter()
            .map(|field| raw_text(row.get(field)))
            .collect();
        wtr.write_record(&record)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| CoreError::Csv(e.into_error().into()))?;
    let mut text = String::from_utf8(bytes).map_err(|_| CoreError::CsvEncoding)?;

    if text.ends_with('\n') {
        text.pop();
    }

    Ok(text)
}

/// Download filename for an export made on `date`.
pub fn csv_filename(date: NaiveDate) -> String {
    format!("pos_shift_summary_{}.csv", date.format("%Y-%m-%d"))
}

// =============================================================================
// Unit Tests
// =============================================================================
