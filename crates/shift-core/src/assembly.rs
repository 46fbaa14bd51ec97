//! # Row Assembly
//!
//! Shapes already-fetched closing-shift records into report rows. Querying
//! the records is the host's job; this module only groups and sums.
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐     ┌──────────────────────┐
//! │  ClosingShift[]  │────►│  group by        │────►│  one Row per         │
//! │  (any order)     │     │  opening shift   │     │  opening shift       │
//! └──────────────────┘     │  (first wins)    │     │  + GRAND TOTAL row   │
//!                          └────────┬─────────┘     └──────────────────────┘
//!                                   │
//!          PaymentLine[] ──────────►│ cash / card split
//!          mode → type  ───────────►│ (type "Cash" is cash, all else card)
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::numeric::to_amount;
use crate::types::{fields, Row, GRAND_TOTAL_LABEL};

// =============================================================================
// Input Records
// =============================================================================

/// A submitted POS closing shift joined with its opening shift.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClosingShift {
    /// Closing shift document name.
    pub name: String,
    pub pos_opening_shift: String,
    #[serde(default)]
    pub pos_profile: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub grand_total: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub net_total: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_quantity: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub return_sales_total: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub return_sales_count: f64,
    #[serde(default)]
    pub posting_date: Option<String>,
    /// User who opened the shift.
    #[serde(default)]
    pub cashier: Option<String>,
}

/// Reconciled amount for one mode of payment, across every closing shift of
/// an opening shift.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentLine {
    pub pos_opening_shift: String,
    pub mode_of_payment: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
}

/// Payment classification used for the cash/card split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentKind {
    Cash,
    Other,
}

impl PaymentKind {
    /// Maps a Mode of Payment `type` to its kind. Only `Cash` is cash.
    pub fn from_mode_type(mode_type: &str) -> Self {
        if mode_type == "Cash" {
            PaymentKind::Cash
        } else {
            PaymentKind::Other
        }
    }
}

/// Everything needed to assemble a report.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShiftSource {
    pub closing_shifts: Vec<ClosingShift>,
    #[serde(default)]
    pub payments: Vec<PaymentLine>,
    /// Mode of Payment name to its `type` ("Cash", "Bank", "General", ...).
    #[serde(default)]
    pub payment_modes: HashMap<String, String>,
}

impl ShiftSource {
    /// Kind of a mode of payment. Unknown modes are non-cash.
    pub fn payment_kind(&self, mode_of_payment: &str) -> PaymentKind {
        self.payment_modes
            .get(mode_of_payment)
            .map(|t| PaymentKind::from_mode_type(t))
            .unwrap_or(PaymentKind::Other)
    }

    /// Cash and card totals for one opening shift.
    pub fn payment_split(&self, opening_shift: &str) -> (f64, f64) {
        self.payments
            .iter()
            .filter(|p| p.pos_opening_shift == opening_shift)
            .fold((0.0, 0.0), |(cash, card), p| {
                match self.payment_kind(&p.mode_of_payment) {
                    PaymentKind::Cash => (cash + p.amount, card),
                    PaymentKind::Other => (cash, card + p.amount),
                }
            })
    }
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(to_amount(value.as_ref()))
}

// =============================================================================
// Assembly
// =============================================================================

/// Builds one row per opening shift, then a `GRAND TOTAL` row when any row
/// exists.
pub fn assemble_rows(source: &ShiftSource) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for shift in &source.closing_shifts {
        if !seen.insert(shift.pos_opening_shift.as_str()) {
            continue;
        }

        let (cash, card) = source.payment_split(&shift.pos_opening_shift);
        rows.push(shift_row(shift, cash, card));
    }

    debug!(
        closing_shifts = source.closing_shifts.len(),
        opening_shifts = rows.len(),
        "Assembled shift rows"
    );

    if !rows.is_empty() {
        let total = grand_total_row(&rows);
        rows.push(total);
    }

    rows
}

fn shift_row(shift: &ClosingShift, cash: f64, card: f64) -> Row {
    Row::new()
        .with(fields::IDENTITY, shift.pos_opening_shift.as_str())
        .with(fields::POS_PROFILE, shift.pos_profile.clone())
        .with(fields::CLOSING_SHIFT, shift.name.as_str())
        .with(fields::TOTAL_SHIFTS, 1)
        .with(fields::CASH_SALES, cash)
        .with(fields::CARD_SALES, card)
        .with(fields::GRAND_TOTAL, shift.grand_total)
        .with(fields::NET_TOTAL, shift.net_total)
        .with(fields::QUANTITY, shift.total_quantity)
        .with(fields::RETURN_TOTAL, shift.return_sales_total)
        .with(fields::RETURN_COUNT, shift.return_sales_count)
        .with(fields::AVERAGE_PER_SHIFT, shift.grand_total)
        .with(fields::POSTING_DATE, shift.posting_date.clone())
        .with(fields::CASHIER, shift.cashier.clone())
}

fn grand_total_row(rows: &[Row]) -> Row {
    let sum = |field: &str| rows.iter().map(|r| r.amount(field)).sum::<f64>();

    let total_shifts = sum(fields::TOTAL_SHIFTS);
    let grand_total = sum(fields::GRAND_TOTAL);
    let average = if total_shifts > 0.0 {
        grand_total / total_shifts
    } else {
        0.0
    };

    Row::new()
        .with(fields::IDENTITY, GRAND_TOTAL_LABEL)
        .with(fields::POS_PROFILE, "")
        .with(fields::CLOSING_SHIFT, "")
        .with(fields::TOTAL_SHIFTS, total_shifts as i64)
        .with(fields::CASH_SALES, sum(fields::CASH_SALES))
        .with(fields::CARD_SALES, sum(fields::CARD_SALES))
        .with(fields::GRAND_TOTAL, grand_total)
        .with(fields::NET_TOTAL, sum(fields::NET_TOTAL))
        .with(fields::QUANTITY, sum(fields::QUANTITY))
        .with(fields::RETURN_TOTAL, sum(fields::RETURN_TOTAL))
        .with(fields::RETURN_COUNT, sum(fields::RETURN_COUNT))
        .with(fields::AVERAGE_PER_SHIFT, average)
        .with(fields::POSTING_DATE, "")
        .with(fields::CASHIER, "")
}

// =============================================================================
// Unit Tests
// =============================================================================
