//! # Cell Formatter
//!
//! Decides how each report cell is displayed. The host UI maps
//! [`CellStyle`] to its own markup; nothing here knows about HTML or CSS.
//!
//! ## Style Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. GRAND TOTAL row                                                    │
//! │     identity column ──────────────────────► GrandTotalLabel            │
//! │     *total* / *cost_center* column ───────► GrandTotalValue            │
//! │                                                                         │
//! │  2. Shift row (has an identity)                                        │
//! │     identity ► Link   cashier ► Person   posting_date ► Date           │
//! │     pos_profile ► Badge                                                 │
//! │                                                                         │
//! │  3. Positive numbers                                                   │
//! │     total_quantity ───────────────────────► Quantity (2 decimals)      │
//! │     cost_center_* ────────────────────────► CostCenter (currency)      │
//! │     *total* (not an Int/Float column) ────► Currency                   │
//! │                                                                         │
//! │  4. Everything else ──────────────────────► Plain (raw text)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

use crate::columns::{find_column, FieldType};
use crate::currency::CurrencyFormatter;
use crate::hierarchy::classify;
use crate::numeric::raw_text;
use crate::types::{fields, Row, RowRole, COST_CENTER_PREFIX};

/// Display treatment of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CellStyle {
    GrandTotalLabel,
    GrandTotalValue,
    Link,
    Person,
    Date,
    Badge,
    Currency,
    CostCenter,
    Quantity,
    Plain,
}

/// A formatted cell.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
    pub role: RowRole,
    /// Nesting depth of the row (0 for top level).
    pub indent: u8,
}

/// Formats one cell of `row`.
pub fn format_cell(
    row: &Row,
    fieldname: &str,
    formatter: &dyn CurrencyFormatter,
    currency: &str,
) -> Cell {
    let role = classify(row);
    let value = row.get(fieldname);
    let positive = positive_number(value);

    let is_cost_center = fieldname.starts_with(COST_CENTER_PREFIX);
    let is_quantity = fieldname == fields::QUANTITY;
    let is_money = is_cost_center || (fieldname.contains("total") && !is_counting_column(fieldname));

    let text = match positive {
        Some(n) if is_quantity => format!("{:.2}", n),
        Some(n) if is_money => formatter.format(n, currency),
        _ => raw_text(value),
    };

    let style = if role == RowRole::GrandTotal {
        if fieldname == fields::IDENTITY {
            CellStyle::GrandTotalLabel
        } else if fieldname.contains("total") || fieldname.contains("cost_center") {
            CellStyle::GrandTotalValue
        } else {
            CellStyle::Plain
        }
    } else {
        shift_row_style(row, fieldname)
            .or_else(|| {
                positive.map(|_| {
                    if is_quantity {
                        CellStyle::Quantity
                    } else if is_cost_center {
                        CellStyle::CostCenter
                    } else if is_money {
                        CellStyle::Currency
                    } else {
                        CellStyle::Plain
                    }
                })
            })
            .unwrap_or(CellStyle::Plain)
    };

    Cell {
        text,
        style,
        role,
        indent: role.indent(),
    }
}

/// Formats every fixed column of a row, plus its cost-center columns.
pub fn format_row(row: &Row, formatter: &dyn CurrencyFormatter, currency: &str) -> Vec<(String, Cell)> {
    let fixed = crate::columns::report_columns()
        .into_iter()
        .map(|c| c.fieldname.to_string());
    let dynamic = row
        .fields()
        .filter(|(name, _)| name.starts_with(COST_CENTER_PREFIX))
        .map(|(name, _)| name.to_string())
        .collect::<Vec<_>>();

    fixed
        .chain(dynamic)
        .map(|name| {
            let cell = format_cell(row, &name, formatter, currency);
            (name, cell)
        })
        .collect()
}

/// Styles that depend on the column of an identified shift row.
fn shift_row_style(row: &Row, fieldname: &str) -> Option<CellStyle> {
    row.identity()?;
    match fieldname {
        fields::IDENTITY => Some(CellStyle::Link),
        fields::CASHIER => Some(CellStyle::Person),
        fields::POSTING_DATE => Some(CellStyle::Date),
        fields::POS_PROFILE => Some(CellStyle::Badge),
        _ => None,
    }
}

/// `total_shifts` and `total_quantity` contain "total" but are counts.
fn is_counting_column(fieldname: &str) -> bool {
    matches!(
        find_column(fieldname).map(|c| c.fieldtype),
        Some(FieldType::Int) | Some(FieldType::Float)
    )
}

/// Only real JSON numbers above zero get numeric treatment.
fn positive_number(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite() && *n > 0.0)
}
