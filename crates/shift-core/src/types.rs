//! # Domain Types
//!
//! Core types of the shift summary pipeline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Row        │   │   Aggregates    │   │  SummaryStats   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  open map of    │──►│  cost_centers   │   │  shift_count    │       │
//! │  │  field → value  │   │  payments       │   │  total_sales    │       │
//! │  │                 │   │  trend          │   │  avg_per_shift? │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    RowRole      │   │ PaymentTotals   │   │   TrendPoint    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  GrandTotal     │   │  cash           │   │  shift_id       │       │
//! │  │  Group          │   │  card           │   │  date           │       │
//! │  │  ChildLevel1/2  │   └─────────────────┘   │  total          │       │
//! │  │  Plain          │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Open Schema
//! Rows are NOT a fixed struct. Cost-center columns are named after whatever
//! cost centers exist in the dataset, so a row is an ordered string-keyed map
//! and those columns are discovered by prefix at runtime.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::numeric::to_amount;

// =============================================================================
// Field Names
// =============================================================================

/// Field names the pipeline reads from a report row.
pub mod fields {
    /// Identity column (one row per opening shift).
    pub const IDENTITY: &str = "pos_opening_shift";
    pub const POS_PROFILE: &str = "pos_profile";
    pub const CLOSING_SHIFT: &str = "pos_closing_shift";
    pub const POSTING_DATE: &str = "posting_date";
    pub const CASHIER: &str = "cashier";
    pub const TOTAL_SHIFTS: &str = "total_shifts";
    pub const CASH_SALES: &str = "total_cash_sales";
    pub const CARD_SALES: &str = "total_card_sales";
    pub const GRAND_TOTAL: &str = "total_grand_total";
    pub const NET_TOTAL: &str = "total_net_total";
    pub const QUANTITY: &str = "total_quantity";
    pub const RETURN_TOTAL: &str = "return_sales_total";
    pub const RETURN_COUNT: &str = "return_sales_count";
    pub const AVERAGE_PER_SHIFT: &str = "average_per_shift";
    /// Hierarchy flag: 1 for a group header row.
    pub const IS_GROUP: &str = "_is_group";
    /// Hierarchy depth: 1 = mid-level child, 2 = leaf.
    pub const INDENT: &str = "_indent";
}

/// Identity value of the synthetic aggregate row.
pub const GRAND_TOTAL_LABEL: &str = "GRAND TOTAL";

/// Prefix of dynamically named cost-center columns.
pub const COST_CENTER_PREFIX: &str = "cost_center_";

// =============================================================================
// Row
// =============================================================================

/// One report record: an ordered, dynamically keyed map of field → value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Row(Map::new())
    }

    /// Builder-style insert, handy for assembling rows and in tests.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    /// Inserts or replaces a field.
    pub fn insert(&mut self, field: &str, value: impl Into<Value>) {
        self.0.insert(field.to_string(), value.into());
    }

    /// Raw cell lookup.
    #[inline]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Iterates fields in source order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The identity (opening shift) value, if it is a string.
    pub fn identity(&self) -> Option<&str> {
        self.text(fields::IDENTITY)
    }

    /// True for the synthetic `GRAND TOTAL` row.
    pub fn is_grand_total(&self) -> bool {
        self.identity() == Some(GRAND_TOTAL_LABEL)
    }

    /// A string cell, or `None` when absent or not a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// A numeric cell under the zero-on-anything-unusable policy.
    #[inline]
    pub fn amount(&self, field: &str) -> f64 {
        to_amount(self.0.get(field))
    }

    /// An integer hierarchy flag (`_is_group`, `_indent`).
    ///
    /// Accepts JSON integers, integral floats, numeric strings and booleans.
    pub fn flag(&self, field: &str) -> Option<i64> {
        match self.0.get(field)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Cost-center columns of this row as `(display name, cell)` pairs.
    pub fn cost_centers(&self) -> impl Iterator<Item = (String, &Value)> {
        self.0.iter().filter_map(|(key, value)| {
            key.strip_prefix(COST_CENTER_PREFIX)
                .map(|name| (cost_center_display_name(name), value))
        })
    }

    /// Parses a report payload: either a bare array of row objects or a
    /// report response object carrying the rows under `result`.
    pub fn list_from_json(payload: Value) -> CoreResult<Vec<Row>> {
        let items = match payload {
            Value::Array(items) => items,
            Value::Object(mut obj) => match obj.remove("result") {
                Some(Value::Array(items)) => items,
                Some(other) => {
                    return Err(CoreError::MissingRows(format!(
                        "`result` is {}, expected an array",
                        json_kind(&other)
                    )))
                }
                None => {
                    return Err(CoreError::MissingRows(
                        "object has no `result` field".to_string(),
                    ))
                }
            },
            other => {
                return Err(CoreError::MissingRows(format!(
                    "payload is {}, expected an array or object",
                    json_kind(&other)
                )))
            }
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => Ok(Row(map)),
                other => Err(CoreError::InvalidRow {
                    index,
                    found: json_kind(&other).to_string(),
                }),
            })
            .collect()
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Row(map)
    }
}

/// `cost_center_main_hall` → `main hall`.
pub fn cost_center_display_name(suffix: &str) -> String {
    suffix.replace('_', " ")
}

/// Rows that take part in aggregation, statistics and export: everything
/// except the grand-total row.
pub fn shift_rows(rows: &[Row]) -> Vec<&Row> {
    rows.iter().filter(|row| !row.is_grand_total()).collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Row Role
// =============================================================================

/// Structural role of a row, used only for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RowRole {
    /// The synthetic aggregate row.
    GrandTotal,
    /// A group header in the hierarchical variant.
    Group,
    /// Mid-level child (`_indent == 1`).
    ChildLevel1,
    /// Leaf-level child (`_indent == 2`).
    ChildLevel2,
    /// A flat shift row.
    #[default]
    Plain,
}

impl RowRole {
    /// Visual nesting depth.
    pub const fn indent(&self) -> u8 {
        match self {
            RowRole::ChildLevel1 => 1,
            RowRole::ChildLevel2 => 2,
            _ => 0,
        }
    }
}

impl std::fmt::Display for RowRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowRole::GrandTotal => write!(f, "grand_total"),
            RowRole::Group => write!(f, "group"),
            RowRole::ChildLevel1 => write!(f, "child_level_1"),
            RowRole::ChildLevel2 => write!(f, "child_level_2"),
            RowRole::Plain => write!(f, "plain"),
        }
    }
}

// =============================================================================
// Aggregates
// =============================================================================

/// Running total for one cost center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CostCenterTotal {
    /// Display name (prefix stripped, underscores → spaces).
    pub name: String,
    pub total: f64,
}

/// Cost-center totals in first-contribution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct CostCenterTotals(Vec<CostCenterTotal>);

impl CostCenterTotals {
    /// Adds `amount` to `name`, opening the bucket if needed.
    pub(crate) fn add(&mut self, name: String, amount: f64) {
        match self.0.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.total += amount,
            None => self.0.push(CostCenterTotal {
                name,
                total: amount,
            }),
        }
    }

    /// Total for a display name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.total)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CostCenterTotal> {
        self.0.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|entry| entry.name.clone()).collect()
    }

    pub fn totals(&self) -> Vec<f64> {
        self.0.iter().map(|entry| entry.total).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Cash vs card split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentTotals {
    pub cash: f64,
    pub card: f64,
}

impl PaymentTotals {
    /// True when at least one side carries sales.
    pub fn has_sales(&self) -> bool {
        self.cash > 0.0 || self.card > 0.0
    }
}

/// One point of the shift trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrendPoint {
    /// Raw identity of the row (`None` when the row had no string identity).
    pub shift_id: Option<String>,
    /// Raw posting date, unparsed.
    pub date: Option<String>,
    pub total: f64,
}

/// Everything the chart view derives from a row sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Aggregates {
    pub cost_centers: CostCenterTotals,
    pub payments: PaymentTotals,
    pub trend: Vec<TrendPoint>,
}

impl Aggregates {
    /// True when nothing was aggregated (no shift rows at all).
    pub fn is_empty(&self) -> bool {
        self.trend.is_empty()
    }
}

// =============================================================================
// Summary Statistics
// =============================================================================

/// Scalar statistics over the shift rows.
///
/// The two ratios are `None` when their denominator is zero; a non-finite
/// number never leaves the summary calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SummaryStats {
    pub shift_count: usize,
    pub total_sales: f64,
    pub total_cash: f64,
    pub total_card: f64,
    /// `None` when there are no shifts.
    pub avg_per_shift: Option<f64>,
    /// `None` when total sales are zero.
    pub cash_percentage: Option<f64>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grand_total_detection() {
        let row = Row::new().with(fields::IDENTITY, GRAND_TOTAL_LABEL);
        assert!(row.is_grand_total());

        let row = Row::new().with(fields::IDENTITY, "POS-OPE-0001");
        assert!(!row.is_grand_total());

        assert!(!Row::new().is_grand_total());
    }

    #[test]
    fn test_cost_center_discovery_keeps_source_order() {
        let row = Row::new()
            .with("cost_center_main_hall", 10)
            .with(fields::GRAND_TOTAL, 10)
            .with("cost_center_bar", 5);

        let names: Vec<String> = row.cost_centers().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["main hall".to_string(), "bar".to_string()]);
    }

    #[test]
    fn test_flag_parsing() {
        let row = Row::new()
            .with(fields::IS_GROUP, 1)
            .with(fields::INDENT, "2");
        assert_eq!(row.flag(fields::IS_GROUP), Some(1));
        assert_eq!(row.flag(fields::INDENT), Some(2));

        let row = Row::new().with(fields::INDENT, 1.0).with(fields::IS_GROUP, false);
        assert_eq!(row.flag(fields::INDENT), Some(1));
        assert_eq!(row.flag(fields::IS_GROUP), Some(0));

        assert_eq!(Row::new().flag(fields::INDENT), None);
    }

    #[test]
    fn test_list_from_json_accepts_array_and_result() {
        let rows = Row::list_from_json(json!([{ "pos_opening_shift": "S1" }])).unwrap();
        assert_eq!(rows.len(), 1);

        let rows = Row::list_from_json(json!({
            "columns": [],
            "result": [{ "pos_opening_shift": "S1" }, { "pos_opening_shift": "S2" }]
        }))
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].identity(), Some("S2"));
    }

    #[test]
    fn test_list_from_json_rejects_scalars() {
        let err = Row::list_from_json(json!([{ "a": 1 }, 7])).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRow { index: 1, .. }));

        assert!(Row::list_from_json(json!("rows")).is_err());
        assert!(Row::list_from_json(json!({ "message": [] })).is_err());
    }

    #[test]
    fn test_shift_rows_excludes_grand_total() {
        let rows = vec![
            Row::new().with(fields::IDENTITY, "S1"),
            Row::new().with(fields::IDENTITY, GRAND_TOTAL_LABEL),
        ];
        let shifts = shift_rows(&rows);
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].identity(), Some("S1"));
    }

    #[test]
    fn test_role_indent() {
        assert_eq!(RowRole::ChildLevel1.indent(), 1);
        assert_eq!(RowRole::ChildLevel2.indent(), 2);
        assert_eq!(RowRole::Group.indent(), 0);
        assert_eq!(RowRole::default(), RowRole::Plain);
    }
}
