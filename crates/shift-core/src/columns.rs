//! # Report Columns
//!
//! The fixed column set of the POS shift summary report. Cost-center columns
//! are not listed here: they are dynamic and discovered per dataset.

use serde::Serialize;

use crate::types::fields;

/// How the host UI should treat a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    /// Link to another document (`options` names the doctype).
    Link,
    Int,
    Float,
    Currency,
    Date,
}

/// One column definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub fieldname: &'static str,
    pub label: &'static str,
    pub fieldtype: FieldType,
    /// Link target doctype.
    pub options: Option<&'static str>,
    /// Display precision for floats.
    pub precision: Option<u8>,
    pub width: u16,
}

const fn column(
    fieldname: &'static str,
    label: &'static str,
    fieldtype: FieldType,
    width: u16,
) -> Column {
    Column {
        fieldname,
        label,
        fieldtype,
        options: None,
        precision: None,
        width,
    }
}

const fn link(
    fieldname: &'static str,
    label: &'static str,
    options: &'static str,
    width: u16,
) -> Column {
    Column {
        fieldname,
        label,
        fieldtype: FieldType::Link,
        options: Some(options),
        precision: None,
        width,
    }
}

/// Report columns in display order.
pub fn report_columns() -> Vec<Column> {
    vec![
        link(fields::IDENTITY, "POS Opening Shift", "POS Opening Shift", 180),
        link(fields::POS_PROFILE, "POS Profile", "POS Profile", 150),
        link(fields::CLOSING_SHIFT, "POS Closing Shift", "POS Closing Shift", 180),
        column(fields::TOTAL_SHIFTS, "Total Shifts", FieldType::Int, 100),
        column(fields::CASH_SALES, "Total Cash Sales", FieldType::Currency, 120),
        column(fields::CARD_SALES, "Total Card Sales", FieldType::Currency, 120),
        column(fields::GRAND_TOTAL, "Grand Total", FieldType::Currency, 120),
        column(fields::NET_TOTAL, "Net Total", FieldType::Currency, 120),
        Column {
            precision: Some(2),
            ..column(fields::QUANTITY, "Total Quantity", FieldType::Float, 120)
        },
        column(fields::RETURN_TOTAL, "Return Sales Total", FieldType::Currency, 120),
        column(fields::RETURN_COUNT, "Return Sales Count", FieldType::Int, 120),
        column(fields::AVERAGE_PER_SHIFT, "Average per Shift", FieldType::Currency, 120),
        column(fields::POSTING_DATE, "Posting Date", FieldType::Date, 100),
        link(fields::CASHIER, "Cashier", "User", 120),
    ]
}

/// Looks up a fixed column by fieldname.
pub fn find_column(fieldname: &str) -> Option<Column> {
    report_columns().into_iter().find(|c| c.fieldname == fieldname)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_order() {
        let columns = report_columns();
        assert_eq!(columns.len(), 14);
        assert_eq!(columns[0].fieldname, fields::IDENTITY);
        assert_eq!(columns[13].fieldname, fields::CASHIER);
    }

    #[test]
    fn test_quantity_precision() {
        let qty = find_column(fields::QUANTITY).unwrap();
        assert_eq!(qty.fieldtype, FieldType::Float);
        assert_eq!(qty.precision, Some(2));
    }

    #[test]
    fn test_cashier_links_to_user() {
        let cashier = find_column(fields::CASHIER).unwrap();
        assert_eq!(cashier.options, Some("User"));
        assert!(find_column("cost_center_bar").is_none());
    }
}
