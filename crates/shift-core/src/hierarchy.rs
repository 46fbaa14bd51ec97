//! # Hierarchy Classifier
//!
//! Tags each row with its structural [`RowRole`].
//!
//! ## Decision Order
//! ```text
//! identity == "GRAND TOTAL" ──yes──► GrandTotal
//!        │ no
//!        ▼
//! _is_group == 1 ────────────yes──► Group
//!        │ no
//!        ▼
//! _is_group == 0 && _indent == 1 ─► ChildLevel1
//!        │ no
//!        ▼
//! _indent == 2 ──────────────yes──► ChildLevel2
//!        │ no
//!        ▼
//!      Plain
//! ```

use crate::types::{fields, Row, RowRole};

/// Classifies a row. Total: missing or odd flags fall through to `Plain`.
pub fn classify(row: &Row) -> RowRole {
    if row.is_grand_total() {
        return RowRole::GrandTotal;
    }

    let is_group = row.flag(fields::IS_GROUP);
    let indent = row.flag(fields::INDENT);

    if is_group == Some(1) {
        RowRole::Group
    } else if is_group == Some(0) && indent == Some(1) {
        RowRole::ChildLevel1
    } else if indent == Some(2) {
        RowRole::ChildLevel2
    } else {
        RowRole::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GRAND_TOTAL_LABEL;

    #[test]
    fn test_grand_total_short_circuits() {
        let row = Row::new()
            .with(fields::IDENTITY, GRAND_TOTAL_LABEL)
            .with(fields::IS_GROUP, 1);
        assert_eq!(classify(&row), RowRole::GrandTotal);
    }

    #[test]
    fn test_group_and_children() {
        let group = Row::new().with(fields::IS_GROUP, 1).with(fields::INDENT, 0);
        assert_eq!(classify(&group), RowRole::Group);

        let mid = Row::new().with(fields::IS_GROUP, 0).with(fields::INDENT, 1);
        assert_eq!(classify(&mid), RowRole::ChildLevel1);

        let leaf = Row::new().with(fields::IS_GROUP, 0).with(fields::INDENT, 2);
        assert_eq!(classify(&leaf), RowRole::ChildLevel2);
    }

    #[test]
    fn test_indent_one_needs_explicit_non_group() {
        let row = Row::new().with(fields::INDENT, 1);
        assert_eq!(classify(&row), RowRole::Plain);
    }

    #[test]
    fn test_indent_two_without_group_flag() {
        let row = Row::new().with(fields::INDENT, 2);
        assert_eq!(classify(&row), RowRole::ChildLevel2);
    }

    #[test]
    fn test_missing_flags_are_plain() {
        let row = Row::new().with(fields::IDENTITY, "POS-OPE-0001");
        assert_eq!(classify(&row), RowRole::Plain);

        let row = Row::new().with(fields::INDENT, 5).with(fields::IS_GROUP, 0);
        assert_eq!(classify(&row), RowRole::Plain);
    }
}
