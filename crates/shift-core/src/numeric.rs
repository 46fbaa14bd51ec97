//! # Numeric Coercion
//!
//! Report cells arrive as loosely typed JSON: numbers, numeric strings, empty
//! strings, `null`, or nothing at all. Every aggregation path reads them
//! through [`to_amount`], which never fails.
//!
//! ## Coercion Table
//! ```text
//! ┌──────────────────────────────┬──────────────┐
//! │  Cell                        │  Amount      │
//! ├──────────────────────────────┼──────────────┤
//! │  120.5                       │  120.5       │
//! │  "120.5"                     │  120.5       │
//! │  "  42abc"                   │  42.0        │  (leading numeric prefix)
//! │  "abc" / "" / null / absent  │  0.0         │
//! │  true / [..] / {..}          │  0.0         │
//! │  NaN / ±inf (any source)     │  0.0         │
//! └──────────────────────────────┴──────────────┘
//! ```

use serde_json::Value;

/// Coerces an optional cell into a finite amount. Anything unusable is zero.
pub fn to_amount(value: Option<&Value>) -> f64 {
    let amount = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_leading_float(s).unwrap_or(0.0),
        _ => 0.0,
    };

    if amount.is_finite() {
        amount
    } else {
        0.0
    }
}

/// Parses the longest numeric prefix of `s`, after leading whitespace.
///
/// Accepts an optional sign, digits, one decimal point and an exponent.
/// Returns `None` when no digits are found.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }

    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when it has at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Renders an amount the way a raw cell is shown in exports: integral values
/// without a fractional part, everything else in shortest round-trip form.
pub fn raw_number(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{}", amount)
    }
}

/// Raw text of a cell as exported: strings verbatim, numbers via
/// [`raw_number`], absent and null cells empty.
pub fn raw_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map(raw_number).unwrap_or_else(|| n.to_string()),
        },
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(to_amount(Some(&json!(120.5))), 120.5);
        assert_eq!(to_amount(Some(&json!(-3))), -3.0);
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(to_amount(Some(&json!("120.5"))), 120.5);
        assert_eq!(to_amount(Some(&json!("  42abc"))), 42.0);
        assert_eq!(to_amount(Some(&json!("1e3"))), 1000.0);
        assert_eq!(to_amount(Some(&json!("7e"))), 7.0);
        assert_eq!(to_amount(Some(&json!(".5"))), 0.5);
    }

    #[test]
    fn test_unusable_cells_are_zero() {
        assert_eq!(to_amount(None), 0.0);
        assert_eq!(to_amount(Some(&Value::Null)), 0.0);
        assert_eq!(to_amount(Some(&json!(""))), 0.0);
        assert_eq!(to_amount(Some(&json!("abc"))), 0.0);
        assert_eq!(to_amount(Some(&json!("-"))), 0.0);
        assert_eq!(to_amount(Some(&json!(true))), 0.0);
        assert_eq!(to_amount(Some(&json!([1, 2]))), 0.0);
    }

    #[test]
    fn test_raw_number() {
        assert_eq!(raw_number(100.0), "100");
        assert_eq!(raw_number(-5.0), "-5");
        assert_eq!(raw_number(100.25), "100.25");
        assert_eq!(raw_number(0.1), "0.1");
    }

    #[test]
    fn test_raw_text() {
        assert_eq!(raw_text(None), "");
        assert_eq!(raw_text(Some(&Value::Null)), "");
        assert_eq!(raw_text(Some(&json!("2025-03-01"))), "2025-03-01");
        assert_eq!(raw_text(Some(&json!(42))), "42");
        assert_eq!(raw_text(Some(&json!(42.0))), "42");
        assert_eq!(raw_text(Some(&json!(0.25))), "0.25");
    }
}
