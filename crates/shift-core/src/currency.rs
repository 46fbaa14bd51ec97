//! # Currency Formatting
//!
//! The report never formats money itself; it hands an amount and an ISO 4217
//! code to a [`CurrencyFormatter`]. The host decides locale rules.
//!
//! ## Where Formatting Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SummaryStats ──► clipboard text / summary panel ──┐                   │
//! │                                                    ├──► formatter       │
//! │  Row cell (total_* / cost_center_*) ──► cell ──────┘    (amount, code) │
//! │                                                                         │
//! │  CSV export ──► RAW values, never formatted                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`StandardFormatter`] is the built-in implementation used by the CLI: en-US
//! grouping, two fraction digits, a symbol for well-known codes and the bare
//! code otherwise.
//!
//! ## Usage
//! ```rust
//! use shift_core::currency::{CurrencyFormatter, StandardFormatter};
//!
//! let fmt = StandardFormatter;
//! assert_eq!(fmt.format(1234.5, "USD"), "$1,234.50");
//! assert_eq!(fmt.format(1234.5, "QAR"), "QAR 1,234.50");
//! ```

// =============================================================================
// Formatter Trait
// =============================================================================

/// Formats a monetary amount for display.
///
/// Implementations must be total for finite amounts.
pub trait CurrencyFormatter {
    fn format(&self, amount: f64, currency_code: &str) -> String;
}

/// Any `Fn(f64, &str) -> String` is a formatter.
impl<F> CurrencyFormatter for F
where
    F: Fn(f64, &str) -> String,
{
    fn format(&self, amount: f64, currency_code: &str) -> String {
        self(amount, currency_code)
    }
}

// =============================================================================
// Standard Formatter
// =============================================================================

/// en-US style formatter: `$1,234.50`, `-€12.00`, `QAR 1,234.50`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormatter;

impl StandardFormatter {
    /// Display symbol for a currency code, if it has a well-known one.
    pub fn symbol(currency_code: &str) -> Option<&'static str> {
        match currency_code.to_ascii_uppercase().as_str() {
            "USD" => Some("$"),
            "EUR" => Some("€"),
            "GBP" => Some("£"),
            "JPY" => Some("¥"),
            "INR" => Some("₹"),
            "CAD" => Some("CA$"),
            "AUD" => Some("A$"),
            _ => None,
        }
    }
}

impl CurrencyFormatter for StandardFormatter {
    fn format(&self, amount: f64, currency_code: &str) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let fixed = format!("{:.2}", amount.abs());
        let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        // "-0.00" would be noise
        let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
        let number = format!("{}.{}", group_thousands(whole), frac);

        match Self::symbol(currency_code) {
            Some(symbol) => format!("{}{}{}", sign, symbol, number),
            None => format!("{}{} {}", sign, currency_code.to_ascii_uppercase(), number),
        }
    }
}

/// `1234567` → `1,234,567`.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
