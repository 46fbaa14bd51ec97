//! # shift-core: Pure Report Pipeline for the POS Shift Summary
//!
//! This crate holds every decision the POS shift summary report makes about
//! its rows: how they nest, what they add up to, and how they are exported.
//! It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     POS Shift Summary Report                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Report engine (host)                            │   │
//! │  │      closing shifts ──► rows (+ GRAND TOTAL) ──► data grid      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON rows                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shift-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ hierarchy │  │ aggregate │  │  summary  │  │  export   │  │   │
//! │  │   │  RowRole  │  │ Aggregates│  │  Stats    │  │ CSV/clip  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │   cell    │  │  charts   │  │ assembly  │                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO GLOBAL STATE                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            shift-report (CLI, session, chart presenter)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Rows, roles and aggregate/summary types
//! - [`numeric`] - Lenient number coercion for report cells
//! - [`hierarchy`] - Row role classification
//! - [`aggregate`] - Cost-center, payment and trend totals
//! - [`summary`] - Summary statistics and the summary panel
//! - [`export`] - Clipboard text and CSV
//! - [`currency`] - Currency formatting seam
//! - [`columns`] - Fixed report columns
//! - [`cell`] - Per-cell display styling
//! - [`charts`] - Chart series preparation
//! - [`assembly`] - Closing shifts to report rows
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use serde_json::json;
//! use shift_core::{summarize, to_clipboard_text, Row, StandardFormatter};
//!
//! let rows = Row::list_from_json(json!([
//!     {"pos_opening_shift": "S1", "total_grand_total": 100, "total_cash_sales": 60, "total_card_sales": 40},
//!     {"pos_opening_shift": "S2", "total_grand_total": 50, "total_cash_sales": 50},
//!     {"pos_opening_shift": "GRAND TOTAL", "total_grand_total": 150},
//! ]))
//! .unwrap();
//!
//! let stats = summarize(&rows);
//! assert_eq!(stats.shift_count, 2);
//! assert_eq!(stats.avg_per_shift, Some(75.0));
//!
//! let text = to_clipboard_text(&stats, &StandardFormatter, "USD");
//! assert!(text.contains("Total Sales: $150.00"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod assembly;
pub mod cell;
pub mod charts;
pub mod columns;
pub mod currency;
pub mod error;
pub mod export;
pub mod hierarchy;
pub mod numeric;
pub mod summary;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregate::aggregate;
pub use assembly::{assemble_rows, ClosingShift, PaymentLine, ShiftSource};
pub use cell::{format_cell, format_row, Cell, CellStyle};
pub use charts::{prepare_charts, ChartKind, ChartPanel, ChartSeries, ChartSet};
pub use columns::{report_columns, Column, FieldType};
pub use currency::{CurrencyFormatter, StandardFormatter};
pub use error::{CoreError, CoreResult};
pub use export::{csv_filename, to_clipboard_text, to_csv};
pub use hierarchy::classify;
pub use summary::{summarize, summary_panel, SummaryPanel};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency used when neither the caller nor the company names one.
pub const DEFAULT_CURRENCY: &str = "QAR";
