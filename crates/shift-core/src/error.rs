//! # Error Types
//!
//! Domain-specific error types for shift-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shift-core errors (this file)                                         │
//! │  └── CoreError        - Row decoding and export writer failures        │
//! │                                                                         │
//! │  shift-report errors (app crate)                                       │
//! │  ├── ReportError      - Config, I/O, input file failures               │
//! │  └── Notice           - Non-fatal, user-visible messages               │
//! │                                                                         │
//! │  Flow: CoreError → ReportError → CLI exit / Notice                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Missing rows, missing fields, unparsable numbers and zero denominators are
//! expected report conditions. They degrade to zero / `None` and never reach
//! this enum.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core pipeline errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A row in the input was not a JSON object.
    ///
    /// ## When This Occurs
    /// - The query engine returned an array of arrays (positional rows)
    /// - A stray scalar slipped into the result list
    #[error("Row {index} is not an object (found {found})")]
    InvalidRow { index: usize, found: String },

    /// The report payload had neither a row array nor a `result` array.
    #[error("Report payload has no rows: {0}")]
    MissingRows(String),

    /// The CSV writer failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV writer produced bytes that are not UTF-8.
    ///
    /// Rows are built from JSON strings, so this only happens if the writer
    /// itself misbehaves.
    #[error("CSV export produced invalid UTF-8")]
    CsvEncoding,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
