//! # Report Error Types
//!
//! Errors and notices raised by the report runner.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Report Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Input       │  │     Notice              │ │
//! │  │                 │  │                 │  │  (non-fatal, shown to   │ │
//! │  │  InvalidConfig  │  │  Io             │  │   the user as-is)       │ │
//! │  │  ConfigParse    │  │  Json           │  │                         │ │
//! │  │                 │  │  Core           │  │  NoChartData            │ │
//! │  │                 │  │                 │  │  ChartsUnavailable ...  │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Report runner errors.
#[derive(Debug, Error)]
pub enum ReportError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A config value is out of range or inconsistent.
    #[error("Invalid report configuration: {0}")]
    InvalidConfig(String),

    /// `report.toml` is not valid TOML or has the wrong shape.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // =========================================================================
    // Input / Output Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The rows file is not valid JSON.
    #[error("Invalid report JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Row decoding or CSV writing failed in the pipeline.
    #[error(transparent)]
    Core(#[from] shift_core::CoreError),

    // =========================================================================
    // User-Facing
    // =========================================================================
    /// A condition the user should see as a message, not a failure.
    #[error(transparent)]
    Notice(#[from] Notice),
}

impl ReportError {
    /// The notice carried by this error, if it is one.
    pub fn as_notice(&self) -> Option<&Notice> {
        match self {
            ReportError::Notice(notice) => Some(notice),
            _ => None,
        }
    }
}

// =============================================================================
// Notices
// =============================================================================

/// Non-fatal, user-visible messages.
///
/// Every failure of the chart collaborator and every empty-data condition of
/// an action ends here. Nothing in the report crashes on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Notice {
    /// The report has no rows at all.
    #[error("No data available for charts. Please ensure the report has data and try again.")]
    NoChartData,

    /// The report has rows, but none of them is a shift.
    #[error("No shift data available for charts. Please ensure you have closed shifts in the selected date range.")]
    NoShiftChartData,

    /// The chart renderer could not be loaded (or timed out).
    #[error("Charts are not available. Please check your internet connection.")]
    ChartsUnavailable,

    /// The chart renderer failed while drawing.
    #[error("Error creating charts. Please try again.")]
    ChartRenderFailed,

    /// Export was requested on an empty report.
    #[error("No data available for export.")]
    NoExportData,

    /// Export was requested on a report without shift rows.
    #[error("No shift data available for export.")]
    NoShiftExportData,
}
