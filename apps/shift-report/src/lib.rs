//! # shift-report
//!
//! Runner for the POS shift summary report: configuration, logging, input
//! loading, the report session and its export and chart actions.
//!
//! ## Module Organization
//! ```text
//! shift-report/
//! ├── config.rs     ← report.toml + SHIFT_REPORT_* overrides
//! ├── error.rs      ← ReportError, Notice
//! ├── session.rs    ← ReportSession (rows + cached aggregates)
//! ├── actions.rs    ← ExportActions (copy summary, download CSV)
//! └── presenter.rs  ← ChartRenderer, ChartPresenter
//! ```
//!
//! ## Input Files
//! A rows file is JSON in one of three shapes:
//! - an array of row objects (the report's data grid)
//! - a report response `{ "result": [ ...rows ] }`
//! - raw closing-shift records `{ "closing_shifts": [...], "payments": [...],
//!   "payment_modes": {...} }`, assembled into rows on load

pub mod actions;
pub mod config;
pub mod error;
pub mod presenter;
pub mod session;

use std::path::Path;

use serde_json::Value;
use shift_core::{assemble_rows, Row, ShiftSource};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub use actions::ExportActions;
pub use config::ReportConfig;
pub use error::{Notice, ReportError, ReportResult};
pub use presenter::{ChartPresenter, ChartRenderer, JsonRenderer, RendererError};
pub use session::ReportSession;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shift_core=trace` - Show trace for the pipeline only
/// - Default: INFO, DEBUG for the report crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shift_core=debug,shift_report=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads a rows file.
pub fn load_rows(path: &Path) -> ReportResult<Vec<Row>> {
    let contents = std::fs::read_to_string(path)?;
    let rows = parse_rows(&contents)?;
    info!(path = %path.display(), rows = rows.len(), "Report rows loaded");
    Ok(rows)
}

/// Parses any of the accepted input shapes into report rows.
pub fn parse_rows(contents: &str) -> ReportResult<Vec<Row>> {
    let payload: Value = serde_json::from_str(contents)?;

    if payload.get("closing_shifts").is_some() {
        debug!("Input holds closing shifts, assembling rows");
        let source: ShiftSource = serde_json::from_value(payload)?;
        return Ok(assemble_rows(&source));
    }

    Ok(Row::list_from_json(payload)?)
}
