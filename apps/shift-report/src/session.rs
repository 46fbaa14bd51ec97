//! # Report Session
//!
//! Holds the rows of the report currently on screen, together with the
//! currency settings every view of them shares.
//!
//! ## Aggregate Cache
//! ```text
//! set_rows(rows) ──► cache cleared
//!                          │
//! aggregates() ────────────┼──► first call: aggregate(rows), stored
//!                          └──► later calls: stored value
//! ```
//! The cache is only an optimization; a fresh `aggregate(rows)` always gives
//! the same value.

use std::sync::{Arc, OnceLock};

use shift_core::{
    aggregate, format_row, prepare_charts, shift_rows, summarize, summary_panel, Aggregates, Cell,
    ChartSet, CurrencyFormatter, Row, StandardFormatter, SummaryPanel, SummaryStats,
};
use tracing::debug;

use crate::error::Notice;

/// Shared currency formatter handle.
pub type SharedFormatter = Arc<dyn CurrencyFormatter + Send + Sync>;

/// The report currently loaded.
pub struct ReportSession {
    rows: Vec<Row>,
    currency: String,
    formatter: SharedFormatter,
    aggregates: OnceLock<Aggregates>,
}

impl ReportSession {
    /// Creates a session formatting amounts with [`StandardFormatter`].
    pub fn new(rows: Vec<Row>, currency: impl Into<String>) -> Self {
        ReportSession {
            rows,
            currency: currency.into(),
            formatter: Arc::new(StandardFormatter),
            aggregates: OnceLock::new(),
        }
    }

    /// Replaces the currency formatter.
    pub fn with_formatter(mut self, formatter: SharedFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn formatter(&self) -> &dyn CurrencyFormatter {
        self.formatter.as_ref()
    }

    /// Replaces the rows (a report refresh) and drops cached aggregates.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        debug!(rows = rows.len(), "Report rows replaced");
        self.rows = rows;
        self.aggregates = OnceLock::new();
    }

    /// Number of shift rows (grand total excluded).
    pub fn shift_count(&self) -> usize {
        shift_rows(&self.rows).len()
    }

    /// Aggregates of the current rows, computed once per row set.
    pub fn aggregates(&self) -> &Aggregates {
        self.aggregates.get_or_init(|| {
            debug!(rows = self.rows.len(), "Computing report aggregates");
            aggregate(&self.rows)
        })
    }

    pub fn stats(&self) -> SummaryStats {
        summarize(&self.rows)
    }

    pub fn summary_panel(&self) -> SummaryPanel {
        summary_panel(&self.stats(), self.formatter(), &self.currency)
    }

    /// Formatted cells of every row, in row order.
    pub fn formatted_rows(&self) -> Vec<Vec<(String, Cell)>> {
        self.rows
            .iter()
            .map(|row| format_row(row, self.formatter(), &self.currency))
            .collect()
    }

    /// Fails with a notice when there is nothing a chart or export could show.
    pub fn ensure_shift_data(&self, empty: Notice, no_shifts: Notice) -> Result<(), Notice> {
        if self.rows.is_empty() {
            return Err(empty);
        }
        if self.shift_count() == 0 {
            return Err(no_shifts);
        }
        Ok(())
    }

    /// Chart panels for the current rows.
    pub fn chart_set(&self) -> Result<ChartSet, Notice> {
        self.ensure_shift_data(Notice::NoChartData, Notice::NoShiftChartData)?;
        Ok(prepare_charts(&self.rows, self.aggregates(), &self.currency))
    }
}

impl std::fmt::Debug for ReportSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportSession")
            .field("rows", &self.rows.len())
            .field("currency", &self.currency)
            .field("aggregates_cached", &self.aggregates.get().is_some())
            .finish()
    }
}
