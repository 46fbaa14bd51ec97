//! # Export Actions
//!
//! The export dialog: a summary panel plus two actions, copy and download.
//! [`ExportActions`] is an explicit handler bound to one stats snapshot;
//! it is created per dialog and dropped with it.
//!
//! ```text
//! ExportActions::open(session)
//!   ├── no rows ─────────────► Notice::NoExportData
//!   ├── only GRAND TOTAL ────► Notice::NoShiftExportData
//!   └── ok ──► panel()
//!              copy_summary()            ─► clipboard text
//!              download_csv(dir, today)  ─► <dir>/pos_shift_summary_<date>.csv
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use shift_core::{csv_filename, to_clipboard_text, to_csv, SummaryPanel, SummaryStats};
use tracing::info;

use crate::error::{Notice, ReportResult};
use crate::session::ReportSession;

/// Confirmation shown after the summary is copied.
pub const COPY_CONFIRMATION: &str = "Summary copied to clipboard!";

/// Confirmation shown after the CSV is written.
pub const DOWNLOAD_CONFIRMATION: &str = "CSV file downloaded successfully!";

/// Copy / download handlers for one report snapshot.
#[derive(Debug)]
pub struct ExportActions<'a> {
    session: &'a ReportSession,
    stats: SummaryStats,
}

impl<'a> ExportActions<'a> {
    /// Opens the export dialog for the session's current rows.
    pub fn open(session: &'a ReportSession) -> Result<Self, Notice> {
        session.ensure_shift_data(Notice::NoExportData, Notice::NoShiftExportData)?;
        Ok(ExportActions {
            session,
            stats: session.stats(),
        })
    }

    pub fn stats(&self) -> &SummaryStats {
        &self.stats
    }

    /// The dialog's summary panel.
    pub fn panel(&self) -> SummaryPanel {
        shift_core::summary_panel(&self.stats, self.session.formatter(), self.session.currency())
    }

    /// Text placed on the clipboard by "Copy Summary".
    pub fn copy_summary(&self) -> String {
        to_clipboard_text(&self.stats, self.session.formatter(), self.session.currency())
    }

    /// Writes the shift CSV into `dir` and returns the file path.
    pub fn download_csv(&self, dir: &Path, today: NaiveDate) -> ReportResult<PathBuf> {
        let csv = to_csv(self.session.rows())?;

        std::fs::create_dir_all(dir)?;
        let path = dir.join(csv_filename(today));
        std::fs::write(&path, csv)?;

        info!(
            path = %path.display(),
            shifts = self.stats.shift_count,
            "Shift CSV written"
        );
        Ok(path)
    }
}
