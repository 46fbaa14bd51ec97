//! # Chart Presenter
//!
//! Drives the external chart renderer. The renderer is a collaborator that
//! may be missing or broken; whatever it does, the outcome is either the
//! drawn [`ChartSet`] or a [`Notice`], never a crash.
//!
//! ## Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  session.chart_set() ── no rows / no shifts ──► Notice (data)          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  sleep(render_delay)                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  timeout(load_timeout, renderer.load()) ── err / elapsed ──►           │
//! │         │                                  Notice::ChartsUnavailable   │
//! │         ▼                                                               │
//! │  sleep(mount_delay)                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  renderer.render(&charts) ── err ──► Notice::ChartRenderFailed         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │      ChartSet                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;

use shift_core::ChartSet;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ChartSettings;
use crate::error::Notice;
use crate::session::ReportSession;

/// Failure reported by a chart renderer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RendererError(pub String);

// =============================================================================
// Renderer Trait
// =============================================================================

/// The charting collaborator (implemented by the host UI).
pub trait ChartRenderer: Send + Sync {
    /// Makes the renderer ready to draw (e.g. fetches its library).
    fn load(&self) -> impl Future<Output = Result<(), RendererError>> + Send;

    /// Draws the three chart panels.
    fn render(&self, charts: &ChartSet) -> Result<(), RendererError>;
}

/// Renderer that prints the chart set as pretty JSON on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ChartRenderer for JsonRenderer {
    async fn load(&self) -> Result<(), RendererError> {
        Ok(())
    }

    fn render(&self, charts: &ChartSet) -> Result<(), RendererError> {
        let json =
            serde_json::to_string_pretty(charts).map_err(|e| RendererError(e.to_string()))?;
        println!("{json}");
        Ok(())
    }
}

// =============================================================================
// Presenter
// =============================================================================

/// Shows the charts of a report session through a [`ChartRenderer`].
#[derive(Debug)]
pub struct ChartPresenter<R> {
    renderer: R,
    settings: ChartSettings,
}

impl<R: ChartRenderer> ChartPresenter<R> {
    pub fn new(renderer: R, settings: ChartSettings) -> Self {
        ChartPresenter { renderer, settings }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Prepares, loads and renders the charts for `session`.
    pub async fn present(&self, session: &ReportSession) -> Result<ChartSet, Notice> {
        let charts = session.chart_set()?;

        tokio::time::sleep(self.settings.render_delay()).await;

        match tokio::time::timeout(self.settings.load_timeout(), self.renderer.load()).await {
            Ok(Ok(())) => debug!("Chart renderer loaded"),
            Ok(Err(e)) => {
                warn!(error = %e, "Chart renderer failed to load");
                return Err(Notice::ChartsUnavailable);
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.settings.load_timeout_ms,
                    "Chart renderer load timed out"
                );
                return Err(Notice::ChartsUnavailable);
            }
        }

        tokio::time::sleep(self.settings.mount_delay()).await;

        if let Err(e) = self.renderer.render(&charts) {
            warn!(error = %e, "Chart rendering failed");
            return Err(Notice::ChartRenderFailed);
        }

        debug!("Charts rendered");
        Ok(charts)
    }
}
