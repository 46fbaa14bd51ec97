//! # Report Configuration
//!
//! Configuration for the report runner.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. CLI flags (highest priority, applied by main)                      │
//! │     --currency EUR                                                     │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     SHIFT_REPORT_COMPANY="Petra Restaurant"                            │
//! │     SHIFT_REPORT_RENDER_DELAY_MS=0                                     │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/shift-report/report.toml (Linux)                         │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     QAR, charts after 2000 ms                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # report.toml
//! [currency]
//! fallback = "QAR"
//!
//! [company]
//! name = "Petra Restaurant"
//!
//! [companies."Petra Restaurant"]
//! default_currency = "QAR"
//!
//! [charts]
//! enabled = true
//! render_delay_ms = 2000
//! mount_delay_ms = 100
//! load_timeout_ms = 10000
//!
//! [export]
//! output_dir = "./exports"
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ReportError, ReportResult};

/// Currency used when the active company has no default currency.
pub const COMPANY_FALLBACK_CURRENCY: &str = "USD";

// =============================================================================
// Currency Settings
// =============================================================================

/// Currency used when no company is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencySettings {
    #[serde(default = "default_currency")]
    pub fallback: String,
}

fn default_currency() -> String {
    shift_core::DEFAULT_CURRENCY.to_string()
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            fallback: default_currency(),
        }
    }
}

// =============================================================================
// Company Settings
// =============================================================================

/// The active company, if the report is filtered by one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanySettings {
    #[serde(default)]
    pub name: Option<String>,
}

/// Per-company settings, keyed by company name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(default)]
    pub default_currency: Option<String>,
}

// =============================================================================
// Chart Settings
// =============================================================================

/// Timing of the chart view.
///
/// ```text
/// report loaded ──(render_delay)──► load renderer ──(≤ load_timeout)──►
///               ──(mount_delay)───► render ChartSet
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Delay after the report loads before charts are drawn.
    #[serde(default = "default_render_delay")]
    pub render_delay_ms: u64,

    /// Delay between loading the renderer and drawing into it.
    #[serde(default = "default_mount_delay")]
    pub mount_delay_ms: u64,

    /// Upper bound on loading the renderer.
    #[serde(default = "default_load_timeout")]
    pub load_timeout_ms: u64,
}

fn default_true() -> bool {
    true
}
fn default_render_delay() -> u64 {
    2000
}
fn default_mount_delay() -> u64 {
    100
}
fn default_load_timeout() -> u64 {
    10_000
}

impl Default for ChartSettings {
    fn default() -> Self {
        ChartSettings {
            enabled: true,
            render_delay_ms: default_render_delay(),
            mount_delay_ms: default_mount_delay(),
            load_timeout_ms: default_load_timeout(),
        }
    }
}

impl ChartSettings {
    pub fn render_delay(&self) -> Duration {
        Duration::from_millis(self.render_delay_ms)
    }

    pub fn mount_delay(&self) -> Duration {
        Duration::from_millis(self.mount_delay_ms)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}

// =============================================================================
// Export Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Directory the CSV download is written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            output_dir: default_output_dir(),
        }
    }
}

// =============================================================================
// Main Report Configuration
// =============================================================================

/// Complete report runner configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub company: CompanySettings,

    #[serde(default)]
    pub companies: HashMap<String, CompanyProfile>,

    #[serde(default)]
    pub charts: ChartSettings,

    #[serde(default)]
    pub export: ExportSettings,
}

impl ReportConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (report.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ReportResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading report config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a config document. Missing sections take their defaults.
    pub fn from_toml(contents: &str) -> ReportResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ReportResult<()> {
        validate_currency_code("currency.fallback", &self.currency.fallback)?;

        for (name, profile) in &self.companies {
            if let Some(code) = &profile.default_currency {
                validate_currency_code(&format!("companies.{name}.default_currency"), code)?;
            }
        }

        if self.charts.load_timeout_ms == 0 {
            return Err(ReportError::InvalidConfig(
                "charts.load_timeout_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Currency for amounts in this report.
    ///
    /// With an active company: that company's default currency, or `USD`
    /// when it has none. Without one: the configured fallback.
    pub fn resolve_currency(&self) -> String {
        match &self.company.name {
            Some(company) => self
                .companies
                .get(company)
                .and_then(|p| p.default_currency.clone())
                .unwrap_or_else(|| COMPANY_FALLBACK_CURRENCY.to_string()),
            None => self.currency.fallback.clone(),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `SHIFT_REPORT_*` overrides from `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(code) = lookup("SHIFT_REPORT_CURRENCY") {
            debug!(currency = %code, "Overriding fallback currency from environment");
            self.currency.fallback = code;
        }

        if let Some(company) = lookup("SHIFT_REPORT_COMPANY") {
            debug!(company = %company, "Overriding company from environment");
            self.company.name = Some(company).filter(|c| !c.is_empty());
        }

        if let Some(enabled) = lookup("SHIFT_REPORT_CHARTS_ENABLED") {
            match enabled.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.charts.enabled = true,
                "0" | "false" | "no" => self.charts.enabled = false,
                _ => warn!(value = %enabled, "Unknown SHIFT_REPORT_CHARTS_ENABLED value"),
            }
        }

        if let Some(delay) = lookup("SHIFT_REPORT_RENDER_DELAY_MS") {
            if let Ok(ms) = delay.parse::<u64>() {
                self.charts.render_delay_ms = ms;
            }
        }

        if let Some(timeout) = lookup("SHIFT_REPORT_LOAD_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse::<u64>() {
                self.charts.load_timeout_ms = ms;
            }
        }

        if let Some(dir) = lookup("SHIFT_REPORT_OUTPUT_DIR") {
            self.export.output_dir = PathBuf::from(dir);
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "petra", "shift-report")
            .map(|dirs| dirs.config_dir().join("report.toml"))
    }
}

fn validate_currency_code(key: &str, code: &str) -> ReportResult<()> {
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ReportError::InvalidConfig(format!(
            "{key} must be an alphabetic currency code, got: '{code}'"
        )));
    }
    Ok(())
}
