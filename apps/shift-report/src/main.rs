//! # shift-report CLI
//!
//! ```text
//! shift-report [--config PATH] [--currency CODE] <COMMAND> <ROWS.json>
//!
//!   summary   summary panel + clipboard text
//!   csv       write pos_shift_summary_<date>.csv
//!   charts    chart panels as JSON
//!   classify  role and identity cell of every row
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shift_core::{fields, CellStyle};
use tracing::info;

use shift_report::actions::{COPY_CONFIRMATION, DOWNLOAD_CONFIRMATION};
use shift_report::{
    init_tracing, load_rows, ChartPresenter, ExportActions, JsonRenderer, Notice, ReportConfig,
    ReportSession,
};

#[derive(Parser, Debug)]
#[command(name = "shift-report")]
#[command(about = "POS shift summary report: statistics, charts and exports")]
struct Args {
    /// Config file (default: platform config dir / report.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Currency code, overriding company and fallback currency
    #[arg(long, global = true)]
    currency: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the summary panel and the clipboard summary
    Summary {
        /// JSON rows file
        rows: PathBuf,
    },

    /// Write the shift CSV
    Csv {
        /// JSON rows file
        rows: PathBuf,

        /// Output directory (default: export.output_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the chart panels as JSON
    Charts {
        /// JSON rows file
        rows: PathBuf,

        /// Skip the render and mount delays
        #[arg(long)]
        no_delay: bool,
    },

    /// Print each row's role and formatted identity cell
    Classify {
        /// JSON rows file
        rows: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = ReportConfig::load(args.config.clone()).context("Failed to load config")?;
    let currency = args
        .currency
        .clone()
        .unwrap_or_else(|| config.resolve_currency());

    info!(currency = %currency, "Report currency resolved");

    match args.command {
        Command::Summary { rows } => {
            let session = open_session(&rows, &currency)?;
            let actions = match ExportActions::open(&session) {
                Ok(actions) => actions,
                Err(notice) => return show_notice(notice),
            };

            let panel = actions.panel();
            println!("{}", panel.title);
            for section in &panel.sections {
                println!();
                println!("{}", section.title);
                for line in &section.lines {
                    println!("  {}: {}", line.label, line.value);
                }
            }

            println!();
            println!("{}", actions.copy_summary());
            eprintln!("{COPY_CONFIRMATION}");
        }

        Command::Csv { rows, out } => {
            let session = open_session(&rows, &currency)?;
            let actions = match ExportActions::open(&session) {
                Ok(actions) => actions,
                Err(notice) => return show_notice(notice),
            };

            let dir = out.unwrap_or_else(|| config.export.output_dir.clone());
            let today = chrono::Local::now().date_naive();
            let path = actions.download_csv(&dir, today)?;

            println!("{}", path.display());
            eprintln!("{DOWNLOAD_CONFIRMATION}");
        }

        Command::Charts { rows, no_delay } => {
            if !config.charts.enabled {
                info!("Charts disabled in config");
                return Ok(());
            }

            let session = open_session(&rows, &currency)?;
            let mut settings = config.charts.clone();
            if no_delay {
                settings.render_delay_ms = 0;
                settings.mount_delay_ms = 0;
            }

            let presenter = ChartPresenter::new(JsonRenderer, settings);
            if let Err(notice) = presenter.present(&session).await {
                return show_notice(notice);
            }
        }

        Command::Classify { rows } => {
            let session = open_session(&rows, &currency)?;
            for cells in session.formatted_rows() {
                let Some((_, cell)) = cells.iter().find(|(name, _)| name == fields::IDENTITY)
                else {
                    continue;
                };
                let marker = match cell.style {
                    CellStyle::GrandTotalLabel => "**",
                    CellStyle::Link => "->",
                    _ => "  ",
                };
                println!(
                    "{:<12} {}{} {}",
                    cell.role.to_string(),
                    "  ".repeat(cell.indent as usize),
                    marker,
                    cell.text
                );
            }
        }
    }

    Ok(())
}

fn open_session(rows: &Path, currency: &str) -> Result<ReportSession> {
    let rows = load_rows(rows).with_context(|| format!("Failed to read {}", rows.display()))?;
    Ok(ReportSession::new(rows, currency))
}

/// Notices are messages for the user, not failures.
fn show_notice(notice: Notice) -> Result<()> {
    eprintln!("{notice}");
    Ok(())
}
