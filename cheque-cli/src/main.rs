use anyhow::{bail, Context, Result};
use cheque_core::{dashboard_rows, filter_rows, summarize, ChequeExtractor, DashboardRow, Fetched};
use cheque_ingest::load_upload;
use cheque_store::{ChequeStore, ExportFormat};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod config;
mod gemini;
mod render;
mod state;

use config::Config;
use gemini::GeminiClient;

#[derive(Parser, Debug)]
#[command(
    name = "chequemate",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CHEQUEMATE_BUILD_SHA"), ")"),
    about = "Automated cheque processing: extract, store and report cheque details"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract cheque details from an image or PDF and save them
    Extract {
        /// Cheque file (jpg, jpeg, png or pdf)
        file: PathBuf,

        /// Print the extracted details without saving them
        #[arg(long)]
        dry_run: bool,
    },

    /// Show stored cheque records
    Dashboard {
        /// Only show rows containing this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,
    },

    /// Show totals, status counts and the bank-wise distribution
    Analytics,

    /// Download stored cheque records as CSV or JSON
    Export {
        #[arg(long, value_enum, default_value_t = ExportArg::Csv)]
        format: ExportArg,

        /// Output path (default: cheque_records.csv / cheque_records.json)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Only export rows containing this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,
    },

    /// Manage ~/.chequemate/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,

    /// Print the effective configuration (API key masked)
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportArg {
    Csv,
    Json,
}

impl From<ExportArg> for ExportFormat {
    fn from(a: ExportArg) -> Self {
        match a {
            ExportArg::Csv => ExportFormat::Csv,
            ExportArg::Json => ExportFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_logging(&cfg.logging.level);

    match cli.command {
        Command::Extract { file, dry_run } => extract(&cfg, file, dry_run)?,

        Command::Dashboard { search } => {
            let Some(rows) = dashboard_for(&cfg, search.as_deref()) else {
                println!("{}", render::NO_DATA);
                return Ok(());
            };
            println!("# Dashboard\n");
            if rows.is_empty() {
                println!("No records match the search.");
            } else {
                print!("{}", render::dashboard_table(&rows));
            }
            println!("\n{} record(s)", rows.len());
        }

        Command::Analytics => {
            let fetched = fetch_for_reporting(&cfg);
            if fetched.is_no_data() {
                println!("{}", render::NO_DATA);
                return Ok(());
            }
            print!("{}", render::analytics(&summarize(&fetched)));
        }

        Command::Export { format, out, search } => {
            let format = ExportFormat::from(format);
            let Some(rows) = dashboard_for(&cfg, search.as_deref()) else {
                println!("{}", render::NO_DATA);
                return Ok(());
            };
            let body = format.render(&rows).context("rendering export")?;
            let path = out.unwrap_or_else(|| PathBuf::from(format.default_file_name()));
            fs::write(&path, body).with_context(|| format!("write {}", path.display()))?;
            println!(
                "Exported {} record(s) to {} ({})",
                rows.len(),
                path.display(),
                format.mime_type()
            );
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}\n", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg.redacted())?);
                println!("\n# database file: {}", cfg.database_path()?.display());
            }
        },
    }

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn extract(cfg: &Config, file: PathBuf, dry_run: bool) -> Result<()> {
    let upload = load_upload(&file)?;
    println!("Uploaded: {} ({})", upload.file_name, upload.mime_type());

    let extractor = ChequeExtractor::new(GeminiClient::new(cfg.gemini_config()?));
    println!("Processing cheque... please wait");

    let extraction = match extractor.extract(&upload.bytes, upload.mime_type()) {
        Ok(x) => x,
        Err(e) => {
            if let Some(raw) = e.raw_response() {
                eprintln!("Raw response for debugging:\n{raw}\n");
            }
            bail!("Failed to get cheque details: {e}");
        }
    };

    println!("\nExtracted cheque details:");
    println!("{}", serde_json::to_string_pretty(&extraction.payload)?);
    if extraction.record.is_blank() {
        warn!("model response contained none of the cheque fields");
    }

    if dry_run {
        println!("\n(dry run: not saved)");
        return Ok(());
    }

    let store = ChequeStore::open(cfg.database_path()?)?;
    if store.save(&extraction.record) {
        println!("\nCheque details saved to database successfully!");
        Ok(())
    } else {
        bail!("Failed to save cheque details to {}", store.path().display())
    }
}

/// Store read for dashboards and analytics; any storage failure is "no data".
fn fetch_for_reporting(cfg: &Config) -> Fetched {
    let path = match cfg.database_path() {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "no database path; reporting no data");
            return Fetched::NoData;
        }
    };
    match ChequeStore::open(&path) {
        Ok(store) => store.fetch_or_no_data(),
        Err(e) => {
            warn!(error = %e, "opening database failed; reporting no data");
            Fetched::NoData
        }
    }
}

/// `None` when the store has no data at all.
fn dashboard_for(cfg: &Config, search: Option<&str>) -> Option<Vec<DashboardRow>> {
    let fetched = fetch_for_reporting(cfg);
    if fetched.is_no_data() {
        return None;
    }
    let rows = dashboard_rows(fetched.rows());
    Some(match search {
        Some(q) => filter_rows(rows, q),
        None => rows,
    })
}
