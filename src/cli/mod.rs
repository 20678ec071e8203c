//! CLI subcommand definitions and handlers.
//!
//! - `portsweep scan <target>` - Scan a contiguous port range
//! - `portsweep quick <target>` - Scan a curated list of common ports
//! - `portsweep service <port>...` - Show what a port is usually used for

mod quick;
mod scan;
mod service;

pub use quick::QuickCommand;
pub use scan::ScanCommand;
pub use service::ServiceCommand;

use crate::config::AppSettings;
use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use crate::scanner::ScanReport;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// portsweep - A concurrent TCP connect port scanner.
///
/// Probes a port range on one host with a fixed pool of workers and labels
/// every open port with its well-known service name.
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A concurrent TCP connect port scanner", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a custom settings file
    #[arg(long, global = true, value_name = "PATH", env = "PORTSWEEP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a port range on a target
    #[command(alias = "s")]
    Scan(ScanCommand),

    /// Scan a short list of commonly used ports
    #[command(alias = "q")]
    Quick(QuickCommand),

    /// Look up service names and security notes for ports
    Service(ServiceCommand),
}

impl Cli {
    /// Load settings for this invocation.
    pub fn settings(&self) -> CliResult<AppSettings> {
        let settings = match &self.config {
            Some(path) => AppSettings::load_from(path)?,
            None => AppSettings::load()?,
        };
        Ok(settings)
    }

    /// Dispatch the selected subcommand.
    pub async fn execute(&self, settings: &AppSettings) -> CliResult<()> {
        match &self.command {
            Commands::Scan(cmd) => cmd.execute(settings, self.quiet).await,
            Commands::Quick(cmd) => cmd.execute(settings, self.quiet).await,
            Commands::Service(cmd) => cmd.execute(),
        }
    }
}

/// Pick the output format: flag first, then settings, then plain.
fn resolve_format(flag: Option<OutputFormat>, settings: &AppSettings) -> OutputFormat {
    flag.or_else(|| settings.output_format.parse().ok())
        .unwrap_or_default()
}

/// Print a finished report, plus its summary on stderr for JSON and CSV.
fn emit_report(report: &ScanReport, format: OutputFormat, quiet: bool) -> CliResult<()> {
    if report.interrupted {
        output::print_warning("Scan interrupted by user; showing partial results.");
    }
    output::print_results(report, format)?;
    if !quiet {
        if let Some(summary) = output::side_summary(report, format) {
            output::print_info(&summary);
        }
    }
    Ok(())
}

/// Cancel `token` when the user presses Ctrl-C.
fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, stopping scan");
            token.cancel();
        }
    });
}
