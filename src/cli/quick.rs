//! Quick subcommand implementation.

use super::{cancel_on_ctrl_c, emit_report, resolve_format};
use crate::config::AppSettings;
use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use crate::scanner::{quick_ports, Coordinator, QUICK_SCAN_PORTS, QUICK_SCAN_WORKERS};
use crate::types::resolve_address;
use clap::Parser;
use std::time::Duration;

/// Scan the curated list of commonly used ports.
#[derive(Parser, Debug)]
pub struct QuickCommand {
    /// Target to scan (IP address or hostname)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Connection timeout per port in milliseconds
    #[arg(long = "timeout-ms")]
    pub timeout_ms: Option<u64>,

    /// Output format for results
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

impl QuickCommand {
    pub async fn execute(&self, settings: &AppSettings, quiet: bool) -> CliResult<()> {
        let timeout = Duration::from_millis(self.timeout_ms.unwrap_or(settings.timeout_ms));
        let format = resolve_format(self.output, settings);

        let address = resolve_address(&self.target).await?;

        let coordinator = Coordinator::new(timeout);
        cancel_on_ctrl_c(coordinator.cancel_token());

        if !quiet && format == OutputFormat::Plain {
            output::print_scan_header(
                address,
                "quick",
                QUICK_SCAN_PORTS.len(),
                QUICK_SCAN_WORKERS,
            );
        }

        let report = coordinator.quick_scan(address, &quick_ports()).await?;

        emit_report(&report, format, quiet)
    }
}
