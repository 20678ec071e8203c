//! Scan subcommand implementation.
//!
//! Handles `portsweep scan <target>` for contiguous port ranges.

use super::{cancel_on_ctrl_c, emit_report, resolve_format};
use crate::config::AppSettings;
use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use crate::scanner::{check_thread_count, Coordinator};
use crate::types::{resolve_address, PortRange, ScanTarget};
use clap::Parser;
use std::time::Duration;

/// Scan a contiguous port range on a target.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Target to scan (IP address or hostname)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// First port of the range
    #[arg(short = 's', long)]
    pub start_port: Option<u16>,

    /// Last port of the range
    #[arg(short = 'e', long)]
    pub end_port: Option<u16>,

    /// Port range as "START-END" or a single port
    #[arg(short = 'p', long, conflicts_with_all = ["start_port", "end_port"])]
    pub ports: Option<PortRange>,

    /// Number of concurrent workers
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Connection timeout per port in milliseconds
    #[arg(long = "timeout-ms")]
    pub timeout_ms: Option<u64>,

    /// Output format for results
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Show a progress bar while scanning
    #[arg(long)]
    pub progress: bool,
}

impl ScanCommand {
    /// Execute the scan command.
    pub async fn execute(&self, settings: &AppSettings, quiet: bool) -> CliResult<()> {
        // Validate the range and thread count before touching the network.
        let range = match self.ports {
            Some(range) => range,
            None => PortRange::from_bounds(
                self.start_port.unwrap_or(settings.default_start_port),
                self.end_port.unwrap_or(settings.default_end_port),
            )?,
        };
        let threads = self.threads.unwrap_or(settings.default_threads);
        check_thread_count(threads)?;
        let timeout = Duration::from_millis(self.timeout_ms.unwrap_or(settings.timeout_ms));
        let format = resolve_format(self.output, settings);

        let address = resolve_address(&self.target).await?;
        if !quiet && address.to_string() != self.target.trim() {
            output::print_info(&format!("Resolved {} to {}", self.target, address));
        }
        let target = ScanTarget::with_range(address, range);

        let coordinator = Coordinator::new(timeout)
            .with_progress_bar(!quiet && (self.progress || settings.show_progress));
        cancel_on_ctrl_c(coordinator.cancel_token());

        if !quiet && format == OutputFormat::Plain {
            output::print_scan_header(
                address,
                &range.to_string(),
                range.total_ports(),
                threads.min(range.total_ports()),
            );
        }

        let report = coordinator.scan(&target, threads).await?;

        emit_report(&report, format, quiet)
    }
}
