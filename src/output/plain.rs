//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::scanner::ScanReport;
use crate::services;
use console::style;
use std::io::{self, Write};
use std::net::IpAddr;

const RULE: &str = "═══════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────";

/// Write a report in human-readable plain text format.
///
/// The summary block is always present, even when nothing was open.
pub fn write_plain<W: Write>(out: &mut W, report: &ScanReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(
        out,
        "                    {} Scan Results",
        style("portsweep").cyan().bold()
    )?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    writeln!(out, "  {} {}", style("Target:").bold(), report.address)?;
    writeln!(out, "  {} {}", style("Scan Type:").bold(), report.scan_kind)?;
    writeln!(out, "  {} {}", style("Workers:").bold(), report.workers)?;
    writeln!(out)?;

    writeln!(
        out,
        "  {} {} ports scanned in {:.2}s",
        style("Statistics:").bold(),
        report.ports_scanned,
        report.duration_ms as f64 / 1000.0
    )?;
    writeln!(
        out,
        "              {} open ports found",
        style(report.open_ports()).green().bold()
    )?;
    if report.interrupted {
        writeln!(
            out,
            "              {} scan interrupted after {} of {} ports; results are partial",
            style("!").yellow().bold(),
            report.ports_scanned,
            report.total_ports
        )?;
    }
    writeln!(out)?;

    if report.results.is_empty() {
        writeln!(out, "  {}", style("No open ports found.").dim())?;
    } else {
        writeln!(out, "  {}", style(THIN_RULE).dim())?;
        writeln!(
            out,
            "  {:>6}  {:<8}  {}",
            style("PORT").bold(),
            style("STATE").bold(),
            style("SERVICE").bold()
        )?;
        writeln!(out, "  {}", style(THIN_RULE).dim())?;

        for result in &report.results {
            writeln!(
                out,
                "  {:>6}  {:<8}  {}",
                result.port,
                style("open").green().bold(),
                result.service_name
            )?;
            if let Some(note) = &result.security_note {
                writeln!(out, "          {} {}", style("⚠").yellow().bold(), style(note).yellow())?;
            }
        }

        writeln!(out, "  {}", style(THIN_RULE).dim())?;
    }

    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    Ok(())
}

/// Print a scan header before scanning begins.
pub fn print_scan_header(address: IpAddr, ports: &str, total: usize, workers: usize) {
    eprintln!();
    eprintln!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("portsweep").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    eprintln!("{} Target: {}", style("•").dim(), style(address).white().bold());
    eprintln!(
        "{} Ports: {} ({} total)",
        style("•").dim(),
        style(ports).yellow(),
        total
    );
    eprintln!("{} Workers: {}", style("•").dim(), workers);
    eprintln!();
}

/// Print the name, description and security note of a port.
pub fn print_service(port: u16) {
    println!("{:>6}  {}", style(port).bold(), services::describe(port));
    if let Some(note) = services::security_note(port) {
        println!("        {} {}", style("⚠").yellow().bold(), style(note).yellow());
    }
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    eprintln!("{} {}", style("ℹ").blue().bold(), msg);
}
