//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of scan reports.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::write_csv;
pub use json_format::write_json;
pub use plain::{
    print_error, print_info, print_scan_header, print_service, print_warning, write_plain,
};

use crate::scanner::ScanReport;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// Render a report to `out` in the requested format.
pub fn write_report<W: Write>(out: &mut W, report: &ScanReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => write_plain(out, report),
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Csv => write_csv(out, report),
    }
}

/// Render a report to stdout.
pub fn print_results(report: &ScanReport, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report, format)?;
    out.flush()
}

/// Summary line for stderr when the stdout body does not carry one.
///
/// Plain output prints its own summary; JSON and CSV stay machine-readable
/// and get this line alongside.
pub fn side_summary(report: &ScanReport, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Plain => None,
        OutputFormat::Json | OutputFormat::Csv => Some(report.summary()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("CSV".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert_eq!("plain".parse::<OutputFormat>(), Ok(OutputFormat::Plain));
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "plain");
    }

    #[test]
    fn test_write_report_dispatches() {
        let report = fixtures::sample();
        let mut buf = Vec::new();
        write_report(&mut buf, &report, OutputFormat::Csv).unwrap();
        assert!(String::from_utf8(buf).unwrap().starts_with("port,"));
    }

    #[test]
    fn test_side_summary_for_machine_formats() {
        let mut report = fixtures::report(Vec::new());
        report.ports_scanned = 10;
        report.total_ports = 10;

        let csv = side_summary(&report, OutputFormat::Csv).unwrap();
        assert_eq!(csv, "127.0.0.1 - 10 ports scanned, 0 open [2.50s]");
        assert_eq!(side_summary(&report, OutputFormat::Json), Some(csv));
        assert_eq!(side_summary(&report, OutputFormat::Plain), None);
    }
}
