//! CSV output formatting.

use crate::scanner::ScanReport;
use std::io::{self, Write};

/// Write one row per open port.
pub fn write_csv<W: Write>(out: &mut W, report: &ScanReport) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(["port", "service", "security_note"])?;

    for result in &report.results {
        wtr.write_record([
            result.port.to_string().as_str(),
            result.service_name.as_str(),
            result.security_note.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
