//! Result types produced by a scan.

use crate::types::Port;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// One confirmed-open port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// The port that accepted a connection.
    pub port: Port,
    /// Static service label for the port.
    pub service_name: String,
    /// Cautionary note for historically risky ports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_note: Option<String>,
}

impl ScanResult {
    pub fn new(port: Port, service_name: impl Into<String>) -> Self {
        Self {
            port,
            service_name: service_name.into(),
            security_note: None,
        }
    }

    /// Set the security note.
    pub fn with_security_note(mut self, note: Option<String>) -> Self {
        self.security_note = note;
        self
    }
}

/// Which flavour of scan produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    /// Contiguous port range.
    Range,
    /// Curated list of well-known ports.
    Quick,
}

impl fmt::Display for ScanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range => write!(f, "range"),
            Self::Quick => write!(f, "quick"),
        }
    }
}

/// Everything a finished (or interrupted) scan hands back to its caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub address: IpAddr,
    pub scan_kind: ScanKind,
    /// Ports actually probed.
    pub ports_scanned: u64,
    /// Ports the scan was asked to probe.
    pub total_ports: usize,
    /// Effective worker count after clamping.
    pub workers: usize,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// Set when cancellation stopped the scan before the queue drained.
    pub interrupted: bool,
    /// Open ports, ascending by port number.
    pub results: Vec<ScanResult>,
}

impl ScanReport {
    /// Number of open ports found.
    pub fn open_ports(&self) -> usize {
        self.results.len()
    }

    /// Whether every requested port was probed.
    pub fn is_complete(&self) -> bool {
        !self.interrupted && self.ports_scanned == self.total_ports as u64
    }

    /// One-line summary, e.g. `"127.0.0.1 - 1024 ports scanned, 2 open [1.52s]"`.
    pub fn summary(&self) -> String {
        format!(
            "{} - {} ports scanned, {} open [{:.2}s]",
            self.address,
            self.ports_scanned,
            self.open_ports(),
            self.duration_ms as f64 / 1000.0
        )
    }
}
