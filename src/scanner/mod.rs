//! Scanner module - TCP connect scanning over a bounded worker pool.
//!
//! A [`Coordinator`] fills a [`WorkQueue`] with the ports to check, spawns a
//! fixed number of tokio workers that probe through a [`Prober`], and gathers
//! the open ports into a sorted [`ScanReport`].

mod coordinator;
mod probe;
mod progress;
mod queue;
mod quick;
mod types;

pub(crate) use coordinator::check_thread_count;
pub use coordinator::Coordinator;
pub use probe::{probe, Prober, TcpProber, DEFAULT_PROBE_TIMEOUT};
pub use progress::ProgressCounter;
pub use queue::WorkQueue;
pub use quick::{quick_ports, QUICK_SCAN_PORTS, QUICK_SCAN_WORKERS};
pub use types::{ScanKind, ScanReport, ScanResult};

use crate::error::ScanError;
use crate::types::ScanTarget;

/// Scan `target` with the default prober and service tables.
pub async fn scan(target: &ScanTarget, thread_count: usize) -> Result<ScanReport, ScanError> {
    Coordinator::default().scan(target, thread_count).await
}
