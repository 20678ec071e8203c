//! Quick scan over a short curated list of well-known ports.

use super::coordinator::Coordinator;
use super::queue::WorkQueue;
use super::types::{ScanKind, ScanReport};
use crate::error::ScanError;
use crate::types::Port;
use std::net::IpAddr;
use tracing::instrument;

/// Historically common ports probed by a quick scan.
pub const QUICK_SCAN_PORTS: [u16; 18] = [
    21, 22, 23, 25, 53, 80, 110, 143, 443, 993, 995, 135, 139, 445, 1433, 3389, 5900, 8080,
];

/// Worker pool size for quick scans; the list is short.
pub const QUICK_SCAN_WORKERS: usize = 4;

/// [`QUICK_SCAN_PORTS`] as validated ports.
pub fn quick_ports() -> Vec<Port> {
    QUICK_SCAN_PORTS.iter().filter_map(|&p| Port::new(p)).collect()
}

impl Coordinator {
    /// Probe each port in `curated_ports` once and report the open ones.
    ///
    /// Same guarantees as [`Coordinator::scan`]; repeated entries in the list
    /// are probed once.
    #[instrument(skip(self, curated_ports), fields(ports = curated_ports.len()))]
    pub async fn quick_scan(
        &self,
        address: IpAddr,
        curated_ports: &[Port],
    ) -> Result<ScanReport, ScanError> {
        let queue = WorkQueue::from_ports(curated_ports);
        let total = queue.len();
        self.run(address, queue, total, QUICK_SCAN_WORKERS, ScanKind::Quick)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Prober;
    use crate::services::StaticServices;
    use async_trait::async_trait;
    use std::net::Ipv4Addr;
    use std::sync::{Arc, Mutex};

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    /// Records probed ports; 22 and 445 read as open.
    #[derive(Default)]
    struct RecordingProber {
        seen: Mutex<Vec<u16>>,
    }

    #[async_trait]
    impl Prober for RecordingProber {
        async fn probe(&self, _address: IpAddr, port: Port) -> bool {
            self.seen.lock().unwrap().push(port.as_u16());
            matches!(port.as_u16(), 22 | 445)
        }
    }

    #[test]
    fn test_curated_list_has_no_duplicates() {
        let mut ports = quick_ports();
        assert_eq!(ports.len(), QUICK_SCAN_PORTS.len());
        ports.sort_unstable();
        ports.dedup();
        assert_eq!(ports.len(), QUICK_SCAN_PORTS.len());
    }

    #[tokio::test]
    async fn test_quick_scan_probes_each_port_once() {
        let prober = Arc::new(RecordingProber::default());
        let coordinator = Coordinator::with_parts(prober.clone(), Arc::new(StaticServices));

        let report = coordinator.quick_scan(LOCALHOST, &quick_ports()).await.unwrap();

        let mut seen = prober.seen.lock().unwrap().clone();
        seen.sort_unstable();
        let mut expected = QUICK_SCAN_PORTS.to_vec();
        expected.sort_unstable();
        assert_eq!(seen, expected);

        assert_eq!(report.scan_kind, ScanKind::Quick);
        assert_eq!(report.workers, QUICK_SCAN_WORKERS);
        assert_eq!(report.ports_scanned, QUICK_SCAN_PORTS.len() as u64);

        let open: Vec<(u16, &str)> = report
            .results
            .iter()
            .map(|r| (r.port.as_u16(), r.service_name.as_str()))
            .collect();
        assert_eq!(open, vec![(22, "SSH"), (445, "Microsoft DS")]);
        assert!(report.results[1].security_note.is_some());
    }

    #[tokio::test]
    async fn test_quick_scan_dedups_and_handles_empty_list() {
        let prober = Arc::new(RecordingProber::default());
        let coordinator = Coordinator::with_parts(prober.clone(), Arc::new(StaticServices));

        let twice = [Port::new(22).unwrap(), Port::new(22).unwrap()];
        let report = coordinator.quick_scan(LOCALHOST, &twice).await.unwrap();
        assert_eq!(report.total_ports, 1);
        assert_eq!(report.workers, 1);
        assert_eq!(report.results.len(), 1);

        let report = coordinator.quick_scan(LOCALHOST, &[]).await.unwrap();
        assert_eq!(report.total_ports, 0);
        assert!(report.results.is_empty());
        assert!(!report.interrupted);
        assert_eq!(*prober.seen.lock().unwrap(), vec![22]);
    }
}
