//! Scan coordinator.
//!
//! Runs a fixed-size pool of tokio worker tasks over one shared [`WorkQueue`].
//! Each worker pulls a port, probes it, records open ports and bumps the
//! progress counter until the queue drains or the scan is cancelled. The
//! coordinator joins every worker before returning, then sorts the results.

use super::probe::{Prober, TcpProber};
use super::progress::ProgressCounter;
use super::queue::WorkQueue;
use super::types::{ScanKind, ScanReport, ScanResult};
use crate::error::ScanError;
use crate::services::{ServiceResolver, StaticServices};
use crate::types::ScanTarget;
use chrono::Utc;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// Owns the collaborators a scan needs and spawns the worker pool.
///
/// A coordinator can run any number of scans. Cancelling its token stops the
/// scan in progress and every scan started afterwards.
pub struct Coordinator {
    prober: Arc<dyn Prober>,
    resolver: Arc<dyn ServiceResolver>,
    cancel: CancellationToken,
    show_progress: bool,
}

impl Coordinator {
    /// Coordinator using real TCP connects and the built-in service tables.
    pub fn new(probe_timeout: Duration) -> Self {
        Self::with_parts(
            Arc::new(TcpProber::new(probe_timeout)),
            Arc::new(StaticServices),
        )
    }

    /// Coordinator with caller-supplied prober and resolver.
    pub fn with_parts(prober: Arc<dyn Prober>, resolver: Arc<dyn ServiceResolver>) -> Self {
        Self {
            prober,
            resolver,
            cancel: CancellationToken::new(),
            show_progress: false,
        }
    }

    /// Draw a terminal progress bar while scanning.
    pub fn with_progress_bar(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    /// Use an externally owned cancellation token.
    pub fn with_cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that aborts the scan when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Validate raw inputs, then scan `start..=end` on `address`.
    pub async fn scan_range(
        &self,
        address: IpAddr,
        start: u16,
        end: u16,
        thread_count: usize,
    ) -> Result<ScanReport, ScanError> {
        check_thread_count(thread_count)?;
        let target = ScanTarget::new(address, start, end)?;
        self.scan(&target, thread_count).await
    }

    /// Probe every port of `target` with up to `thread_count` workers.
    ///
    /// The worker count is clamped to the number of ports. Returns once all
    /// workers have exited; the open ports come back sorted ascending.
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn scan(
        &self,
        target: &ScanTarget,
        thread_count: usize,
    ) -> Result<ScanReport, ScanError> {
        check_thread_count(thread_count)?;

        let total = target.total_ports();
        let queue = WorkQueue::from_range(target.range());
        self.run(target.address(), queue, total, thread_count, ScanKind::Range)
            .await
    }

    pub(super) async fn run(
        &self,
        address: IpAddr,
        queue: WorkQueue,
        total: usize,
        thread_count: usize,
        kind: ScanKind,
    ) -> Result<ScanReport, ScanError> {
        let workers = thread_count.min(total).max(1);
        let started_at = Utc::now();
        let clock = Instant::now();

        info!(%address, total, workers, kind = %kind, "starting scan");

        let progress = if self.show_progress {
            ProgressCounter::with_bar(total)
        } else {
            ProgressCounter::new(total)
        };

        let state = Arc::new(ScanState {
            address,
            queue,
            results: Mutex::new(Vec::new()),
            progress,
            prober: Arc::clone(&self.prober),
            resolver: Arc::clone(&self.resolver),
            cancel: self.cancel.clone(),
        });

        let mut set = JoinSet::new();
        for _ in 0..workers {
            set.spawn(worker(Arc::clone(&state)));
        }

        while let Some(joined) = set.join_next().await {
            joined.map_err(|e| ScanError::WorkerFailed(e.to_string()))?;
        }

        let ports_scanned = state.progress.value();
        let interrupted = state.cancel.is_cancelled() && ports_scanned < total as u64;

        let mut results = std::mem::take(&mut *state.lock_results());
        results.sort_by_key(|r| r.port);

        if interrupted {
            state.progress.finish("Scan interrupted");
            warn!(ports_scanned, total, "scan interrupted before the queue drained");
        } else {
            state.progress.finish("Scan complete");
        }

        let duration = clock.elapsed();
        info!(
            ports_scanned,
            open = results.len(),
            elapsed_ms = duration.as_millis() as u64,
            "scan finished"
        );

        Ok(ScanReport {
            address,
            scan_kind: kind,
            ports_scanned,
            total_ports: total,
            workers,
            started_at,
            duration_ms: duration.as_millis() as u64,
            interrupted,
            results,
        })
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(super::probe::DEFAULT_PROBE_TIMEOUT)
    }
}

/// State shared by the workers of one scan.
struct ScanState {
    address: IpAddr,
    queue: WorkQueue,
    results: Mutex<Vec<ScanResult>>,
    progress: ProgressCounter,
    prober: Arc<dyn Prober>,
    resolver: Arc<dyn ServiceResolver>,
    cancel: CancellationToken,
}

impl ScanState {
    fn lock_results(&self) -> std::sync::MutexGuard<'_, Vec<ScanResult>> {
        self.results.lock().unwrap_or_else(|e| e.into_inner())
    }
}

async fn worker(state: Arc<ScanState>) {
    while !state.cancel.is_cancelled() {
        let Some(port) = state.queue.pop() else {
            break;
        };

        if state.prober.probe(state.address, port).await {
            let service_name = state.resolver.lookup(port.as_u16());
            let security_note = state.resolver.security_note(port.as_u16());
            state.progress.report_open(port.as_u16(), &service_name);

            let result = ScanResult::new(port, service_name).with_security_note(security_note);
            state.lock_results().push(result);
        }

        state.progress.increment();
    }
}

/// Reject a zero worker count.
pub(crate) fn check_thread_count(thread_count: usize) -> Result<(), ScanError> {
    if thread_count == 0 {
        Err(ScanError::InvalidThreadCount)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Port, PortError, TargetError};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::net::Ipv4Addr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    /// Treats a fixed set of ports as open and counts every probe.
    struct FakeProber {
        open: HashSet<u16>,
        probes: AtomicUsize,
    }

    impl FakeProber {
        fn new(open: &[u16]) -> Arc<Self> {
            Arc::new(Self {
                open: open.iter().copied().collect(),
                probes: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Prober for FakeProber {
        async fn probe(&self, _address: IpAddr, port: Port) -> bool {
            self.probes.fetch_add(1, Ordering::Relaxed);
            self.open.contains(&port.as_u16())
        }
    }

    /// Panics when asked about one particular port.
    struct PanickingProber {
        port: u16,
    }

    #[async_trait]
    impl Prober for PanickingProber {
        async fn probe(&self, _address: IpAddr, port: Port) -> bool {
            if port.as_u16() == self.port {
                panic!("boom");
            }
            false
        }
    }

    fn coordinator(prober: Arc<FakeProber>) -> Coordinator {
        Coordinator::with_parts(prober, Arc::new(StaticServices))
    }

    #[tokio::test]
    async fn test_results_sorted_with_services() {
        let prober = FakeProber::new(&[443, 22, 21, 80]);
        let target = ScanTarget::new(LOCALHOST, 1, 500).unwrap();

        let report = coordinator(prober.clone()).scan(&target, 16).await.unwrap();

        let ports: Vec<u16> = report.results.iter().map(|r| r.port.as_u16()).collect();
        assert_eq!(ports, vec![21, 22, 80, 443]);
        assert_eq!(report.results[1].service_name, "SSH");
        assert!(report.results[0].security_note.is_some());
        assert!(report.results[1].security_note.is_none());
        assert_eq!(report.ports_scanned, 500);
        assert_eq!(prober.probes.load(Ordering::Relaxed), 500);
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn test_thread_count_clamped_to_ports() {
        let prober = FakeProber::new(&[]);
        let target = ScanTarget::new(LOCALHOST, 100, 104).unwrap();

        let report = coordinator(prober).scan(&target, 10_000).await.unwrap();

        assert_eq!(report.workers, 5);
        assert_eq!(report.ports_scanned, 5);
    }

    #[tokio::test]
    async fn test_zero_threads_rejected_before_probing() {
        let prober = FakeProber::new(&[]);
        let target = ScanTarget::new(LOCALHOST, 1, 10).unwrap();

        let result = coordinator(prober.clone()).scan(&target, 0).await;

        assert!(matches!(result, Err(ScanError::InvalidThreadCount)));
        assert_eq!(prober.probes.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_scan_range_rejects_inverted_range() {
        let prober = FakeProber::new(&[]);

        let result = coordinator(prober.clone())
            .scan_range(LOCALHOST, 100, 50, 4)
            .await;

        assert!(matches!(
            result,
            Err(ScanError::Target(TargetError::Port(PortError::InvalidRange(100, 50))))
        ));
        assert_eq!(prober.probes.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_probes_nothing() {
        let prober = FakeProber::new(&[1, 2, 3]);
        let coordinator = coordinator(prober.clone());
        coordinator.cancel_token().cancel();

        let target = ScanTarget::new(LOCALHOST, 1, 100).unwrap();
        let report = coordinator.scan(&target, 4).await.unwrap();

        assert!(report.interrupted);
        assert!(report.results.is_empty());
        assert_eq!(report.ports_scanned, 0);
        assert_eq!(prober.probes.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_worker_panic_surfaces_as_worker_failed() {
        let coordinator = Coordinator::with_parts(
            Arc::new(PanickingProber { port: 5 }),
            Arc::new(StaticServices),
        );
        let target = ScanTarget::new(LOCALHOST, 1, 10).unwrap();

        let result = coordinator.scan(&target, 2).await;

        match result {
            Err(ScanError::WorkerFailed(msg)) => assert!(msg.contains("panicked"), "{msg}"),
            other => panic!("expected WorkerFailed, got {:?}", other.map(|r| r.ports_scanned)),
        }
    }
}
