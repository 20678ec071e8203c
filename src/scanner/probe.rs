//! TCP connect prober.
//!
//! Decides open/closed for a single (address, port) pair by attempting a full
//! TCP handshake under a timeout. The stream is dropped as soon as the
//! handshake completes; nothing is written or read.

use crate::types::Port;
use async_trait::async_trait;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// Default per-probe connect timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Attempt one bounded-time TCP connect.
///
/// Returns `true` iff the handshake completed before `limit` elapsed. Refusals,
/// timeouts and unreachable networks all read as `false`.
pub async fn probe(address: IpAddr, port: Port, limit: Duration) -> bool {
    let addr = SocketAddr::new(address, port.as_u16());

    match timeout(limit, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => {
            drop(stream);
            true
        }
        Ok(Err(e)) => {
            trace!(%addr, error = %e, "connect failed");
            false
        }
        Err(_) => {
            trace!(%addr, "connect timed out");
            false
        }
    }
}

/// Reachability check used by the scan coordinator.
///
/// Abstracted so the coordinator can be driven by something other than real
/// sockets.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Report whether `port` on `address` accepts a connection.
    async fn probe(&self, address: IpAddr, port: Port) -> bool;
}

/// Prober that performs a real TCP connect.
#[derive(Debug, Clone, Copy)]
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, address: IpAddr, port: Port) -> bool {
        probe(address, port, self.timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use tokio::net::TcpListener;

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    #[tokio::test]
    async fn test_probe_open_port() {
        let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();

        assert!(probe(LOCALHOST, port, Duration::from_millis(500)).await);
    }

    #[tokio::test]
    async fn test_probe_closed_port() {
        // Bind then drop to find a port with nothing listening.
        let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();
        drop(listener);

        let prober = TcpProber::new(Duration::from_millis(500));
        assert!(!prober.probe(LOCALHOST, port).await);
    }

    #[tokio::test]
    async fn test_probe_timeout_reads_as_closed() {
        // TEST-NET-1 is reserved and should never answer.
        let unroutable = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1));
        let port = Port::new(80).unwrap();
        assert!(!probe(unroutable, port, Duration::from_millis(50)).await);
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(TcpProber::default().timeout(), Duration::from_secs(1));
    }
}
