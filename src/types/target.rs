//! Scan target types and hostname resolution.
//!
//! The scanning core only ever sees a [`ScanTarget`], which pairs an already
//! resolved address with a validated port range. Turning a hostname into an
//! address is left to [`resolve_address`], which the CLI calls first.

use super::port::{PortError, PortRange};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// An immutable scan target: a resolved address and the ports to probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTarget {
    address: IpAddr,
    range: PortRange,
}

impl ScanTarget {
    /// Build a target from an address and raw port bounds.
    pub fn new(address: IpAddr, start: u16, end: u16) -> Result<Self, TargetError> {
        let range = PortRange::from_bounds(start, end)?;
        Ok(Self { address, range })
    }

    /// Build a target from an already validated range.
    pub const fn with_range(address: IpAddr, range: PortRange) -> Self {
        Self { address, range }
    }

    /// Build a target from a numeric address string.
    ///
    /// Hostnames are rejected here; resolve them with [`resolve_address`] first.
    pub fn parse(address: &str, start: u16, end: u16) -> Result<Self, TargetError> {
        let address = address.trim();
        let ip: IpAddr = address
            .parse()
            .map_err(|_| TargetError::InvalidAddress(address.to_string()))?;
        Self::new(ip, start, end)
    }

    pub const fn address(&self) -> IpAddr {
        self.address
    }

    pub const fn range(&self) -> PortRange {
        self.range
    }

    pub const fn total_ports(&self) -> usize {
        self.range.total_ports()
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ports {}", self.address, self.range)
    }
}

/// Error type for target parsing and resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error(transparent)]
    Port(#[from] PortError),
    #[error("failed to resolve hostname '{0}': {1}")]
    DnsResolutionFailed(String, String),
    #[error("no IP addresses found for hostname '{0}'")]
    NoAddressesFound(String),
}

/// Resolve a hostname or numeric address string to an `IpAddr`.
///
/// Numeric addresses are returned as-is. Hostnames go through the system DNS
/// configuration; the first IPv4 answer wins, else the first answer.
pub async fn resolve_address(target: &str) -> Result<IpAddr, TargetError> {
    let target = target.trim();
    if let Ok(ip) = target.parse::<IpAddr>() {
        return Ok(ip);
    }

    if !is_valid_hostname(target) {
        return Err(TargetError::InvalidAddress(target.to_string()));
    }

    let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());

    let response = resolver
        .lookup_ip(target)
        .await
        .map_err(|e| TargetError::DnsResolutionFailed(target.to_string(), e.to_string()))?;

    prefer_ipv4(response.iter()).ok_or_else(|| TargetError::NoAddressesFound(target.to_string()))
}

/// First IPv4 address if there is one, otherwise the first address.
fn prefer_ipv4(addrs: impl IntoIterator<Item = IpAddr>) -> Option<IpAddr> {
    let mut first = None;
    for addr in addrs {
        if addr.is_ipv4() {
            return Some(addr);
        }
        first.get_or_insert(addr);
    }
    first
}

/// Check if a string is a syntactically valid hostname.
fn is_valid_hostname(s: &str) -> bool {
    // A fully qualified name may end in a single dot.
    let s = s.strip_suffix('.').unwrap_or(s);
    if s.is_empty() || s.len() > 253 {
        return false;
    }

    // Each label must be 1-63 characters
    for label in s.split('.') {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        if !label.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        if !label.chars().last().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_parse_ipv4_target() {
        let target = ScanTarget::parse("127.0.0.1", 1, 1024).unwrap();
        assert_eq!(target.address(), IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(target.total_ports(), 1024);
    }

    #[test]
    fn test_parse_ipv6_target() {
        let target = ScanTarget::parse("::1", 22, 22).unwrap();
        assert_eq!(target.address(), IpAddr::V6(Ipv6Addr::LOCALHOST));
        assert_eq!(target.total_ports(), 1);
    }

    #[test]
    fn test_parse_rejects_hostname_and_garbage() {
        assert!(matches!(
            ScanTarget::parse("example.com", 1, 10),
            Err(TargetError::InvalidAddress(_))
        ));
        assert!(matches!(
            ScanTarget::parse("999.1.1.1", 1, 10),
            Err(TargetError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = ScanTarget::parse("127.0.0.1", 100, 50);
        assert_eq!(
            result,
            Err(TargetError::Port(PortError::InvalidRange(100, 50)))
        );
    }

    #[test]
    fn test_valid_hostname() {
        assert!(is_valid_hostname("example.com"));
        assert!(is_valid_hostname("sub.example.com"));
        assert!(is_valid_hostname("my-server"));
        assert!(!is_valid_hostname(""));
        assert!(!is_valid_hostname("-invalid.com"));
        assert!(!is_valid_hostname("bad_host.com"));
        assert!(is_valid_hostname("example.com."));
        assert!(!is_valid_hostname("."));
        assert!(!is_valid_hostname("example.com.."));
    }

    #[test]
    fn test_prefer_ipv4_answer() {
        let v6 = IpAddr::V6(Ipv6Addr::LOCALHOST);
        let v4 = IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34));

        assert_eq!(prefer_ipv4([v6, v4]), Some(v4));
        assert_eq!(prefer_ipv4([v6]), Some(v6));
        assert_eq!(prefer_ipv4(Vec::<IpAddr>::new()), None);
    }

    #[tokio::test]
    async fn test_resolve_numeric_address_skips_dns() {
        let ip = resolve_address(" 10.0.0.5 ").await.unwrap();
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)));
    }

    #[tokio::test]
    async fn test_resolve_rejects_malformed_name() {
        let result = resolve_address("not a host!").await;
        assert!(matches!(result, Err(TargetError::InvalidAddress(_))));
    }
}
