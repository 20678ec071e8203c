//! Service labelling based on well-known port numbers.
//!
//! Two static tables back the lookup: a short "common" table that is consulted
//! first, and a larger "extended" table. Ports in neither map to
//! [`UNKNOWN_SERVICE`]. A handful of historically risky ports also carry a
//! short security note.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Label returned for ports missing from both tables.
pub const UNKNOWN_SERVICE: &str = "Unknown Service";

/// The most frequently seen services.
static COMMON_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (21, "FTP"),
        (22, "SSH"),
        (23, "Telnet"),
        (25, "SMTP"),
        (53, "DNS"),
        (80, "HTTP"),
        (110, "POP3"),
        (143, "IMAP"),
        (443, "HTTPS"),
        (993, "IMAPS"),
        (995, "POP3S"),
    ])
});

static EXTENDED_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert(20, "FTP-Data");
    m.insert(21, "FTP");
    m.insert(22, "SSH");
    m.insert(23, "Telnet");
    m.insert(25, "SMTP");
    m.insert(37, "Time");
    m.insert(42, "WINS");
    m.insert(43, "WHOIS");
    m.insert(53, "DNS");
    m.insert(67, "DHCP Server");
    m.insert(68, "DHCP Client");
    m.insert(69, "TFTP");
    m.insert(79, "Finger");
    m.insert(80, "HTTP");
    m.insert(88, "Kerberos");
    m.insert(110, "POP3");
    m.insert(111, "RPC");
    m.insert(119, "NNTP");
    m.insert(123, "NTP");
    m.insert(135, "Microsoft RPC");
    m.insert(137, "NetBIOS Name");
    m.insert(138, "NetBIOS Datagram");
    m.insert(139, "NetBIOS Session");
    m.insert(143, "IMAP");
    m.insert(161, "SNMP");
    m.insert(162, "SNMP Trap");
    m.insert(179, "BGP");
    m.insert(194, "IRC");
    m.insert(389, "LDAP");
    m.insert(443, "HTTPS");
    m.insert(445, "Microsoft DS");
    m.insert(465, "SMTPS");
    m.insert(514, "Syslog");
    m.insert(515, "LPD/LPR");
    m.insert(587, "SMTP Submission");
    m.insert(631, "IPP");
    m.insert(636, "LDAPS");
    m.insert(873, "rsync");
    m.insert(993, "IMAPS");
    m.insert(995, "POP3S");
    m.insert(1433, "Microsoft SQL");
    m.insert(1521, "Oracle DB");
    m.insert(2049, "NFS");
    m.insert(3306, "MySQL");
    m.insert(3389, "RDP");
    m.insert(5432, "PostgreSQL");
    m.insert(5900, "VNC");
    m.insert(6379, "Redis");
    m.insert(8080, "HTTP Proxy");
    m.insert(8443, "HTTPS Alt");
    m.insert(9200, "Elasticsearch");
    m.insert(27017, "MongoDB");

    m
});

/// Long-form descriptions for the classic services.
static DESCRIPTIONS: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (21, "File Transfer Protocol - Used for transferring files"),
        (22, "Secure Shell - Encrypted remote login protocol"),
        (23, "Telnet - Unencrypted remote login protocol"),
        (25, "Simple Mail Transfer Protocol - Email transmission"),
        (53, "Domain Name System - Name resolution service"),
        (80, "Hypertext Transfer Protocol - Web traffic"),
        (110, "Post Office Protocol v3 - Email retrieval"),
        (143, "Internet Message Access Protocol - Email access"),
        (443, "HTTP Secure - Encrypted web traffic"),
        (993, "IMAP over SSL/TLS - Secure email access"),
        (995, "POP3 over SSL/TLS - Secure email retrieval"),
    ])
});

static SECURITY_NOTES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (21, "FTP - Often uses plain text authentication"),
        (23, "Telnet - Unencrypted, high security risk"),
        (135, "RPC - Common target for attacks"),
        (445, "SMB - Vulnerable to various attacks"),
        (1433, "SQL Server - Database access, secure properly"),
    ])
});

/// Look up the service name for a port.
///
/// Returns `None` if the port is in neither table.
pub fn service_name(port: u16) -> Option<&'static str> {
    COMMON_SERVICES
        .get(&port)
        .or_else(|| EXTENDED_SERVICES.get(&port))
        .copied()
}

/// Service name for a port, falling back to [`UNKNOWN_SERVICE`].
pub fn lookup(port: u16) -> &'static str {
    service_name(port).unwrap_or(UNKNOWN_SERVICE)
}

/// Short cautionary note for historically risky ports.
pub fn security_note(port: u16) -> Option<&'static str> {
    SECURITY_NOTES.get(&port).copied()
}

/// Human-readable description, e.g. `"SSH - Secure Shell - Encrypted remote login protocol"`.
///
/// Ports without a long description get their plain service name.
pub fn describe(port: u16) -> String {
    let name = lookup(port);
    match DESCRIPTIONS.get(&port) {
        Some(description) => format!("{} - {}", name, description),
        None => name.to_string(),
    }
}

/// Check whether a port has an entry in either table.
pub fn is_known_service(port: u16) -> bool {
    service_name(port).is_some()
}

/// Port-to-label mapping consumed by the scan coordinator.
///
/// Implementations must be total: every port gets a name, even if it is
/// only [`UNKNOWN_SERVICE`].
pub trait ServiceResolver: Send + Sync {
    /// Service name for a port.
    fn lookup(&self, port: u16) -> String;

    /// Optional security annotation for a port.
    fn security_note(&self, port: u16) -> Option<String> {
        let _ = port;
        None
    }
}

/// Resolver backed by the built-in static tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticServices;

impl ServiceResolver for StaticServices {
    fn lookup(&self, port: u16) -> String {
        lookup(port).to_string()
    }

    fn security_note(&self, port: u16) -> Option<String> {
        security_note(port).map(str::to_string)
    }
}
