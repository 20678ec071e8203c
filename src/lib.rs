//! # portsweep - A concurrent TCP connect port scanner
//!
//! Given a resolved address and a port range, portsweep probes every port
//! with a bounded-time TCP connect from a fixed pool of workers, labels each
//! open port with its well-known service name, and returns the open ports in
//! ascending order.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::scanner::Coordinator;
//! use portsweep::types::ScanTarget;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let target = ScanTarget::parse("127.0.0.1", 1, 1024).unwrap();
//!     let coordinator = Coordinator::new(Duration::from_secs(1));
//!
//!     let report = coordinator.scan(&target, 100).await.unwrap();
//!     for open in &report.results {
//!         println!("{} {}", open.port, open.service_name);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated ports, ranges and scan targets
//! - [`scanner`] - Prober, work queue, coordinator and quick scan
//! - [`services`] - Static port-to-service tables
//! - [`config`] - Settings file handling
//! - [`output`] - Plain, JSON and CSV report rendering
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ConfigError, ScanError};
pub use scanner::{Coordinator, ScanReport, ScanResult};
pub use types::{Port, PortRange, ScanTarget};
