//! Core type definitions using newtype patterns for type safety.
//!
//! These types prevent common logic errors by making invalid states unrepresentable:
//! a `Port` is never 0 and a `PortRange` is never inverted.

mod port;
mod target;

pub use port::{Port, PortError, PortRange};
pub use target::{resolve_address, ScanTarget, TargetError};
