//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-port network failures
//! are deliberately absent: a probe that fails simply reports the port closed.

use crate::types::{PortError, TargetError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a scan from starting or completing.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("thread count must be at least 1")]
    InvalidThreadCount,

    #[error("scan worker failed: {0}")]
    WorkerFailed(String),
}

/// Errors raised while loading or saving settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Top-level error for the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
pub type CliResult<T> = Result<T, CliError>;
