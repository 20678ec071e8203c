//! Application settings and paths.
//!
//! Settings live as JSON under the XDG config directory.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portsweep)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the XDG directories without creating them.
    pub fn discover() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "portsweep", "portsweep")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Defaults applied when the command line leaves a value unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// First port of a range scan.
    pub default_start_port: u16,
    /// Last port of a range scan.
    pub default_end_port: u16,
    /// Worker count for range scans.
    pub default_threads: usize,
    /// Per-probe connect timeout in milliseconds.
    pub timeout_ms: u64,
    /// Default output format (plain, json or csv).
    pub output_format: String,
    /// Draw a progress bar during range scans.
    pub show_progress: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_start_port: 1,
            default_end_port: 1024,
            default_threads: 100,
            timeout_ms: 1000,
            output_format: "plain".to_string(),
            show_progress: false,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::discover()?.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// Write settings to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save settings to the default location.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Paths::discover()?.settings_file())
    }
}
