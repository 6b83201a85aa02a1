//! Configuration management for rassum
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (RASSUM_*)
//! 3. Config file (~/.config/rassum/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::export::OutputFormat;
use crate::{Error, Result};

/// Report output configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Physical format of the written report
    pub format: OutputFormat,

    /// Directory for the report file (defaults to the project directory)
    pub output_dir: Option<PathBuf>,
}

/// Project scanning configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Skip flow/geometry/plan files that are too short instead of aborting
    pub skip_malformed: bool,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Report configuration
    pub report: ReportConfig,

    /// Scan configuration
    pub scan: ScanConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/rassum/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rassum").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - RASSUM_FORMAT: Report format (xlsx, csv or json); unknown values are ignored
    /// - RASSUM_OUTPUT_DIR: Directory for the report file
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(format) = std::env::var("RASSUM_FORMAT") {
            match format.parse() {
                Ok(format) => self.report.format = format,
                Err(e) => warn!("Ignoring RASSUM_FORMAT: {}", e),
            }
        }

        if let Ok(dir) = std::env::var("RASSUM_OUTPUT_DIR") {
            self.report.output_dir = Some(PathBuf::from(dir));
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        format: Option<OutputFormat>,
        output_dir: Option<PathBuf>,
        skip_malformed: bool,
    ) -> Self {
        if let Some(f) = format {
            self.report.format = f;
        }

        if let Some(dir) = output_dir {
            self.report.output_dir = Some(dir);
        }

        if skip_malformed {
            self.scan.skip_malformed = true;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        format: Option<OutputFormat>,
        output_dir: Option<PathBuf>,
        skip_malformed: bool,
    ) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(format, output_dir, skip_malformed))
    }
}
