//! Configuration management
//!
//! This module handles loading and managing configuration from:
//! - Command-line arguments
//! - Configuration files (TOML)
//! - Defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The power-set generator indexes subsets with a `u64` bitmask.
pub const MAX_POWER_SET_BITS: usize = 63;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub default: DefaultConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultConfig {
    /// Name of the designated error state
    #[serde(default = "default_error_state")]
    pub error_state: String,
}

/// Size ceilings for the exponential enumerations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Longest path accepted by subsequence enumeration
    #[serde(default = "default_max_subpath_length")]
    pub max_subpath_length: usize,

    /// Largest edge count accepted by cycle enumeration
    #[serde(default = "default_max_cycle_edges")]
    pub max_cycle_edges: usize,

    /// Optional depth cap for error-path search
    #[serde(default)]
    pub max_error_path_length: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions

fn default_error_state() -> String {
    crate::state_machine::DEFAULT_ERROR_STATE.to_string()
}

fn default_max_subpath_length() -> usize {
    20
}

fn default_max_cycle_edges() -> usize {
    16
}

fn default_log_level() -> String {
    "info".to_string()
}

// Default implementations

impl Default for DefaultConfig {
    fn default() -> Self {
        Self {
            error_state: default_error_state(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_subpath_length: default_max_subpath_length(),
            max_cycle_edges: default_max_cycle_edges(),
            max_error_path_length: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LimitsConfig {
    /// Reject ceilings the engine cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.max_subpath_length == 0 {
            return Err(Error::Config(
                "limits.max_subpath_length must be at least 1".to_string(),
            ));
        }
        if self.max_cycle_edges > MAX_POWER_SET_BITS {
            return Err(Error::Config(format!(
                "limits.max_cycle_edges must not exceed {}",
                MAX_POWER_SET_BITS
            )));
        }
        if self.max_error_path_length == Some(0) {
            return Err(Error::Config(
                "limits.max_error_path_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Searches in order:
    /// 1. ./typestate-paths.toml
    /// 2. ~/.typestate-paths/config.toml
    /// 3. /etc/typestate-paths/config.toml
    pub fn load() -> Result<Self> {
        let paths = vec![
            PathBuf::from("typestate-paths.toml"),
            dirs::home_dir()
                .map(|h| h.join(".typestate-paths").join("config.toml"))
                .unwrap_or_else(|| PathBuf::from("/dev/null")),
            PathBuf::from("/etc/typestate-paths/config.toml"),
        ];

        for path in paths {
            if path.is_file() {
                tracing::info!("Loading config from {:?}", path);
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.default.error_state.trim().is_empty() {
            return Err(Error::Config(
                "default.error_state cannot be empty".to_string(),
            ));
        }
        self.limits.validate()
    }
}
