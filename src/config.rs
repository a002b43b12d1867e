//! Configuration loading and management
//!
//! Handles parsing of `.pacer.toml` configuration files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::velocity::DEFAULT_WINDOW_DAYS;

pub const CONFIG_FILE: &str = ".pacer.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Velocity window configuration
    #[serde(default)]
    pub velocity: VelocityConfig,

    /// Reorder protocol configuration
    #[serde(default)]
    pub moves: MoveConfig,
}

/// Velocity-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VelocityConfig {
    /// Trailing window length in days for completed-velocity membership
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

/// Reorder-protocol configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveConfig {
    /// Keep the optimistic local order when the backend rejects a move
    /// instead of rolling it back
    #[serde(default)]
    pub keep_local_on_failure: bool,
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `<dir>/.pacer.toml`, falling back to
    /// defaults when the file is missing or unreadable.
    pub fn load_from_dir(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Config::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "invalid config, using defaults");
                Config::default()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.velocity.window_days == 0 {
            return Err(Error::InvalidArgument(
                "velocity.window_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
