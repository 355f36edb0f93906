//! Configuration file support for FitTrack.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fittrack/config.toml`.

use crate::timer::DEFAULT_REST_EXTENSION_SECONDS;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub stats: StatsConfig,

    #[serde(default)]
    pub timer: TimerConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Statistics configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default = "default_weekly_goal")]
    pub weekly_goal: u32,

    /// Start from the demo statistics and history instead of empty ones
    #[serde(default = "default_use_sample_data")]
    pub use_sample_data: bool,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            weekly_goal: default_weekly_goal(),
            use_sample_data: default_use_sample_data(),
        }
    }
}

/// Rest timer configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_rest_extension_seconds")]
    pub rest_extension_seconds: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            rest_extension_seconds: default_rest_extension_seconds(),
        }
    }
}

/// Notification configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Announce the end of a rest period
    #[serde(default = "default_rest_alerts")]
    pub rest_alerts: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            rest_alerts: default_rest_alerts(),
        }
    }
}

// Default value functions
fn default_weekly_goal() -> u32 {
    4
}

fn default_use_sample_data() -> bool {
    true
}

fn default_rest_extension_seconds() -> u32 {
    DEFAULT_REST_EXTENSION_SECONDS
}

fn default_rest_alerts() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            Some(config_path) => {
                tracing::info!("No config file found at {:?}, using defaults", config_path);
                Ok(Self::default())
            }
            None => {
                tracing::info!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        let base = dirs::config_dir()
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(base.join("fittrack").join("config.toml"))
    }

    /// Reject values the rest of the system cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.stats.weekly_goal == 0 {
            return Err(Error::Config("stats.weekly_goal must be at least 1".into()));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
