//! Dashboard configuration
//!
//! Loaded from an optional TOML file. Every field has a default, so an empty
//! file (or no file at all) yields the stock demo dashboard:
//!
//! ```toml
//! title = "Ground Handling Tasks"
//!
//! [auth]
//! username = "flight"
//! password = "task123"
//!
//! [data]
//! seed = 42
//! flights = 16
//!
//! [delay]
//! threshold = 1.18
//! clear_probability = 0.4
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8501
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::DelayPolicy;

/// Upper bound on `data.flights`
pub const MAX_FLIGHTS: usize = 5_000;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level dashboard configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page title shown in the header bar
    pub title: String,
    pub auth: AuthConfig,
    pub data: DataConfig,
    pub delay: DelayPolicy,
    pub palette: Palette,
    pub server: ServerConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Ground Handling Tasks".into(),
            auth: AuthConfig::default(),
            data: DataConfig::default(),
            delay: DelayPolicy::default(),
            palette: Palette::default(),
            server: ServerConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delay.threshold.is_nan() || self.delay.threshold <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "delay.threshold must be positive, got {}",
                self.delay.threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.delay.clear_probability) {
            return Err(ConfigError::Invalid(format!(
                "delay.clear_probability must be within 0..=1, got {}",
                self.delay.clear_probability
            )));
        }
        if !(1..=MAX_FLIGHTS).contains(&self.data.flights) {
            return Err(ConfigError::Invalid(format!(
                "data.flights must be within 1..={MAX_FLIGHTS}, got {}",
                self.data.flights
            )));
        }
        Ok(())
    }
}

/// Login gate credentials
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "flight".into(),
            password: "task123".into(),
        }
    }
}

impl AuthConfig {
    /// Literal comparison against the configured pair
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Mock dataset parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Random seed
    pub seed: u64,
    /// Number of synthetic flights
    pub flights: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            flights: 16,
        }
    }
}

/// Dashboard colours
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Header bar and table header background
    pub navy: String,
    /// Text on navy
    pub navy_text: String,
    /// Time of Departure cells
    pub departure: String,
    /// Time of Arrival cells
    pub arrival_time: String,
    /// Even table rows
    pub row_even: String,
    /// Odd table rows
    pub row_odd: String,
    /// Delayed task cells
    pub delay: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            navy: "#1E293B".into(),
            navy_text: "#FFFFFF".into(),
            departure: "#DCFCE7".into(),
            arrival_time: "#FEE2E2".into(),
            row_even: "#F1F5F9".into(),
            row_odd: "#FFFFFF".into(),
            delay: "#DC2626".into(),
        }
    }
}

/// HTTP listener settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8501,
        }
    }
}
