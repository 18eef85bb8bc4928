//! Application configuration
//!
//! Loaded from an optional TOML file; every section and field falls back to
//! its default, so an empty (or absent) file yields a working demo setup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use integration_ip::IpConfig;
use integration_news::NewsConfig;
use integration_vehicles::VehiclesConfig;
use telemetry::TelemetryConfig;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Tracing pipeline configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Chronicling America client configuration
    #[serde(default)]
    pub news: NewsConfig,

    /// NHTSA vPIC client configuration
    #[serde(default)]
    pub vehicles: VehiclesConfig,

    /// ipify client configuration
    #[serde(default)]
    pub ip: IpConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file, or defaults when no path is given
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let config = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
        Ok(config)
    }
}
