//! Configuration management and validation.
//!
//! Provides the relay configuration consumed read-only by the ingestion
//! pipeline: metric namespace, storage resolution hint, and the
//! dimension set attached to every datapoint. Supports layered loading
//! (defaults -> TOML file -> environment variables), with CLI overrides
//! applied by the command layer.

use crate::app::models::Dimension;
use crate::constants::{
    DEFAULT_NAMESPACE, DEFAULT_STORAGE_RESOLUTION_SECS, ENV_DIMENSIONS, ENV_NAMESPACE,
    ENV_RESOLUTION, HOSTNAME_DIMENSION,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for the metric relay
///
/// The pipeline reads this once at construction time; changing it has
/// no effect on a running relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Metric namespace attached to every submission
    pub namespace: String,

    /// Storage resolution hint in seconds; `None` omits the hint from
    /// submissions entirely
    pub storage_resolution_seconds: Option<u32>,

    /// Dimensions attached uniformly to every datapoint
    pub dimensions: Vec<Dimension>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            storage_resolution_seconds: Some(DEFAULT_STORAGE_RESOLUTION_SECS),
            dimensions: default_dimensions(),
        }
    }
}

/// Best-effort default dimension set: the local machine name under the
/// `hostname` key, or nothing when the name cannot be resolved.
fn default_dimensions() -> Vec<Dimension> {
    match sysinfo::System::host_name() {
        Some(host) if !host.trim().is_empty() => vec![Dimension {
            name: HOSTNAME_DIMENSION.to_string(),
            value: host,
        }],
        _ => {
            debug!("Local hostname could not be resolved, omitting default dimension");
            Vec::new()
        }
    }
}

impl RelayConfig {
    /// Create configuration with a custom namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Create configuration with a custom storage resolution in seconds
    pub fn with_storage_resolution(mut self, seconds: u32) -> Self {
        self.storage_resolution_seconds = Some(seconds);
        self
    }

    /// Create configuration that omits the storage resolution hint
    pub fn without_storage_resolution(mut self) -> Self {
        self.storage_resolution_seconds = None;
        self
    }

    /// Create configuration with a replacement dimension set
    pub fn with_dimensions(mut self, dimensions: Vec<Dimension>) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Create configuration with one extra dimension appended
    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimensions.push(dimension);
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        if self.namespace.trim().is_empty() {
            return Err(Error::configuration(
                "Metric namespace cannot be empty".to_string(),
            ));
        }

        if let Some(resolution) = self.storage_resolution_seconds {
            if resolution == 0 {
                return Err(Error::configuration(
                    "Storage resolution must be at least one second".to_string(),
                ));
            }
        }

        for dimension in &self.dimensions {
            dimension.validate()?;
        }

        Ok(())
    }

    /// Default configuration file location under the user config dir
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("metric-relay").join("config.toml"))
            .ok_or_else(|| {
                Error::configuration(
                    "Could not determine the user configuration directory".to_string(),
                )
            })
    }

    /// Load configuration from a TOML file
    ///
    /// Missing keys fall back to their defaults, so partial files are
    /// fine. The result is not validated; [`load_layered`] validates
    /// after all layers are applied.
    ///
    /// [`load_layered`]: RelayConfig::load_layered
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file '{}'", path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration using the layered approach (defaults -> file
    /// -> environment variables)
    ///
    /// `config_file` of `None` starts from defaults. CLI overrides are
    /// applied by the command layer after this returns.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::load_from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(namespace) = std::env::var(ENV_NAMESPACE) {
            self.namespace = namespace;
        }

        if let Ok(resolution) = std::env::var(ENV_RESOLUTION) {
            let seconds: u32 = resolution.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "Invalid {} value '{}': expected seconds as an integer",
                    ENV_RESOLUTION, resolution
                ))
            })?;
            self.storage_resolution_seconds = Some(seconds);
        }

        if let Ok(dimensions) = std::env::var(ENV_DIMENSIONS) {
            self.dimensions = Dimension::parse_list(&dimensions)?;
        }

        Ok(())
    }
}
