//! Configuration management for the loader
//!
//! Configuration comes from an optional YAML file, then command-line flags
//! (which may themselves fall back to environment variables).

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{LoaderError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Complete configuration for a load run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoaderConfig {
    /// Agent connection settings
    #[serde(default)]
    pub agent: AgentConfig,
    /// Batching, splitting and state directory settings
    #[serde(default)]
    pub run: RunConfig,
}

impl LoaderConfig {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LoaderError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.agent
            .validate()
            .map_err(|e| LoaderError::validation(format!("Agent config error: {}", e)))?;

        self.run
            .validate()
            .map_err(|e| LoaderError::validation(format!("Run config error: {}", e)))?;

        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
