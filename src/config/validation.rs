//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::*;
use url::Url;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for AgentConfig {
    fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.url).map_err(|e| format!("invalid agent URL: {}", e))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(format!(
                    "agent URL must use http:// or https:// scheme, got: {}",
                    scheme
                ));
            }
        }

        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }

        if let Some(auth) = &self.auth {
            auth.validate()?;
        }

        Ok(())
    }
}

impl Validate for BasicAuth {
    fn validate(&self) -> Result<(), String> {
        if self.username.is_empty() {
            return Err("basic auth username cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".to_string());
        }

        if self.parallel == 0 {
            return Err("parallel must be at least 1".to_string());
        }

        if self.temp_dir.as_os_str().is_empty() {
            return Err("temp_dir cannot be empty".to_string());
        }

        Ok(())
    }
}
