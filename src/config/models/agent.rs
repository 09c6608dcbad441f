//! Agent connection configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where and how to reach the issuing agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    /// Base URL, e.g. `http://localhost:5000/onbis`
    #[serde(default = "default_agent_url")]
    pub url: String,
    /// Optional HTTP basic auth credentials
    #[serde(default)]
    pub auth: Option<BasicAuth>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            url: default_agent_url(),
            auth: None,
            timeout: default_timeout(),
        }
    }
}

impl AgentConfig {
    /// Request timeout as a duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Join an endpoint path onto the base URL without doubling slashes
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// HTTP basic auth credentials
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct BasicAuth {
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
