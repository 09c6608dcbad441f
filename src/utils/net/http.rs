//! HTTP client construction
//!
//! One client is built per run and shared by reference across every range
//! task so that connections to the agent are pooled.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cred_loadgen::utils::net::{HttpClientConfig, create_client};
//!
//! let client = create_client(&HttpClientConfig::default())?;
//! let response = client.post("http://localhost:5000/onbis/issue-credential").send().await?;
//! ```

use crate::utils::error::Result;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,
    /// Idle connection timeout
    pub pool_idle_timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// TCP keepalive interval
    pub tcp_keepalive: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            pool_max_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            connect_timeout: Duration::from_secs(10),
            tcp_keepalive: Duration::from_secs(60),
            user_agent: format!("cred-loadgen/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Default settings with the given request timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

/// Build a pooled client from the given settings
pub fn create_client(config: &HttpClientConfig) -> Result<Client> {
    debug!(
        timeout_secs = config.timeout.as_secs(),
        "Creating HTTP client"
    );

    let client = ClientBuilder::new()
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(config.pool_idle_timeout)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .tcp_keepalive(config.tcp_keepalive)
        .tcp_nodelay(true)
        .user_agent(config.user_agent.as_str())
        .build()?;

    Ok(client)
}
