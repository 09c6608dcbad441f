//! Command-line arguments for both binaries
//!
//! Flags override values from the optional YAML config file, which in turn
//! override built-in defaults.

use crate::config::{BasicAuth, LoaderConfig, LogFormat, SubmitMode, default_proof_name};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Load credentials from JSON-lines files into an issuing agent
#[derive(Debug, Clone, Parser)]
#[command(name = "load-creds", version, about)]
pub struct LoadCredsArgs {
    /// Input files, one JSON credential per line
    #[arg(required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Agent base URL
    #[arg(short, long, env = "AGENT_URL")]
    pub url: Option<String>,

    /// Number of ranges each file is split into and processed concurrently
    #[arg(short, long)]
    pub parallel: Option<usize>,

    /// Directory for checkpoint (.done) and bad-record (.bad) files
    #[arg(short, long)]
    pub temp_dir: Option<PathBuf>,

    /// Write the split files instead of submitting anything
    #[arg(short, long)]
    pub split: bool,

    /// Lines per request
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Send each record on its own using the unbatched endpoint
    #[arg(long)]
    pub per_record: bool,

    /// HTTP basic auth user
    #[arg(long, env = "AGENT_USERNAME")]
    pub username: Option<String>,

    /// HTTP basic auth password
    #[arg(long, env = "AGENT_PASSWORD", hide_env_values = true, requires = "username")]
    pub password: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl LoadCredsArgs {
    /// Build the effective configuration and validate it
    pub async fn resolve(&self) -> Result<LoaderConfig> {
        let base = match &self.config {
            Some(path) => LoaderConfig::from_file(path).await?,
            None => LoaderConfig::default(),
        };
        let config = self.apply(base);
        config.validate()?;
        Ok(config)
    }

    /// Overlay the flags that were given onto `config`
    pub fn apply(&self, mut config: LoaderConfig) -> LoaderConfig {
        if let Some(url) = &self.url {
            config.agent.url = url.clone();
        }
        if let Some(username) = &self.username {
            config.agent.auth = Some(BasicAuth {
                username: username.clone(),
                password: self.password.clone(),
            });
        }
        if let Some(timeout) = self.timeout {
            config.agent.timeout = timeout;
        }
        if let Some(parallel) = self.parallel {
            config.run.parallel = parallel;
        }
        if let Some(temp_dir) = &self.temp_dir {
            config.run.temp_dir = temp_dir.clone();
        }
        if let Some(batch_size) = self.batch_size {
            config.run.batch_size = batch_size;
        }
        if self.per_record {
            config.run.mode = SubmitMode::PerRecord;
        }
        if let Some(format) = self.log_format {
            config.run.log_format = format;
        }
        config
    }
}

/// Request proofs over issued credentials
#[derive(Debug, Clone, Parser)]
#[command(name = "request-proof", version, about)]
pub struct RequestProofArgs {
    /// Credential IDs to be proved
    #[arg(required = true, num_args = 1..)]
    pub credential_ids: Vec<String>,

    /// Name of the proof request
    #[arg(short, long, default_value_t = default_proof_name())]
    pub name: String,

    /// Agent base URL
    #[arg(short, long, env = "AGENT_URL")]
    pub url: Option<String>,

    /// Send all IDs in one request instead of one request per ID
    #[arg(long)]
    pub combined: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl RequestProofArgs {
    /// ID groups to send, one request per group
    pub fn requests(&self) -> Vec<Vec<String>> {
        if self.combined {
            vec![self.credential_ids.clone()]
        } else {
            self.credential_ids.iter().map(|id| vec![id.clone()]).collect()
        }
    }
}
