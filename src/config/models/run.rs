//! Run configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How records are sent to the agent
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmitMode {
    /// One request per batch, body is an array of credentials
    #[default]
    Batched,
    /// One request per record, schema and version in the query string
    PerRecord,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Settings for one invocation of the loader
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Lines per request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Ranges per input file
    #[serde(default = "default_parallel")]
    pub parallel: usize,
    /// Directory holding `.done` and `.bad` files
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,
    #[serde(default)]
    pub mode: SubmitMode,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            parallel: default_parallel(),
            temp_dir: default_temp_dir(),
            mode: SubmitMode::default(),
            log_format: LogFormat::default(),
        }
    }
}
