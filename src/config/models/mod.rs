//! Configuration data models
//!
//! This module defines the configuration structures shared by both binaries.

pub mod agent;
pub mod run;

pub use agent::*;
pub use run::*;

/// Default agent URL when neither the CLI nor `AGENT_URL` provide one
pub fn default_agent_url() -> String {
    "http://localhost:5000/onbis".to_string()
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    60
}

/// Default number of lines grouped into one request
pub fn default_batch_size() -> usize {
    10
}

/// Default number of ranges each input file is split into
pub fn default_parallel() -> usize {
    1
}

/// Default directory for checkpoint and bad-record files
pub fn default_temp_dir() -> std::path::PathBuf {
    std::path::PathBuf::from("tmp")
}

/// Default proof request name
pub fn default_proof_name() -> String {
    "registration".to_string()
}
