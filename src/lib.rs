//! # cred-loadgen
//!
//! Load generator for credential-issuance agents.
//!
//! Input files hold one JSON credential per line. Each file is cut into
//! line-aligned byte ranges that are processed concurrently; every range reads
//! its records in batches, POSTs them to the agent, and commits a checkpoint
//! after each batch so an interrupted run can pick up where it stopped.
//! Records the agent rejects land in a per-file bad-record log.
//!
//! ```rust,no_run
//! use cred_loadgen::{AgentClient, LoadRunner, LoaderConfig};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LoaderConfig::default();
//!     let client = AgentClient::new(config.agent.clone())?;
//!     let summary = LoadRunner::new(&client, &config.run)
//!         .run(&[PathBuf::from("creds.jsonl")])
//!         .await?;
//!     println!("{} submitted, {} failed", summary.submitted(), summary.failed());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

pub use config::{AgentConfig, LoaderConfig, RunConfig, SubmitMode};
pub use crate::core::credential::{CredentialRecord, IssueOutcome, IssueResponse};
pub use crate::core::issuer::{AgentClient, CredentialIssuer};
pub use crate::core::partition::{Range, compute_ranges, partition};
pub use crate::core::runner::{LoadRunner, RunSummary, split_all};
pub use utils::error::{LoaderError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
