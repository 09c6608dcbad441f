//! Shared test infrastructure

#![allow(dead_code)]

use cred_loadgen::{AgentConfig, RunConfig};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::MockServer;

/// Agent config pointing at the mock server's `/onbis` prefix
pub fn agent_config(server: &MockServer) -> AgentConfig {
    AgentConfig {
        url: format!("{}/onbis", server.uri()),
        timeout: 5,
        ..AgentConfig::default()
    }
}

/// Run config with state kept under `dir/state`
pub fn run_config(dir: &TempDir, batch_size: usize, parallel: usize) -> RunConfig {
    RunConfig {
        temp_dir: dir.path().join("state"),
        batch_size,
        parallel,
        ..RunConfig::default()
    }
}

/// One credential as a JSON value
pub fn credential(n: u32) -> Value {
    json!({
        "schema": "incorporation.bc_registries",
        "version": "1.0.31",
        "attributes": {"corp_num": format!("BC{:07}", n), "legal_name": format!("Company {}", n)}
    })
}

/// Write `count` credentials, one per line, and return the path
pub async fn write_credentials(dir: &Path, name: &str, count: u32) -> PathBuf {
    let path = dir.join(name);
    let content: String = (0..count).map(|n| format!("{}\n", credential(n))).collect();
    tokio::fs::write(&path, content).await.unwrap();
    path
}

/// Lines of a state file, empty when it does not exist
pub async fn read_lines(path: &Path) -> Vec<String> {
    tokio::fs::read_to_string(path)
        .await
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
