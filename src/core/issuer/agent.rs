//! HTTP client for the issuing agent

use super::CredentialIssuer;
use crate::config::AgentConfig;
use crate::core::credential::{CredentialRecord, IssueOutcome, IssueResponse, ProofRequest};
use crate::utils::error::{LoaderError, Result};
use crate::utils::net::{HttpClientConfig, create_client};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

const ISSUE_PATH: &str = "issue-credential";
const PROOF_PATH: &str = "request-proof";

/// Agent client over a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct AgentClient {
    client: Client,
    config: AgentConfig,
}

impl AgentClient {
    /// Build a client for the given agent
    pub fn new(config: AgentConfig) -> Result<Self> {
        let client = create_client(&HttpClientConfig::with_timeout(config.timeout_duration()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let request = self.client.post(self.config.endpoint(path));
        match &self.config.auth {
            Some(auth) => request.basic_auth(&auth.username, auth.password.as_ref()),
            None => request,
        }
    }

    /// Ask the agent to build a proof over the given credentials
    pub async fn request_proof(&self, proof_name: &str, credential_ids: &[String]) -> Result<Value> {
        let body = ProofRequest {
            credential_ids: credential_ids.to_vec(),
        };

        let start = Instant::now();
        let response = self
            .post(PROOF_PATH)
            .query(&[("name", proof_name)])
            .json(&body)
            .send()
            .await?;
        let value = read_json(response).await?;

        debug!(
            proof_name,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Proof request answered"
        );
        Ok(value)
    }
}

#[async_trait]
impl CredentialIssuer for AgentClient {
    async fn issue_batch(&self, records: &[CredentialRecord]) -> Result<IssueResponse> {
        let start = Instant::now();
        let response = self.post(ISSUE_PATH).json(records).send().await?;
        let value = read_json(response).await?;

        debug!(
            records = records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Batch answered"
        );
        IssueResponse::from_value(value)
    }

    async fn issue_one(&self, record: &CredentialRecord) -> Result<IssueOutcome> {
        let response = self
            .post(ISSUE_PATH)
            .query(&[
                ("schema", record.schema.as_str()),
                ("version", record.version.as_str()),
            ])
            .json(&record.attributes)
            .send()
            .await?;
        let value = read_json(response).await?;

        Ok(IssueResponse::from_value(value)?.aligned(1).remove(0))
    }
}

/// Decode a 200 body as JSON; anything else becomes [`LoaderError::Http`]
async fn read_json(response: Response) -> Result<Value> {
    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(LoaderError::http(status.as_u16(), body));
    }
    Ok(response.json::<Value>().await?)
}
