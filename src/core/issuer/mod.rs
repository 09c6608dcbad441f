//! Credential issuer abstraction
//!
//! The loader talks to the agent only through [`CredentialIssuer`], which the
//! HTTP client implements and tests replace with in-process fakes.

pub mod agent;
#[cfg(test)]
pub(crate) mod fake;

pub use agent::AgentClient;

use crate::core::credential::{CredentialRecord, IssueOutcome, IssueResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Something that can issue credentials
#[async_trait]
pub trait CredentialIssuer: Send + Sync {
    /// Submit a whole batch in one request.
    ///
    /// `Ok` only for a 200 with a decodable body; the body may still report
    /// per-record failures.
    async fn issue_batch(&self, records: &[CredentialRecord]) -> Result<IssueResponse>;

    /// Submit one record through the unbatched endpoint
    async fn issue_one(&self, record: &CredentialRecord) -> Result<IssueOutcome>;
}
