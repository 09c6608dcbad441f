//! In-process issuer used by unit tests

use super::CredentialIssuer;
use crate::core::credential::{CredentialRecord, IssueOutcome, IssueResponse};
use crate::utils::error::{LoaderError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Records every call and answers from a script.
///
/// Batches beyond the script succeed. Single submissions succeed unless the
/// schema is `reject` (reported failure) or `explode` (HTTP 500).
#[derive(Default)]
pub(crate) struct FakeIssuer {
    batches: Mutex<Vec<Vec<CredentialRecord>>>,
    singles: Mutex<Vec<CredentialRecord>>,
    script: Mutex<VecDeque<Result<IssueResponse>>>,
}

impl FakeIssuer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_script(responses: Vec<Result<IssueResponse>>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub(crate) fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().iter().map(Vec::len).collect()
    }

    pub(crate) fn batches(&self) -> Vec<Vec<CredentialRecord>> {
        self.batches.lock().unwrap().clone()
    }

    pub(crate) fn singles(&self) -> Vec<CredentialRecord> {
        self.singles.lock().unwrap().clone()
    }
}

pub(crate) fn ok_response() -> IssueResponse {
    IssueResponse::Single(IssueOutcome {
        success: true,
        detail: None,
    })
}

#[async_trait]
impl CredentialIssuer for FakeIssuer {
    async fn issue_batch(&self, records: &[CredentialRecord]) -> Result<IssueResponse> {
        self.batches.lock().unwrap().push(records.to_vec());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ok_response()))
    }

    async fn issue_one(&self, record: &CredentialRecord) -> Result<IssueOutcome> {
        self.singles.lock().unwrap().push(record.clone());
        match record.schema.as_str() {
            "explode" => Err(LoaderError::http(500, "agent down")),
            "reject" => Ok(IssueOutcome {
                success: false,
                detail: Some("rejected".to_string()),
            }),
            _ => Ok(IssueOutcome {
                success: true,
                detail: None,
            }),
        }
    }
}
