//! Batch submission
//!
//! Sends one batch of well-formed records to the agent and routes every record
//! the agent did not accept into the bad-record log. Transport and protocol
//! failures are absorbed here: the whole batch is logged and the caller moves
//! on. The only errors returned are those writing the log itself.


use crate::config::SubmitMode;
use crate::core::bad_records::BadRecordLog;
use crate::core::credential::{CredentialRecord, IssueOutcome};
use crate::core::issuer::CredentialIssuer;
use crate::utils::error::Result;
use tracing::{error, warn};

/// A parsed record together with the exact line it came from
#[derive(Debug, Clone)]
pub struct PendingRecord {
    pub raw: String,
    pub record: CredentialRecord,
}

/// Counts for one submitted batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub submitted: usize,
    pub failed: usize,
}

/// Submits batches through a [`CredentialIssuer`]
pub struct BatchSubmitter<'a> {
    issuer: &'a dyn CredentialIssuer,
    mode: SubmitMode,
}

impl<'a> BatchSubmitter<'a> {
    pub fn new(issuer: &'a dyn CredentialIssuer, mode: SubmitMode) -> Self {
        Self { issuer, mode }
    }

    /// Submit `batch` and log the records that did not make it.
    ///
    /// No retries. Errors come only from writing the bad-record log.
    pub async fn submit(&self, batch: &[PendingRecord], log: &mut BadRecordLog) -> Result<BatchOutcome> {
        if batch.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let failed = match self.mode {
            SubmitMode::Batched => self.submit_batched(batch, log).await?,
            SubmitMode::PerRecord => self.submit_each(batch, log).await?,
        };

        Ok(BatchOutcome {
            submitted: batch.len(),
            failed,
        })
    }

    async fn submit_batched(&self, batch: &[PendingRecord], log: &mut BadRecordLog) -> Result<usize> {
        let records: Vec<CredentialRecord> = batch.iter().map(|p| p.record.clone()).collect();

        let response = match self.issuer.issue_batch(&records).await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    records = batch.len(),
                    recoverable = e.is_batch_recoverable(),
                    "Batch submission failed: {}",
                    e
                );
                let reason = e.to_string();
                for pending in batch {
                    log.record(pending.raw.as_bytes(), Some(&reason)).await?;
                }
                return Ok(batch.len());
            }
        };

        let surplus = response.surplus(batch.len());
        if surplus > 0 {
            warn!(
                records = batch.len(),
                surplus, "Agent returned more results than records submitted"
            );
        }

        let mut failed = 0;
        for (pending, outcome) in batch.iter().zip(response.aligned(batch.len())) {
            if !outcome.success {
                log.record(pending.raw.as_bytes(), outcome.detail.as_deref()).await?;
                failed += 1;
            }
        }
        Ok(failed)
    }

    async fn submit_each(&self, batch: &[PendingRecord], log: &mut BadRecordLog) -> Result<usize> {
        let mut failed = 0;
        for pending in batch {
            let outcome = match self.issuer.issue_one(&pending.record).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(schema = %pending.record.schema, "Credential submission failed: {}", e);
                    IssueOutcome {
                        success: false,
                        detail: Some(e.to_string()),
                    }
                }
            };

            if !outcome.success {
                log.record(pending.raw.as_bytes(), outcome.detail.as_deref()).await?;
                failed += 1;
            }
        }
        Ok(failed)
    }
}
