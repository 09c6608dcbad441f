//! Checkpointed processing of one range
//!
//! A range is read line by line from its resume offset. Lines are grouped
//! into batches of `batch_size`, each batch is submitted, and the checkpoint
//! is committed to the read offset after every attempt whether or not the
//! agent accepted the records. Failed records are recovered from the
//! bad-record log, not by re-reading.


use crate::config::RunConfig;
use crate::core::bad_records::{BadRecordLog, bad_record_path};
use crate::core::batch::{BatchSubmitter, PendingRecord};
use crate::core::checkpoint::{Checkpoint, checkpoint_path};
use crate::core::credential::CredentialRecord;
use crate::core::issuer::CredentialIssuer;
use crate::core::partition::Range;
use crate::utils::error::{LoaderError, Result};
use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tracing::{debug, info};

/// What happened while processing one range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeReport {
    pub file: PathBuf,
    pub range: Range,
    /// Offset reading started from
    pub resumed_from: u64,
    /// Offset reading stopped at
    pub end_offset: u64,
    /// Non-blank lines read
    pub lines: u64,
    /// Lines that could not be parsed into a credential
    pub malformed: u64,
    /// Records sent to the agent
    pub submitted: u64,
    /// Records written to the bad-record log, malformed lines included
    pub failed: u64,
    /// Batches handed to the submitter
    pub batches: u64,
    pub elapsed: Duration,
}

impl RangeReport {
    fn new(file: &Path, range: Range, resumed_from: u64) -> Self {
        Self {
            file: file.to_path_buf(),
            range,
            resumed_from,
            end_offset: resumed_from,
            lines: 0,
            malformed: 0,
            submitted: 0,
            failed: 0,
            batches: 0,
            elapsed: Duration::ZERO,
        }
    }
}

/// Processes ranges against one issuer with one run configuration
pub struct RangeProcessor<'a> {
    issuer: &'a dyn CredentialIssuer,
    config: &'a RunConfig,
}

impl<'a> RangeProcessor<'a> {
    pub fn new(issuer: &'a dyn CredentialIssuer, config: &'a RunConfig) -> Self {
        Self { issuer, config }
    }

    /// Process `range` of `input` to completion.
    ///
    /// Errors are I/O failures on the input, the checkpoint or the
    /// bad-record log; everything else is recorded and skipped.
    pub async fn process(&self, input: &Path, range: Range) -> Result<RangeReport> {
        let start = Instant::now();
        let temp_dir = &self.config.temp_dir;

        let mut checkpoint =
            Checkpoint::open(checkpoint_path(temp_dir, input, range.index), range).await?;
        let mut log = BadRecordLog::open(bad_record_path(temp_dir, input)).await?;
        let mut report = RangeReport::new(input, range, checkpoint.offset());

        if checkpoint.is_complete() {
            debug!(
                file = %input.display(),
                range = range.index,
                "Range already complete"
            );
            log.close().await?;
            return Ok(report);
        }

        info!(
            file = %input.display(),
            range = range.index,
            start = range.start,
            end = range.end,
            resume = checkpoint.offset(),
            "Processing range"
        );

        let mut file = File::open(input).await?;
        file.seek(SeekFrom::Start(checkpoint.offset())).await?;
        let mut reader = BufReader::new(file);

        let submitter = BatchSubmitter::new(self.issuer, self.config.mode);
        let batch_size = self.config.batch_size.max(1);
        let mut offset = checkpoint.offset();
        let mut line = Vec::new();

        while offset < range.end {
            let mut batch: Vec<PendingRecord> = Vec::with_capacity(batch_size);
            let mut lines_in_batch = 0;

            while lines_in_batch < batch_size && offset < range.end {
                line.clear();
                let read = reader.read_until(b'\n', &mut line).await?;
                if read == 0 {
                    return Err(LoaderError::Io(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!(
                            "{} ended at {} before range end {}",
                            input.display(),
                            offset,
                            range.end
                        ),
                    )));
                }
                offset += read as u64;
                if offset > range.end {
                    return Err(LoaderError::checkpoint(format!(
                        "line ending at {} crosses range end {} in {}; input changed since it was partitioned",
                        offset,
                        range.end,
                        input.display()
                    )));
                }

                let trimmed = line.trim_ascii();
                if trimmed.is_empty() {
                    continue;
                }
                lines_in_batch += 1;
                report.lines += 1;

                let parsed = std::str::from_utf8(trimmed)
                    .map_err(|e| LoaderError::malformed(format!("invalid UTF-8: {}", e)))
                    .and_then(|text| CredentialRecord::parse(text).map(|record| (text, record)));

                match parsed {
                    Ok((text, record)) => batch.push(PendingRecord {
                        raw: text.to_string(),
                        record,
                    }),
                    Err(e) => {
                        log.record(trimmed, Some(&e.to_string())).await?;
                        report.malformed += 1;
                        report.failed += 1;
                    }
                }
            }

            if !batch.is_empty() {
                let outcome = submitter.submit(&batch, &mut log).await?;
                report.batches += 1;
                report.submitted += outcome.submitted as u64;
                report.failed += outcome.failed as u64;
            }

            checkpoint.commit(offset).await?;
        }

        log.close().await?;
        report.end_offset = offset;
        report.elapsed = start.elapsed();

        info!(
            file = %input.display(),
            range = range.index,
            submitted = report.submitted,
            failed = report.failed,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Range complete"
        );
        Ok(report)
    }
}
