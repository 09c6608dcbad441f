//! Run orchestration
//!
//! Every input file is partitioned, and one future per `(file, range)` is
//! driven concurrently on the current task. Futures share nothing mutable:
//! each owns its input handle, checkpoint and bad-record handle. A range that
//! fails on local I/O is reported and the others carry on.

use crate::config::RunConfig;
use crate::core::checkpoint::file_label;
use crate::core::issuer::CredentialIssuer;
use crate::core::partition::{Range, compute_ranges};
use crate::core::range::{RangeProcessor, RangeReport};
use crate::core::splitter::split_file;
use crate::utils::error::{LoaderError, Result};
use futures::future::join_all;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info};

/// A file or range that could not be processed
#[derive(Debug)]
pub struct RangeFailure {
    pub file: PathBuf,
    /// `None` when the file could not even be partitioned
    pub range: Option<usize>,
    pub error: LoaderError,
}

/// Outcome of a whole run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<RangeReport>,
    pub failures: Vec<RangeFailure>,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Records sent to the agent across all ranges
    pub fn submitted(&self) -> u64 {
        self.reports.iter().map(|r| r.submitted).sum()
    }

    /// Records written to bad-record logs across all ranges
    pub fn failed(&self) -> u64 {
        self.reports.iter().map(|r| r.failed).sum()
    }

    /// True when no range aborted; failed records do not count
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives a load run against one issuer
pub struct LoadRunner<'a> {
    issuer: &'a dyn CredentialIssuer,
    config: &'a RunConfig,
}

impl<'a> LoadRunner<'a> {
    pub fn new(issuer: &'a dyn CredentialIssuer, config: &'a RunConfig) -> Self {
        Self { issuer, config }
    }

    /// Submit every record of every file in `paths`.
    ///
    /// Fails before touching any state when two inputs would share state
    /// files, since those are named after the file name alone.
    pub async fn run(&self, paths: &[PathBuf]) -> Result<RunSummary> {
        let start = Instant::now();
        check_distinct_labels(paths)?;
        tokio::fs::create_dir_all(&self.config.temp_dir).await?;

        let mut summary = RunSummary::default();
        let mut work: Vec<(&Path, Range)> = Vec::new();

        for path in paths {
            match compute_ranges(path, self.config.parallel).await {
                Ok(ranges) => work.extend(ranges.into_iter().map(|r| (path.as_path(), r))),
                Err(e) => {
                    error!(file = %path.display(), "Cannot partition input: {}", e);
                    summary.failures.push(RangeFailure {
                        file: path.clone(),
                        range: None,
                        error: e,
                    });
                }
            }
        }

        info!(
            files = paths.len(),
            tasks = work.len(),
            batch_size = self.config.batch_size,
            "Starting submission"
        );

        let processor = RangeProcessor::new(self.issuer, self.config);
        let results = join_all(
            work.iter()
                .map(|(path, range)| processor.process(path, *range)),
        )
        .await;

        for ((path, range), result) in work.into_iter().zip(results) {
            match result {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    error!(
                        file = %path.display(),
                        range = range.index,
                        "Range aborted: {}",
                        e
                    );
                    summary.failures.push(RangeFailure {
                        file: path.to_path_buf(),
                        range: Some(range.index),
                        error: e,
                    });
                }
            }
        }

        summary.elapsed = start.elapsed();
        info!(
            submitted = summary.submitted(),
            failed = summary.failed(),
            aborted = summary.failures.len(),
            "Total time: {:.2}s",
            summary.elapsed.as_secs_f64()
        );
        Ok(summary)
    }
}

/// Reject inputs whose state files would collide in the temp dir
fn check_distinct_labels(paths: &[PathBuf]) -> Result<()> {
    let mut seen: HashMap<String, &Path> = HashMap::with_capacity(paths.len());
    for path in paths {
        if let Some(previous) = seen.insert(file_label(path), path) {
            return Err(LoaderError::config(format!(
                "{} and {} share the state file name {:?}; rename one or load them separately with different temp dirs",
                previous.display(),
                path.display(),
                file_label(path)
            )));
        }
    }
    Ok(())
}

/// Split every file in `paths` into `splits` chunk files.
///
/// Stops at the first file that cannot be split.
pub async fn split_all(paths: &[PathBuf], splits: usize) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for path in paths {
        written.extend(split_file(path, splits).await?);
    }
    Ok(written)
}
