//! Per-range resume checkpoints
//!
//! Each `(input file, range index)` pair owns one `.done` file holding the
//! byte offset up to which the range has been read and submitted. The offset
//! is rewritten after every batch via a sibling temp file and a rename, so an
//! interrupted run leaves either the old or the new value, never a torn one.

use crate::core::partition::Range;
use crate::utils::error::{LoaderError, Result};
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Checkpoint file location for one range: `{temp_dir}/{basename}_{index}.done`
pub fn checkpoint_path(temp_dir: &Path, input: &Path, index: usize) -> PathBuf {
    temp_dir.join(format!("{}_{}.done", file_label(input), index))
}

/// Final path component of `input`, used to name state files
pub(crate) fn file_label(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string())
}

/// Committed read position of one range
#[derive(Debug)]
pub struct Checkpoint {
    path: PathBuf,
    range: Range,
    offset: u64,
    resumed: bool,
}

impl Checkpoint {
    /// Open (creating if absent) the checkpoint for `range`.
    ///
    /// An empty file means the range has not been started. A stored offset
    /// outside `[range.start, range.end]` is rejected: it was written under a
    /// different split count.
    pub async fn open(path: PathBuf, range: Range) -> Result<Self> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        let content = fs::read_to_string(&path).await?;
        let trimmed = content.trim();

        if trimmed.is_empty() {
            debug!(checkpoint = %path.display(), "No checkpoint, starting at range start");
            return Ok(Self {
                path,
                offset: range.start,
                range,
                resumed: false,
            });
        }

        let offset: u64 = trimmed.parse().map_err(|_| {
            LoaderError::checkpoint(format!(
                "{} does not contain a byte offset: {:?}",
                path.display(),
                trimmed
            ))
        })?;

        if !range.accepts_offset(offset) {
            return Err(LoaderError::checkpoint(format!(
                "{} holds offset {} outside range [{}, {}); was the split count changed?",
                path.display(),
                offset,
                range.start,
                range.end
            )));
        }

        info!(
            checkpoint = %path.display(),
            offset,
            "Resuming range from checkpoint"
        );
        Ok(Self {
            path,
            range,
            offset,
            resumed: true,
        })
    }

    /// Offset to resume reading from
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Whether a previous run left progress behind
    pub fn resumed(&self) -> bool {
        self.resumed
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the committed offset has reached the end of the range
    pub fn is_complete(&self) -> bool {
        self.offset >= self.range.end
    }

    /// Persist `offset` as the new resume position.
    ///
    /// Offsets only move forward and never past the range end.
    pub async fn commit(&mut self, offset: u64) -> Result<()> {
        if offset < self.offset {
            return Err(LoaderError::checkpoint(format!(
                "refusing to move {} backwards from {} to {}",
                self.path.display(),
                self.offset,
                offset
            )));
        }
        if offset > self.range.end {
            return Err(LoaderError::checkpoint(format!(
                "offset {} is past the end of range [{}, {})",
                offset, self.range.start, self.range.end
            )));
        }

        let mut tmp_name = self.path.clone().into_os_string();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let mut tmp = fs::File::create(&tmp_path).await?;
        tmp.write_all(offset.to_string().as_bytes()).await?;
        tmp.sync_data().await?;
        drop(tmp);
        fs::rename(&tmp_path, &self.path).await?;

        self.offset = offset;
        debug!(checkpoint = %self.path.display(), offset, "Checkpoint committed");
        Ok(())
    }
}
