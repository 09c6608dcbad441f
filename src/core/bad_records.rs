//! Append-only log of records the agent did not accept
//!
//! One `.bad` file per input file. Each line is the record exactly as it
//! appeared in the input, optionally followed by a TAB and the error text, so
//! `cut -f1` yields a file that can be fed back to the loader.

use crate::core::checkpoint::file_label;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Bad-record log location for one input file: `{temp_dir}/{basename}.bad`
pub fn bad_record_path(temp_dir: &Path, input: &Path) -> PathBuf {
    temp_dir.join(format!("{}.bad", file_label(input)))
}

/// Open handle on a bad-record log
#[derive(Debug)]
pub struct BadRecordLog {
    path: PathBuf,
    file: File,
    written: u64,
}

impl BadRecordLog {
    /// Open for appending, creating the file if needed. Existing content is
    /// kept.
    pub async fn open(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        Ok(Self {
            path,
            file,
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records appended through this handle
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Append one failed record.
    ///
    /// `raw` is written byte for byte, even when it is not valid UTF-8. The
    /// line goes out in a single write so that ranges of the same file sharing
    /// the log never interleave partial lines.
    pub async fn record(&mut self, raw: &[u8], error: Option<&str>) -> Result<()> {
        let end = raw
            .iter()
            .rposition(|b| !matches!(b, b'\n' | b'\r'))
            .map_or(0, |i| i + 1);
        let mut line = Vec::with_capacity(end + 64);
        line.extend_from_slice(&raw[..end]);
        if let Some(error) = error {
            line.push(b'\t');
            let error: String = error
                .chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect();
            line.extend_from_slice(error.as_bytes());
        }
        line.push(b'\n');

        self.file.write_all(&line).await?;
        self.file.flush().await?;
        self.written += 1;

        warn!(
            bad_records = %self.path.display(),
            error = error.unwrap_or(""),
            "Record failed"
        );
        Ok(())
    }

    /// Flush and release the handle, returning the number of records written
    pub async fn close(mut self) -> Result<u64> {
        self.file.flush().await?;
        self.file.sync_data().await?;
        Ok(self.written)
    }
}
