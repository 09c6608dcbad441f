//! Offline file splitting
//!
//! Writes each computed range of an input file to its own file so that the
//! pieces can be fed to separate loader invocations by hand.

use crate::core::partition::compute_ranges;
use crate::utils::error::Result;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt, BufWriter};
use tracing::info;

/// Output path for chunk `index`: `creds.jsonl` becomes `creds_{index}.jsonl`
pub fn split_path(input: &Path, index: usize) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}_{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_{}", stem, index),
    };
    input.with_file_name(name)
}

/// Split `input` into `splits` files next to it and return their paths.
///
/// Chunk files are overwritten if they already exist. Every range produces a
/// file, even an empty one.
pub async fn split_file(input: &Path, splits: usize) -> Result<Vec<PathBuf>> {
    let ranges = compute_ranges(input, splits).await?;
    let mut source = File::open(input).await?;
    let mut written = Vec::with_capacity(ranges.len());

    for range in ranges {
        let target = split_path(input, range.index);

        source.seek(SeekFrom::Start(range.start)).await?;
        let mut chunk = (&mut source).take(range.len());
        let mut out = BufWriter::new(File::create(&target).await?);
        let copied = tokio::io::copy(&mut chunk, &mut out).await?;
        out.flush().await?;

        info!(
            source = %input.display(),
            chunk = %target.display(),
            bytes = copied,
            "Wrote chunk"
        );
        written.push(target);
    }

    Ok(written)
}
