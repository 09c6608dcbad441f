//! Line-aligned partitioning of input files
//!
//! A file is cut into `N` contiguous byte ranges of roughly equal size. Every
//! interior boundary is pushed forward to the start of the next line so that
//! no record straddles two ranges.


use crate::utils::error::{LoaderError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::debug;

/// A `[start, end)` byte interval of an input file, aligned to line starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Position of this range within its file, starting at zero
    pub index: usize,
    pub start: u64,
    pub end: u64,
}

impl Range {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` is a valid resume position for this range
    pub fn accepts_offset(&self, offset: u64) -> bool {
        (self.start..=self.end).contains(&offset)
    }
}

/// Split `file_size` bytes readable from `reader` into `splits` ranges.
///
/// The target chunk is `ceil(file_size / splits)`, so earlier ranges absorb
/// the remainder. Boundaries are monotonic: when line alignment pushes one
/// boundary past the next target, the later ranges come out empty instead
/// of overlapping.
pub fn partition<R: Read + Seek>(reader: &mut R, file_size: u64, splits: usize) -> Result<Vec<Range>> {
    if splits == 0 {
        return Err(LoaderError::InvalidSplitCount(splits));
    }
    if file_size == 0 {
        return Err(LoaderError::EmptyInput(
            "cannot partition a zero-length input".to_string(),
        ));
    }

    let chunk = file_size.div_ceil(splits as u64);
    let mut boundaries = Vec::with_capacity(splits + 1);
    boundaries.push(0u64);

    for i in 1..splits {
        let previous = boundaries[i - 1];
        let target = (chunk * i as u64).min(file_size);
        let aligned = if target <= previous {
            previous
        } else {
            align_to_line_start(reader, target, file_size)?
        };
        boundaries.push(aligned.max(previous));
    }
    boundaries.push(file_size);

    Ok(boundaries
        .windows(2)
        .enumerate()
        .map(|(index, pair)| Range {
            index,
            start: pair[0],
            end: pair[1],
        })
        .collect())
}

/// First line start at or after `target`, or `file_size` if there is none.
///
/// `target` must lie in `1..file_size`.
fn align_to_line_start<R: Read + Seek>(reader: &mut R, target: u64, file_size: u64) -> Result<u64> {
    // Starting one byte early keeps a boundary that already sits on a line
    // start where it is.
    reader.seek(SeekFrom::Start(target - 1))?;
    let mut buffered = BufReader::new(reader);
    let skipped = buffered.skip_until(b'\n')? as u64;
    Ok((target - 1 + skipped).min(file_size))
}

/// Compute the ranges of the file at `path`.
///
/// The scan runs on the blocking pool; it touches at most one line per
/// boundary.
pub async fn compute_ranges(path: &Path, splits: usize) -> Result<Vec<Range>> {
    let path = path.to_owned();

    tokio::task::spawn_blocking(move || {
        let mut file = File::open(&path)?;
        let file_size = file.metadata()?.len();
        let ranges = partition(&mut file, file_size, splits).map_err(|e| match e {
            LoaderError::EmptyInput(_) => LoaderError::EmptyInput(path.display().to_string()),
            other => other,
        })?;

        debug!(
            file = %path.display(),
            file_size,
            splits,
            "Computed ranges"
        );
        Ok(ranges)
    })
    .await
    .map_err(|e| LoaderError::TaskFailed(format!("range computation: {}", e)))?
}
