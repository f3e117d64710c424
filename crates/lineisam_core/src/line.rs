//! Reading single lines out of a data file by offset.

use crate::error::CoreResult;
use lineisam_storage::StorageBackend;

/// Strips a trailing `\n`, and a `\r` before it, from a raw line.
#[must_use]
pub fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Reads the line starting at `offset`, without its line ending.
///
/// Reads in `chunk_size` pieces until a line feed or the end of the data, so
/// lines of any length come back whole. Returns `None` if `offset` is at or
/// past the end of the data.
///
/// # Errors
///
/// Returns an error if a read fails.
pub fn read_line_at(
    data: &dyn StorageBackend,
    offset: u64,
    chunk_size: usize,
) -> CoreResult<Option<Vec<u8>>> {
    let size = data.size()?;
    if offset >= size {
        return Ok(None);
    }

    let chunk_size = chunk_size.max(1) as u64;
    let mut line = Vec::new();
    let mut position = offset;

    while position < size {
        let len = chunk_size.min(size - position) as usize;
        let chunk = data.read_at(position, len)?;
        if let Some(end) = chunk.iter().position(|&b| b == b'\n') {
            line.extend_from_slice(&chunk[..end]);
            return Ok(Some(trim_line_ending(&line).to_vec()));
        }
        line.extend_from_slice(&chunk);
        position += len as u64;
    }

    Ok(Some(trim_line_ending(&line).to_vec()))
}

/// Returns true if `offset` is the first byte of a line.
///
/// # Errors
///
/// Returns an error if the preceding byte cannot be read.
pub fn is_line_start(data: &dyn StorageBackend, offset: u64) -> CoreResult<bool> {
    if offset == 0 {
        return Ok(true);
    }
    if offset >= data.size()? {
        return Ok(false);
    }
    Ok(data.read_at(offset - 1, 1)?[0] == b'\n')
}
