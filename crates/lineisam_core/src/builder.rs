//! Index builder.
//!
//! Scans a data file line by line, keys each line by its first `key_length`
//! bytes, sorts the keys and writes them out as fixed-width index records.
//! A `<index>-print` mirror with one `key[offset]` line per record is written
//! next to the index for inspection; nothing reads it back.

use crate::config::IndexConfig;
use crate::error::{CoreError, CoreResult};
use crate::line::trim_line_ending;
use crate::record::{derive_key, IndexRecord};
use lineisam_storage::{FileBackend, StorageBackend};
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Encoded records are handed to the backend in batches of roughly this size.
const WRITE_BATCH_SIZE: usize = 64 * 1024;

/// Suffix of the human-readable mirror file.
pub const MIRROR_SUFFIX: &str = "-print";

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Number of records written (one per data line).
    pub records: u64,
    /// Size of the index file in bytes.
    pub index_bytes: u64,
    /// Path of the index file.
    pub index_path: PathBuf,
    /// Path of the mirror file, if one was written.
    pub mirror_path: Option<PathBuf>,
}

/// Returns the mirror file path for an index path (`<index>-print`).
#[must_use]
pub fn mirror_path(index_path: &Path) -> PathBuf {
    let mut name = OsString::from(index_path.as_os_str());
    name.push(MIRROR_SUFFIX);
    PathBuf::from(name)
}

/// Reads every line of `reader` and returns one record per line, in file order.
///
/// The offset of each line is taken before the line is consumed. A last line
/// without a trailing newline still yields a record.
///
/// # Errors
///
/// Returns an error if reading fails.
pub fn collect_records<R: BufRead>(mut reader: R, config: &IndexConfig) -> CoreResult<Vec<IndexRecord>> {
    let mut records = Vec::new();
    let mut line = Vec::new();
    let mut offset = 0u64;

    loop {
        line.clear();
        let read = reader.read_until(b'\n', &mut line)?;
        if read == 0 {
            break;
        }

        let key = derive_key(trim_line_ending(&line), config.key_length, config.pad_byte);
        records.push(IndexRecord::new(key, offset));
        offset += read as u64;
    }

    Ok(records)
}

/// Sorts records by key. Equal keys keep their file order.
pub fn sort_records(records: &mut [IndexRecord]) {
    records.sort_by(IndexRecord::cmp_key);
}

/// Builds index files from data files.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    config: IndexConfig,
}

impl IndexBuilder {
    /// Creates a builder.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: IndexConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Builds the index for `data_path` into `index_path`, overwriting it.
    ///
    /// The whole data file is scanned before the index is created, so a
    /// failed scan leaves an existing index untouched. A failed write leaves
    /// a truncated index behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be read, the index or mirror
    /// cannot be written, or both paths name the same file.
    pub fn build(&self, data_path: &Path, index_path: &Path) -> CoreResult<BuildSummary> {
        if same_file(data_path, index_path)? {
            return Err(CoreError::invalid_config(format!(
                "index path {} is the data file",
                index_path.display()
            )));
        }

        debug!(data = %data_path.display(), key_length = self.config.key_length, "scanning data file");
        let reader = BufReader::new(File::open(data_path)?);
        let mut records = collect_records(reader, &self.config)?;
        sort_records(&mut records);
        debug!(records = records.len(), "sorted index records");

        let mut index = FileBackend::create(index_path)?;
        let index_bytes = self.write_index(&records, &mut index)?;
        drop(index);

        let mirror = if self.config.write_mirror {
            let path = mirror_path(index_path);
            write_mirror(&records, self.config.pad_byte, &path)?;
            Some(path)
        } else {
            None
        };

        info!(
            records = records.len(),
            index_bytes,
            index = %index_path.display(),
            "built index"
        );

        Ok(BuildSummary {
            records: records.len() as u64,
            index_bytes,
            index_path: index_path.to_path_buf(),
            mirror_path: mirror,
        })
    }

    /// Writes sorted records to `index` and returns the bytes written.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be encoded or written.
    pub fn write_index(
        &self,
        records: &[IndexRecord],
        index: &mut dyn StorageBackend,
    ) -> CoreResult<u64> {
        let key_length = self.config.key_length;
        let mut batch = Vec::with_capacity(WRITE_BATCH_SIZE + IndexRecord::encoded_len(key_length));
        let mut written = 0u64;

        for record in records {
            record.encode_into(key_length, &mut batch)?;
            if batch.len() >= WRITE_BATCH_SIZE {
                index.append(&batch)?;
                written += batch.len() as u64;
                batch.clear();
            }
        }
        if !batch.is_empty() {
            index.append(&batch)?;
            written += batch.len() as u64;
        }

        index.flush()?;
        if self.config.sync_on_build {
            index.sync()?;
        }

        Ok(written)
    }
}

/// Builds an index with default settings for `key_length`.
///
/// # Errors
///
/// See [`IndexBuilder::build`].
pub fn build_index(data_path: &Path, index_path: &Path, key_length: usize) -> CoreResult<()> {
    IndexBuilder::new(IndexConfig::new(key_length))?.build(data_path, index_path)?;
    Ok(())
}

/// Key as shown in the mirror: trailing pad bytes removed.
fn mirror_key(key: &[u8], pad_byte: u8) -> &[u8] {
    let end = key.iter().rposition(|&b| b != pad_byte).map_or(0, |i| i + 1);
    &key[..end]
}

fn write_mirror(records: &[IndexRecord], pad_byte: u8, path: &Path) -> CoreResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for record in records {
        out.write_all(mirror_key(&record.key, pad_byte))?;
        writeln!(out, "[{}]", record.offset)?;
    }
    out.flush()?;
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> CoreResult<bool> {
    if !b.exists() {
        return Ok(false);
    }
    Ok(a.canonicalize()? == b.canonicalize()?)
}
