//! Index consistency checks.

use crate::config::IndexConfig;
use crate::error::CoreResult;
use crate::line::{is_line_start, read_line_at};
use crate::record::{compare_keys, derive_key, IndexGeometry, IndexRecord};
use lineisam_storage::{FileBackend, StorageBackend};
use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, warn};

/// Result of checking an index against its data file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Index size in bytes.
    pub index_bytes: u64,
    /// Data file size in bytes.
    pub data_bytes: u64,
    /// Number of records checked.
    pub records_checked: u64,
    /// Problems found, in index order.
    pub errors: Vec<String>,
}

impl VerifyReport {
    /// Returns true if no problem was found.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks an index against its data file with default settings for `key_length`.
///
/// Reports, rather than fails on, a size that is not a whole number of
/// records, bad terminators, keys out of order, offsets outside the data
/// file or not at a line start, and keys that do not match their line.
///
/// # Errors
///
/// Returns an error only if a file cannot be opened or read, or the key
/// length is invalid.
pub fn verify_index(data_path: &Path, index_path: &Path, key_length: usize) -> CoreResult<VerifyReport> {
    verify_files(&IndexConfig::new(key_length), data_path, index_path)
}

/// [`verify_index`] with an explicit configuration.
///
/// # Errors
///
/// See [`verify_index`].
pub fn verify_files(config: &IndexConfig, data_path: &Path, index_path: &Path) -> CoreResult<VerifyReport> {
    let index = FileBackend::open(index_path)?;
    let data = FileBackend::open(data_path)?;
    verify_backends(config, &data, &index)
}

/// Checks an index backend against a data backend. See [`verify_index`].
///
/// # Errors
///
/// Returns an error if a read fails or the configuration is invalid.
pub fn verify_backends(
    config: &IndexConfig,
    data: &dyn StorageBackend,
    index: &dyn StorageBackend,
) -> CoreResult<VerifyReport> {
    config.validate()?;

    let mut report = VerifyReport {
        index_bytes: index.size()?,
        data_bytes: data.size()?,
        ..VerifyReport::default()
    };

    let geometry = match IndexGeometry::from_size(report.index_bytes, config.key_length) {
        Ok(geometry) => geometry,
        Err(e) => {
            report.errors.push(e.to_string());
            return Ok(report);
        }
    };

    let mut previous: Option<Vec<u8>> = None;
    for i in 0..geometry.num_records {
        report.records_checked += 1;
        let bytes = index.read_at(geometry.position_of(i), geometry.record_length as usize)?;
        let record = match IndexRecord::decode(&bytes, config.key_length) {
            Ok(record) => record,
            Err(e) => {
                report.errors.push(format!("record {i}: {e}"));
                previous = None;
                continue;
            }
        };

        if let Some(prev) = &previous {
            if compare_keys(prev, &record.key) == Ordering::Greater {
                report.errors.push(format!("record {i}: key sorts before record {}", i - 1));
            }
        }

        check_offset(config, data, i, &record, &mut report)?;
        previous = Some(record.key);
    }

    if report.is_ok() {
        debug!(records = report.records_checked, "index verified");
    } else {
        warn!(problems = report.errors.len(), "index verification found problems");
    }
    Ok(report)
}

fn check_offset(
    config: &IndexConfig,
    data: &dyn StorageBackend,
    i: u64,
    record: &IndexRecord,
    report: &mut VerifyReport,
) -> CoreResult<()> {
    if record.offset >= report.data_bytes {
        report.errors.push(format!(
            "record {i}: offset {} past end of data file ({} bytes)",
            record.offset, report.data_bytes
        ));
        return Ok(());
    }
    if !is_line_start(data, record.offset)? {
        report
            .errors
            .push(format!("record {i}: offset {} is not a line start", record.offset));
        return Ok(());
    }
    if let Some(line) = read_line_at(data, record.offset, config.read_chunk_size)? {
        if derive_key(&line, config.key_length, config.pad_byte) != record.key {
            report
                .errors
                .push(format!("record {i}: key does not match line at offset {}", record.offset));
        }
    }
    Ok(())
}
