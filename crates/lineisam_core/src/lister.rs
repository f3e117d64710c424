//! Sequential listing of records in index (key) order.

use crate::config::IndexConfig;
use crate::error::CoreResult;
use crate::line::read_line_at;
use crate::record::{IndexGeometry, IndexRecord};
use lineisam_storage::{FileBackend, StorageBackend};
use std::path::Path;
use tracing::debug;

/// A data line reached through the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedRecord {
    /// Key as stored in the index.
    pub key: Vec<u8>,
    /// Offset of the line in the data file.
    pub offset: u64,
    /// The data line, without its line ending.
    pub line: Vec<u8>,
}

impl ListedRecord {
    /// Reassembles the line from the stored key and the rest of the data line.
    ///
    /// The key is shown once, followed by the line bytes after the key.
    /// Padding added to the key of a short line is not shown.
    #[must_use]
    pub fn render(&self) -> Vec<u8> {
        let shown = self.key.len().min(self.line.len());
        let mut out = Vec::with_capacity(self.line.len().max(shown));
        out.extend_from_slice(&self.key[..shown]);
        if self.line.len() > self.key.len() {
            out.extend_from_slice(&self.line[self.key.len()..]);
        }
        out
    }

    /// [`ListedRecord::render`] as a string, replacing invalid UTF-8.
    #[must_use]
    pub fn render_lossy(&self) -> String {
        String::from_utf8_lossy(&self.render()).into_owned()
    }
}

/// Iterator over the records of an index, in stored order.
///
/// Yields `Err` once and then stops if a read fails. Stops quietly when an
/// index entry points at or past the end of the data file.
pub struct Lister {
    config: IndexConfig,
    geometry: IndexGeometry,
    index: Box<dyn StorageBackend>,
    data: Box<dyn StorageBackend>,
    next: u64,
    done: bool,
}

impl Lister {
    /// Opens the index and data files for listing.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be opened, the configuration is
    /// invalid, or the index size is not a whole number of records.
    pub fn open(config: IndexConfig, data_path: &Path, index_path: &Path) -> CoreResult<Self> {
        let index = FileBackend::open(index_path)?;
        let data = FileBackend::open(data_path)?;
        Self::with_backends(config, Box::new(data), Box::new(index))
    }

    /// Lists over already opened backends.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the index size is
    /// not a whole number of records.
    pub fn with_backends(
        config: IndexConfig,
        data: Box<dyn StorageBackend>,
        index: Box<dyn StorageBackend>,
    ) -> CoreResult<Self> {
        config.validate()?;
        let geometry = IndexGeometry::from_size(index.size()?, config.key_length)?;
        debug!(records = geometry.num_records, "listing index");

        Ok(Self {
            config,
            geometry,
            index,
            data,
            next: 0,
            done: false,
        })
    }

    /// Returns the index geometry.
    #[must_use]
    pub fn geometry(&self) -> IndexGeometry {
        self.geometry
    }

    fn step(&mut self) -> CoreResult<Option<ListedRecord>> {
        if self.next >= self.geometry.num_records {
            return Ok(None);
        }

        let position = self.geometry.position_of(self.next);
        let bytes = self
            .index
            .read_at(position, self.geometry.record_length as usize)?;
        let record = IndexRecord::decode(&bytes, self.config.key_length)?;
        self.next += 1;

        match read_line_at(self.data.as_ref(), record.offset, self.config.read_chunk_size)? {
            Some(line) => Ok(Some(ListedRecord {
                key: record.key,
                offset: record.offset,
                line,
            })),
            None => {
                debug!(offset = record.offset, "index entry past end of data file");
                Ok(None)
            }
        }
    }
}

impl Iterator for Lister {
    type Item = CoreResult<ListedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.step() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl std::fmt::Debug for Lister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lister")
            .field("geometry", &self.geometry)
            .field("next", &self.next)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

/// Opens a lister with default settings for `key_length`.
///
/// # Errors
///
/// See [`Lister::open`].
pub fn list_records(data_path: &Path, index_path: &Path, key_length: usize) -> CoreResult<Lister> {
    Lister::open(IndexConfig::new(key_length), data_path, index_path)
}
