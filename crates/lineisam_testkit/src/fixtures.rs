//! Data and index files in a temporary directory.

use lineisam_core::{
    build_index, list_records, search, IndexGeometry, IndexRecord, ListedRecord,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A data file and its index, removed when dropped.
pub struct IndexedFiles {
    /// Key length the index was built with.
    pub key_length: usize,
    data_path: PathBuf,
    index_path: PathBuf,
    _temp_dir: TempDir,
}

impl IndexedFiles {
    /// Writes `lines` (each followed by `\n`) to a data file without indexing it.
    pub fn unindexed(lines: &[&str], key_length: usize) -> Self {
        let mut data = Vec::new();
        for line in lines {
            data.extend_from_slice(line.as_bytes());
            data.push(b'\n');
        }
        Self::unindexed_bytes(&data, key_length)
    }

    /// Writes raw bytes to a data file without indexing it.
    pub fn unindexed_bytes(data: &[u8], key_length: usize) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_path = temp_dir.path().join("data.txt");
        let index_path = temp_dir.path().join("data.idx");
        std::fs::write(&data_path, data).expect("Failed to write data file");

        Self {
            key_length,
            data_path,
            index_path,
            _temp_dir: temp_dir,
        }
    }

    /// Writes `lines` to a data file and builds its index.
    pub fn build(lines: &[&str], key_length: usize) -> Self {
        let files = Self::unindexed(lines, key_length);
        files.rebuild();
        files
    }

    /// Writes raw bytes to a data file and builds its index.
    pub fn build_bytes(data: &[u8], key_length: usize) -> Self {
        let files = Self::unindexed_bytes(data, key_length);
        files.rebuild();
        files
    }

    /// Builds (or rebuilds) the index.
    pub fn rebuild(&self) {
        build_index(&self.data_path, &self.index_path, self.key_length)
            .expect("Failed to build index");
    }

    /// Path of the data file.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Path of the index file.
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Raw bytes of the index file.
    pub fn index_bytes(&self) -> Vec<u8> {
        std::fs::read(&self.index_path).expect("Failed to read index file")
    }

    /// Decodes every index record in stored order.
    pub fn index_records(&self) -> Vec<IndexRecord> {
        let bytes = self.index_bytes();
        let geometry = IndexGeometry::from_size(bytes.len() as u64, self.key_length)
            .expect("Index size is not a whole number of records");
        bytes
            .chunks(geometry.record_length as usize)
            .map(|chunk| IndexRecord::decode(chunk, self.key_length).expect("Bad index record"))
            .collect()
    }

    /// Lists every record through the index.
    pub fn list(&self) -> Vec<ListedRecord> {
        list_records(&self.data_path, &self.index_path, self.key_length)
            .expect("Failed to open lister")
            .collect::<Result<_, _>>()
            .expect("Failed to list records")
    }

    /// Looks up `key` through the index.
    pub fn search(&self, key: &[u8]) -> Option<Vec<u8>> {
        search(&self.data_path, &self.index_path, self.key_length, key).expect("Search failed")
    }
}

/// Splits raw data into lines the way the index builder does.
///
/// Returns `(offset, line)` pairs; line endings are stripped and an empty
/// segment after the final newline is not a line.
pub fn split_lines(data: &[u8]) -> Vec<(u64, Vec<u8>)> {
    let mut lines = Vec::new();
    let mut offset = 0u64;
    for raw in data.split_inclusive(|&b| b == b'\n') {
        lines.push((offset, lineisam_core::trim_line_ending(raw).to_vec()));
        offset += raw.len() as u64;
    }
    lines
}
