//! Binary search over an on-disk index.
//!
//! The index is never loaded: every step reads one key straight from the
//! index file at `mid * record_length`.

use crate::config::IndexConfig;
use crate::error::{CoreError, CoreResult};
use crate::line::read_line_at;
use crate::record::{compare_keys, decode_offset, derive_key, IndexGeometry, OFFSET_SIZE};
use lineisam_storage::{FileBackend, StorageBackend};
use std::cmp::Ordering;
use std::path::Path;
use tracing::debug;

/// Position of a matching key in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHit {
    /// Record number of the match.
    pub position: u64,
    /// Data-file offset stored with the key.
    pub offset: u64,
    /// Number of keys read to find it.
    pub key_reads: u32,
}

/// A data line found by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Where the key sits in the index.
    pub index: IndexHit,
    /// The data line, without its line ending.
    pub line: Vec<u8>,
}

/// Point lookups against one index file.
pub struct Searcher {
    config: IndexConfig,
    geometry: IndexGeometry,
    index: Box<dyn StorageBackend>,
}

impl Searcher {
    /// Opens an index file for searching.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the configuration is
    /// invalid, or the index size is not a whole number of records.
    pub fn open(config: IndexConfig, index_path: &Path) -> CoreResult<Self> {
        let index = FileBackend::open(index_path)?;
        Self::with_backend(config, Box::new(index))
    }

    /// Searches an already opened index backend.
    ///
    /// # Errors
    ///
    /// Same as [`Searcher::open`], minus the open.
    pub fn with_backend(config: IndexConfig, index: Box<dyn StorageBackend>) -> CoreResult<Self> {
        config.validate()?;
        let geometry = IndexGeometry::from_size(index.size()?, config.key_length)?;
        Ok(Self {
            config,
            geometry,
            index,
        })
    }

    /// Returns the index geometry.
    #[must_use]
    pub fn geometry(&self) -> IndexGeometry {
        self.geometry
    }

    /// Turns a user-supplied key into the fixed-width form stored in the index.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidKey`] if the key is longer than the key length.
    pub fn normalize_key(&self, key: &[u8]) -> CoreResult<Vec<u8>> {
        if key.len() > self.config.key_length {
            return Err(CoreError::invalid_key(format!(
                "key is {} bytes, index keys are {}",
                key.len(),
                self.config.key_length
            )));
        }
        Ok(derive_key(key, self.config.key_length, self.config.pad_byte))
    }

    /// Finds `key` in the index without touching the data file.
    ///
    /// With duplicate keys, whichever match the search lands on first is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is too long or an index read fails.
    pub fn locate(&self, key: &[u8]) -> CoreResult<Option<IndexHit>> {
        let wanted = self.normalize_key(key)?;
        let key_length = self.config.key_length;

        let mut left = 0u64;
        let mut right = self.geometry.num_records;
        let mut key_reads = 0u32;

        while left < right {
            let mid = left + (right - left) / 2;
            let stored = self.index.read_at(self.geometry.position_of(mid), key_length)?;
            key_reads += 1;

            match compare_keys(&wanted, &stored) {
                Ordering::Equal => {
                    let raw = self
                        .index
                        .read_at(self.geometry.offset_position_of(mid), OFFSET_SIZE)?;
                    let offset = decode_offset(&raw)?;
                    debug!(position = mid, offset, key_reads, "key found");
                    return Ok(Some(IndexHit {
                        position: mid,
                        offset,
                        key_reads,
                    }));
                }
                Ordering::Less => right = mid,
                Ordering::Greater => left = mid + 1,
            }
        }

        debug!(key_reads, "key not found");
        Ok(None)
    }

    /// Finds `key` and reads its line from `data`.
    ///
    /// `data` is only read on a match.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is too long, a read fails, or the stored
    /// offset lies past the end of the data.
    pub fn find(&self, key: &[u8], data: &dyn StorageBackend) -> CoreResult<Option<SearchHit>> {
        let Some(hit) = self.locate(key)? else {
            return Ok(None);
        };
        self.fetch(hit, data).map(Some)
    }

    /// Like [`Searcher::find`], opening `data_path` only once the key is found.
    ///
    /// # Errors
    ///
    /// See [`Searcher::find`]; also fails if the data file cannot be opened.
    pub fn find_in_file(&self, key: &[u8], data_path: &Path) -> CoreResult<Option<SearchHit>> {
        let Some(hit) = self.locate(key)? else {
            return Ok(None);
        };
        let data = FileBackend::open(data_path)?;
        self.fetch(hit, &data).map(Some)
    }

    fn fetch(&self, hit: IndexHit, data: &dyn StorageBackend) -> CoreResult<SearchHit> {
        let line = read_line_at(data, hit.offset, self.config.read_chunk_size)?.ok_or_else(|| {
            CoreError::invalid_format(format!(
                "record {} points at offset {} past the end of the data file",
                hit.position, hit.offset
            ))
        })?;
        Ok(SearchHit { index: hit, line })
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("config", &self.config)
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

/// Looks up `key_value` with default settings for `key_length`.
///
/// Returns the matching data line, or `None` if no index entry has that key.
///
/// # Errors
///
/// Returns an error if a file cannot be opened or read, the index is
/// malformed, or the key is longer than `key_length`.
pub fn search(
    data_path: &Path,
    index_path: &Path,
    key_length: usize,
    key_value: &[u8],
) -> CoreResult<Option<Vec<u8>>> {
    let searcher = Searcher::open(IndexConfig::new(key_length), index_path)?;
    Ok(searcher
        .find_in_file(key_value, data_path)?
        .map(|hit| hit.line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_index, collect_records, sort_records, IndexBuilder};
    use lineisam_storage::InMemoryBackend;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use tempfile::tempdir;

    const FRUIT: &[u8] = b"apple,1\nbanana,2\ncherry,3\n";

    fn searcher_for(data: &[u8], config: IndexConfig) -> Searcher {
        let builder = IndexBuilder::new(config.clone()).unwrap();
        let mut records = collect_records(data, &config).unwrap();
        sort_records(&mut records);
        let mut index = InMemoryBackend::new();
        builder.write_index(&records, &mut index).unwrap();
        Searcher::with_backend(config, Box::new(index)).unwrap()
    }

    #[test]
    fn finds_each_key() {
        let searcher = searcher_for(FRUIT, IndexConfig::new(6));
        let data = InMemoryBackend::with_data(FRUIT.to_vec());

        let hit = searcher.find(b"banana", &data).unwrap().unwrap();
        assert_eq!(hit.line, b"banana,2");
        assert_eq!(hit.index.offset, 8);
        assert_eq!(hit.index.position, 1);

        assert_eq!(searcher.find(b"apple,", &data).unwrap().unwrap().line, b"apple,1");
        assert_eq!(searcher.find(b"cherry", &data).unwrap().unwrap().line, b"cherry,3");
    }

    #[test]
    fn missing_key_is_none() {
        let searcher = searcher_for(FRUIT, IndexConfig::new(6));
        assert!(searcher.locate(b"grape ").unwrap().is_none());
        assert!(searcher.locate(b"aaaaaa").unwrap().is_none());
        assert!(searcher.locate(b"zzzzzz").unwrap().is_none());
    }

    #[test]
    fn miss_never_reads_data() {
        let searcher = searcher_for(FRUIT, IndexConfig::new(6));
        // An empty data backend would fail any read.
        let data = InMemoryBackend::new();
        assert!(searcher.find(b"grape ", &data).unwrap().is_none());
    }

    #[test]
    fn short_search_key_matches_padded_short_line() {
        let searcher = searcher_for(b"fig\nkiwi fruit\n", IndexConfig::new(6));
        let data = InMemoryBackend::with_data(b"fig\nkiwi fruit\n".to_vec());
        assert_eq!(searcher.find(b"fig", &data).unwrap().unwrap().line, b"fig");
        assert!(searcher.find(b"kiwi", &data).unwrap().is_none());
    }

    #[test]
    fn overlong_key_is_rejected() {
        let searcher = searcher_for(FRUIT, IndexConfig::new(6));
        assert!(matches!(
            searcher.locate(b"banana,2"),
            Err(CoreError::InvalidKey { .. })
        ));
    }

    #[test]
    fn empty_index_finds_nothing() {
        let searcher =
            Searcher::with_backend(IndexConfig::new(4), Box::new(InMemoryBackend::new())).unwrap();
        assert!(searcher.locate(b"abcd").unwrap().is_none());
    }

    #[test]
    fn key_reads_are_logarithmic() {
        let data: Vec<u8> = (0..1024u32)
            .flat_map(|i| format!("{i:05}\n").into_bytes())
            .collect();
        let searcher = searcher_for(&data, IndexConfig::new(5));
        for key in [b"00000", b"00511", b"01023"] {
            let hit = searcher.locate(key).unwrap().unwrap();
            assert!(hit.key_reads <= 11, "{} key reads", hit.key_reads);
        }
    }

    #[test]
    fn partial_index_is_format_error() {
        let result = Searcher::with_backend(
            IndexConfig::new(6),
            Box::new(InMemoryBackend::with_data(vec![b'x'; 16])),
        );
        assert!(result.unwrap_err().is_format_error());
    }

    #[test]
    fn stale_offset_is_format_error() {
        let searcher = searcher_for(FRUIT, IndexConfig::new(6));
        let shrunk = InMemoryBackend::with_data(b"apple,1\n".to_vec());
        assert!(searcher
            .find(b"cherry", &shrunk)
            .unwrap_err()
            .is_format_error());
    }

    #[test]
    fn search_files_end_to_end() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("fruit.txt");
        let index = dir.path().join("fruit.idx");
        std::fs::write(&data, FRUIT).unwrap();
        build_index(&data, &index, 6).unwrap();

        assert_eq!(
            search(&data, &index, 6, b"banana").unwrap().unwrap(),
            b"banana,2"
        );
        assert!(search(&data, &index, 6, b"grape ").unwrap().is_none());
    }

    #[test]
    fn search_miss_does_not_open_data_file() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("fruit.txt");
        let index = dir.path().join("fruit.idx");
        std::fs::write(&data, FRUIT).unwrap();
        build_index(&data, &index, 6).unwrap();
        std::fs::remove_file(&data).unwrap();

        assert!(search(&data, &index, 6, b"grape ").unwrap().is_none());
        assert!(matches!(
            search(&data, &index, 6, b"banana"),
            Err(CoreError::Storage(_))
        ));
    }

    proptest! {
        #[test]
        fn locate_matches_key_set(
            keys in prop::collection::btree_set("[a-d]{1,4}", 0..40),
            queries in prop::collection::vec("[a-d]{1,4}", 1..20),
        ) {
            let data: Vec<u8> = keys
                .iter()
                .flat_map(|k| format!("{k}\n").into_bytes())
                .collect();
            let searcher = searcher_for(&data, IndexConfig::new(4));
            let padded: BTreeSet<Vec<u8>> = keys
                .iter()
                .map(|k| derive_key(k.as_bytes(), 4, b' '))
                .collect();

            for query in queries.iter().chain(keys.iter()) {
                let expected = padded.contains(&derive_key(query.as_bytes(), 4, b' '));
                prop_assert_eq!(searcher.locate(query.as_bytes()).unwrap().is_some(), expected);
            }
        }
    }
}
