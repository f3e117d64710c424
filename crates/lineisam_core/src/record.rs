//! Index record model and on-disk layout.
//!
//! An index file is a headerless run of fixed-width records sorted by key:
//!
//! ```text
//! key_length bytes   key (short keys padded)
//! 8 bytes            data-file offset, big-endian i64
//! 1 byte             0x0A terminator
//! ```
//!
//! The record count is not stored; it is `index_size / record_length`.

use crate::error::{CoreError, CoreResult};
use std::cmp::Ordering;

/// Size of the encoded offset field.
pub const OFFSET_SIZE: usize = 8;

/// Byte closing every index record.
pub const TERMINATOR: u8 = b'\n';

/// Bytes each record adds on top of its key.
pub const RECORD_OVERHEAD: usize = OFFSET_SIZE + 1;

/// Orders two keys byte-wise.
///
/// Both the builder's sort and the searcher's lookups go through this
/// function; an index is only searchable under the order it was sorted by.
#[inline]
#[must_use]
pub fn compare_keys(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

/// Derives the fixed-width key of a line.
///
/// Takes the first `key_length` bytes; a shorter line is right-padded with
/// `pad_byte`.
#[must_use]
pub fn derive_key(line: &[u8], key_length: usize, pad_byte: u8) -> Vec<u8> {
    let take = line.len().min(key_length);
    let mut key = Vec::with_capacity(key_length);
    key.extend_from_slice(&line[..take]);
    key.resize(key_length, pad_byte);
    key
}

/// A key and the data-file offset of the line it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRecord {
    /// Fixed-width key bytes.
    pub key: Vec<u8>,
    /// Byte offset of the start of the line in the data file.
    pub offset: u64,
}

impl IndexRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(key: Vec<u8>, offset: u64) -> Self {
        Self { key, offset }
    }

    /// Orders records by key alone; offsets never take part.
    #[must_use]
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        compare_keys(&self.key, &other.key)
    }

    /// Encoded size of a record for the given key length.
    #[must_use]
    pub const fn encoded_len(key_length: usize) -> usize {
        key_length + RECORD_OVERHEAD
    }

    /// Encodes the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not exactly `key_length` bytes or the
    /// offset does not fit a signed 64-bit integer.
    pub fn encode(&self, key_length: usize) -> CoreResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(Self::encoded_len(key_length));
        self.encode_into(key_length, &mut buf)?;
        Ok(buf)
    }

    /// Appends the encoded record to `buf`.
    ///
    /// # Errors
    ///
    /// Same as [`IndexRecord::encode`].
    pub fn encode_into(&self, key_length: usize, buf: &mut Vec<u8>) -> CoreResult<()> {
        if self.key.len() != key_length {
            return Err(CoreError::invalid_format(format!(
                "key is {} bytes, index uses {key_length}",
                self.key.len()
            )));
        }
        let offset = i64::try_from(self.offset).map_err(|_| {
            CoreError::invalid_format(format!("offset {} exceeds i64::MAX", self.offset))
        })?;

        buf.extend_from_slice(&self.key);
        buf.extend_from_slice(&offset.to_be_bytes());
        buf.push(TERMINATOR);
        Ok(())
    }

    /// Decodes one record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidFormat`] if the length, terminator or
    /// offset is wrong.
    pub fn decode(data: &[u8], key_length: usize) -> CoreResult<Self> {
        let expected = Self::encoded_len(key_length);
        if data.len() != expected {
            return Err(CoreError::invalid_format(format!(
                "record is {} bytes, expected {expected}",
                data.len()
            )));
        }
        if data[expected - 1] != TERMINATOR {
            return Err(CoreError::invalid_format(format!(
                "record terminator is {:#04x}, expected 0x0a",
                data[expected - 1]
            )));
        }

        let offset = decode_offset(&data[key_length..key_length + OFFSET_SIZE])?;

        Ok(Self {
            key: data[..key_length].to_vec(),
            offset,
        })
    }
}

/// Decodes an 8-byte big-endian offset field.
///
/// # Errors
///
/// Returns an error if the slice is not 8 bytes or the value is negative.
pub fn decode_offset(bytes: &[u8]) -> CoreResult<u64> {
    let raw: [u8; OFFSET_SIZE] = bytes
        .try_into()
        .map_err(|_| CoreError::invalid_format("offset field must be 8 bytes"))?;
    let value = i64::from_be_bytes(raw);
    u64::try_from(value)
        .map_err(|_| CoreError::invalid_format(format!("negative data offset {value}")))
}

/// Shape of an index file: record width and record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexGeometry {
    /// Key width in bytes.
    pub key_length: usize,
    /// Full record width in bytes (`key_length + 9`).
    pub record_length: u64,
    /// Number of records in the file.
    pub num_records: u64,
}

impl IndexGeometry {
    /// Computes the geometry of an index file of `index_size` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidFormat`] if `index_size` is not an exact
    /// multiple of the record length, and [`CoreError::InvalidKeyLength`] for
    /// a zero key length.
    pub fn from_size(index_size: u64, key_length: usize) -> CoreResult<Self> {
        if key_length == 0 {
            return Err(CoreError::invalid_key_length(
                key_length,
                "key length must be at least 1",
            ));
        }
        let record_length = IndexRecord::encoded_len(key_length) as u64;
        if index_size % record_length != 0 {
            return Err(CoreError::invalid_format(format!(
                "index size {index_size} is not a multiple of record length {record_length}"
            )));
        }

        Ok(Self {
            key_length,
            record_length,
            num_records: index_size / record_length,
        })
    }

    /// Byte position of record `index`.
    #[must_use]
    pub const fn position_of(&self, index: u64) -> u64 {
        index * self.record_length
    }

    /// Byte position of the offset field of record `index`.
    #[must_use]
    pub const fn offset_position_of(&self, index: u64) -> u64 {
        self.position_of(index) + self.key_length as u64
    }

    /// Returns true if the index holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.num_records == 0
    }
}
