//! Index configuration.

use crate::error::{CoreError, CoreResult};

/// Default size of each read when pulling a line out of the data file.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 1000;

/// Default byte used to pad keys of lines shorter than the key length.
pub const DEFAULT_PAD_BYTE: u8 = b' ';

/// Largest key length accepted; keeps a single index record well under a page.
pub const MAX_KEY_LENGTH: usize = 4096;

/// Configuration shared by the builder, lister, searcher and verifier.
///
/// The same configuration (in particular `key_length` and `pad_byte`) must be
/// used to build an index and to read it back.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Number of leading bytes of each line used as its key.
    pub key_length: usize,

    /// Byte appended to keys of lines shorter than `key_length`.
    pub pad_byte: u8,

    /// Bytes requested per read when scanning a data line for its terminator.
    pub read_chunk_size: usize,

    /// Whether the builder writes the `<index>-print` mirror file.
    pub write_mirror: bool,

    /// Whether the builder calls `sync` on the index file after writing it.
    pub sync_on_build: bool,
}

impl IndexConfig {
    /// Creates a configuration for the given key length with default values.
    #[must_use]
    pub fn new(key_length: usize) -> Self {
        Self {
            key_length,
            pad_byte: DEFAULT_PAD_BYTE,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            write_mirror: true,
            sync_on_build: false,
        }
    }

    /// Sets the padding byte for short keys.
    #[must_use]
    pub const fn pad_byte(mut self, value: u8) -> Self {
        self.pad_byte = value;
        self
    }

    /// Sets the read chunk size used for data lines.
    #[must_use]
    pub const fn read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size;
        self
    }

    /// Sets whether the mirror file is written.
    #[must_use]
    pub const fn write_mirror(mut self, value: bool) -> Self {
        self.write_mirror = value;
        self
    }

    /// Sets whether the index file is synced after a build.
    #[must_use]
    pub const fn sync_on_build(mut self, value: bool) -> Self {
        self.sync_on_build = value;
        self
    }

    /// Checks that the configuration can describe a valid index.
    ///
    /// # Errors
    ///
    /// Returns an error if the key length is zero or above [`MAX_KEY_LENGTH`],
    /// or if the read chunk size is zero.
    pub fn validate(&self) -> CoreResult<()> {
        if self.key_length == 0 {
            return Err(CoreError::invalid_key_length(
                self.key_length,
                "key length must be at least 1",
            ));
        }
        if self.key_length > MAX_KEY_LENGTH {
            return Err(CoreError::invalid_key_length(
                self.key_length,
                format!("key length must not exceed {MAX_KEY_LENGTH}"),
            ));
        }
        if self.read_chunk_size == 0 {
            return Err(CoreError::invalid_config("read chunk size must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = IndexConfig::new(6);
        assert_eq!(config.key_length, 6);
        assert_eq!(config.pad_byte, b' ');
        assert_eq!(config.read_chunk_size, 1000);
        assert!(config.write_mirror);
        assert!(!config.sync_on_build);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_pattern() {
        let config = IndexConfig::new(4)
            .pad_byte(0)
            .read_chunk_size(16)
            .write_mirror(false)
            .sync_on_build(true);

        assert_eq!(config.pad_byte, 0);
        assert_eq!(config.read_chunk_size, 16);
        assert!(!config.write_mirror);
        assert!(config.sync_on_build);
    }

    #[test]
    fn zero_key_length_rejected() {
        let err = IndexConfig::new(0).validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidKeyLength { key_length: 0, .. }));
    }

    #[test]
    fn oversized_key_length_rejected() {
        let err = IndexConfig::new(MAX_KEY_LENGTH + 1).validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidKeyLength { .. }));
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let err = IndexConfig::new(3).read_chunk_size(0).validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig { .. }));
    }
}
