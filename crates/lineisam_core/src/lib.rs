//! # lineisam core
//!
//! An indexed-sequential access method over line-oriented text files.
//!
//! A data file is left as it is. [`IndexBuilder`] keys every line by its
//! first `key_length` bytes, sorts the keys, and writes a fixed-width index
//! of `(key, offset)` records. [`Lister`] walks that index to print the data
//! in key order, and [`Searcher`] binary-searches it on disk for point
//! lookups.
//!
//! ## Example
//!
//! ```no_run
//! use lineisam_core::{build_index, search};
//! use std::path::Path;
//!
//! let data = Path::new("fruit.txt");
//! let index = Path::new("fruit.idx");
//! build_index(data, index, 6)?;
//! if let Some(line) = search(data, index, 6, b"banana")? {
//!     println!("{}", String::from_utf8_lossy(&line));
//! }
//! # Ok::<(), lineisam_core::CoreError>(())
//! ```
//!
//! Access is single-threaded and assumes nothing else writes the files
//! while an operation runs.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod line;
mod lister;
mod record;
mod searcher;
mod verify;

pub use builder::{
    build_index, collect_records, mirror_path, sort_records, BuildSummary, IndexBuilder,
    MIRROR_SUFFIX,
};
pub use config::{IndexConfig, DEFAULT_PAD_BYTE, DEFAULT_READ_CHUNK_SIZE, MAX_KEY_LENGTH};
pub use error::{CoreError, CoreResult};
pub use line::{is_line_start, read_line_at, trim_line_ending};
pub use lister::{list_records, ListedRecord, Lister};
pub use record::{
    compare_keys, decode_offset, derive_key, IndexGeometry, IndexRecord, OFFSET_SIZE,
    RECORD_OVERHEAD, TERMINATOR,
};
pub use searcher::{search, IndexHit, SearchHit, Searcher};
pub use verify::{verify_backends, verify_files, verify_index, VerifyReport};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
