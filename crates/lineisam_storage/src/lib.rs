//! # lineisam storage
//!
//! Byte-store backends for lineisam.
//!
//! Backends are **opaque byte stores**: they know nothing about index
//! records, key lengths or line layout. `lineisam_core` owns all format
//! interpretation and only ever asks for "these bytes at this offset" or
//! "append these bytes".
//!
//! ## Available Backends
//!
//! - [`FileBackend`] - Files on disk (data files and index files)
//! - [`InMemoryBackend`] - For tests
//!
//! ## Example
//!
//! ```rust
//! use lineisam_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! let offset = backend.append(b"apple,1\n").unwrap();
//! assert_eq!(backend.read_at(offset, 5).unwrap(), b"apple");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
