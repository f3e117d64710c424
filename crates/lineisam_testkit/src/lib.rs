//! # lineisam testkit
//!
//! Test utilities for lineisam.
//!
//! This crate provides:
//! - Fixtures pairing a temporary data file with its index
//! - Property-based test generators using proptest
//! - Golden vectors pinning the index file layout
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lineisam_testkit::prelude::*;
//!
//! let files = IndexedFiles::build(&["apple,1", "banana,2"], 6);
//! assert_eq!(files.search(b"banana").unwrap(), b"banana,2");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}
