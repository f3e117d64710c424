//! CLI command implementations.

pub mod create;
pub mod list;
pub mod search;
pub mod verify;
