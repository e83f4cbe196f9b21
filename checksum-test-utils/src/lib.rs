//! Test utilities for the checksum workspace
//!
//! This crate provides fixture file builders and known digest vectors
//! for testing digesters and the CLI.

pub mod builders;
pub mod fixtures;

// Re-export commonly used types
pub use builders::TestFileBuilder;
pub use fixtures::{ABC_DIGESTS, EMPTY_DIGESTS, known_digest};
