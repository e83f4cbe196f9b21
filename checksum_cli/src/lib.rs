//! Library side of the `checksum` command line tool
//!
//! Exposes the configuration loader, the batch runner and the output
//! formatters so they can be tested without spawning the binary.

pub mod config;
pub mod output;
pub mod runner;
pub mod terminal;
