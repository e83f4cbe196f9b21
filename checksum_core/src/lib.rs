//! Checksum Core Library
//!
//! Computes and verifies whole-file checksums (CRC32, MD2, MD5, SHA-1,
//! SHA-256, SHA-384, SHA-512) through a registry of interchangeable
//! digesters, and reads and writes reference checksum files.

pub mod digest;
pub mod error;
pub mod reference;

// Re-export main types
pub use digest::{
    Algorithm, Crc32Digester, Digester, DigesterRegistry, MessageDigestDigester, StreamingHasher,
};
pub use error::{DigesterError, Error, Result};

/// Default read buffer size for digesting files (64KB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Largest read buffer a digester will allocate (64MB)
pub const MAX_BUFFER_SIZE: usize = 64 * 1024 * 1024;

/// Read settings shared by every digester a registry builds
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DigestConfig {
    /// Size of the chunk read from a file per hasher update
    pub buffer_size: usize,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl DigestConfig {
    /// Create a test configuration
    pub fn test() -> Self {
        Self {
            buffer_size: 1024, // 1KB chunks so small fixtures span many reads
        }
    }

    /// Reject settings no digester can run with
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(Error::Validation(
                error::ValidationError::invalid_configuration("buffer_size must be greater than 0"),
            ));
        }
        if self.buffer_size > MAX_BUFFER_SIZE {
            return Err(Error::Validation(
                error::ValidationError::invalid_configuration(&format!(
                    "buffer_size must be at most {MAX_BUFFER_SIZE} bytes, got {}",
                    self.buffer_size
                )),
            ));
        }
        Ok(())
    }
}
