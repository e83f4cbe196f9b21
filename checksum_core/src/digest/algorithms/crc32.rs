//! CRC32 checksum digester

use crate::Result;
use crate::digest::{Algorithm, Digester, StreamingHasher};
use crc32fast::Hasher as Crc32Hasher;

/// CRC-32 (IEEE) checksum rendered as 8 lowercase hex digits
#[derive(Debug, Clone)]
pub struct Crc32Digester {
    buffer_size: usize,
}

impl Crc32Digester {
    /// Create a CRC32 digester reading with the default buffer size
    pub fn new() -> Self {
        Self::with_buffer_size(crate::DEFAULT_BUFFER_SIZE)
    }

    /// Create a CRC32 digester reading `buffer_size` bytes per chunk
    ///
    /// Out-of-range sizes are clamped when a file is read.
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self { buffer_size }
    }
}

impl Default for Crc32Digester {
    fn default() -> Self {
        Self::new()
    }
}

/// CRC32 streaming hasher
struct Crc32StreamingHasher {
    hasher: Crc32Hasher,
}

impl StreamingHasher for Crc32StreamingHasher {
    fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    fn finalize(self: Box<Self>) -> String {
        // Zero-padded so every CRC32 digest is exactly 8 characters
        format!("{:08x}", self.hasher.finalize())
    }
}

impl Digester for Crc32Digester {
    fn kind(&self) -> Algorithm {
        Algorithm::Crc32
    }

    fn create_hasher(&self) -> Result<Box<dyn StreamingHasher>> {
        Ok(Box::new(Crc32StreamingHasher {
            hasher: Crc32Hasher::new(),
        }))
    }

    fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}
