//! Cryptographic hash digester (MD2, MD5 and the SHA family)

use crate::digest::{Algorithm, Digester, StreamingHasher};
use crate::error::{DigesterError, ValidationError};
use crate::{Error, Result};
use digest::Digest;

/// Digester backed by a RustCrypto hash engine selected at construction
#[derive(Debug, Clone)]
pub struct MessageDigestDigester {
    algorithm: Algorithm,
    buffer_size: usize,
}

impl MessageDigestDigester {
    /// Create a digester for a cryptographic hash algorithm
    ///
    /// Fails with [`ValidationError::UnsupportedAlgorithm`] for CRC32 (not a
    /// message digest) and for algorithms not compiled into this build.
    pub fn new(algorithm: Algorithm) -> Result<Self> {
        Self::with_buffer_size(algorithm, crate::DEFAULT_BUFFER_SIZE)
    }

    /// Like [`new`](Self::new), reading `buffer_size` bytes per chunk
    ///
    /// Out-of-range sizes are clamped when a file is read.
    pub fn with_buffer_size(algorithm: Algorithm, buffer_size: usize) -> Result<Self> {
        if algorithm == Algorithm::Crc32 || !algorithm.is_available() {
            return Err(Error::Validation(ValidationError::unsupported_algorithm(
                algorithm.name(),
            )));
        }
        Ok(Self {
            algorithm,
            buffer_size,
        })
    }
}

/// Streaming adapter over any `digest::Digest` engine
struct DigestHasher<D> {
    engine: D,
}

impl<D: Digest + Send> DigestHasher<D> {
    fn boxed() -> Box<dyn StreamingHasher>
    where
        D: 'static,
    {
        Box::new(Self { engine: D::new() })
    }
}

impl<D: Digest + Send> StreamingHasher for DigestHasher<D> {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.engine, data);
    }

    fn finalize(self: Box<Self>) -> String {
        hex::encode(Digest::finalize(self.engine))
    }
}

impl Digester for MessageDigestDigester {
    fn kind(&self) -> Algorithm {
        self.algorithm
    }

    fn create_hasher(&self) -> Result<Box<dyn StreamingHasher>> {
        match self.algorithm {
            #[cfg(feature = "md2")]
            Algorithm::Md2 => Ok(DigestHasher::<md2::Md2>::boxed()),
            #[cfg(feature = "md5")]
            Algorithm::Md5 => Ok(DigestHasher::<md5::Md5>::boxed()),
            #[cfg(feature = "sha1")]
            Algorithm::Sha1 => Ok(DigestHasher::<sha1::Sha1>::boxed()),
            #[cfg(feature = "sha2")]
            Algorithm::Sha256 => Ok(DigestHasher::<sha2::Sha256>::boxed()),
            #[cfg(feature = "sha2")]
            Algorithm::Sha384 => Ok(DigestHasher::<sha2::Sha384>::boxed()),
            #[cfg(feature = "sha2")]
            Algorithm::Sha512 => Ok(DigestHasher::<sha2::Sha512>::boxed()),
            other => Err(DigesterError::algorithm_unavailable(other.name()).into()),
        }
    }

    fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}
