//! Core traits for the digester abstraction

use super::Algorithm;
use crate::error::{DigesterError, IoError};
use crate::{DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE, Result};
use log::debug;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Trait for streaming digest calculation
///
/// One hasher holds the accumulation state of exactly one digest run.
pub trait StreamingHasher: Send {
    /// Update the hasher with new data
    fn update(&mut self, data: &[u8]);

    /// Finalize the calculation and return the lowercase hex digest
    fn finalize(self: Box<Self>) -> String;
}

/// Computes and verifies whole-file digests for one algorithm
///
/// Implementations carry no per-call mutable state: every [`calc`](Digester::calc)
/// obtains a fresh [`StreamingHasher`], so one instance can be shared across
/// threads and used on many files at once.
pub trait Digester: Send + Sync {
    /// Algorithm implemented by this digester
    fn kind(&self) -> Algorithm;

    /// Create a new accumulation state
    ///
    /// Fails with [`DigesterError::AlgorithmUnavailable`] when the hashing
    /// engine is not compiled into this build.
    fn create_hasher(&self) -> Result<Box<dyn StreamingHasher>>;

    /// Canonical display name of the algorithm, e.g. `SHA-256`
    fn algorithm(&self) -> &'static str {
        self.kind().name()
    }

    /// Reference file suffix, e.g. `.sha256`
    fn filename_extension(&self) -> &'static str {
        self.kind().filename_extension()
    }

    /// Size of the read buffer used by [`calc`](Digester::calc)
    ///
    /// `calc` clamps it to `1..=MAX_BUFFER_SIZE`.
    fn buffer_size(&self) -> usize {
        DEFAULT_BUFFER_SIZE
    }

    /// Digest of in-memory data
    fn hash_bytes(&self, data: &[u8]) -> Result<String> {
        let mut hasher = self.create_hasher()?;
        hasher.update(data);
        Ok(hasher.finalize())
    }

    /// Read the whole file in fixed-size chunks and return its hex digest
    fn calc(&self, path: &Path) -> Result<String> {
        let mut hasher = self.create_hasher()?;
        let mut file = open_regular_file(path)?;
        let mut buffer = vec![0u8; self.buffer_size().clamp(1, MAX_BUFFER_SIZE)];
        let mut bytes_processed = 0u64;

        loop {
            let n = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(IoError::from_std(e).with_path(path).into()),
            };
            hasher.update(&buffer[..n]);
            bytes_processed += n as u64;
        }

        let digest = hasher.finalize();
        debug!(
            "{} of {} ({bytes_processed} bytes): {digest}",
            self.algorithm(),
            path.display()
        );
        Ok(digest)
    }

    /// Compute the digest of `path` and compare it with `expected`
    ///
    /// Hex comparison ignores ASCII case.
    fn verify(&self, path: &Path, expected: &str) -> Result<()> {
        let actual = self.calc(path)?;
        if actual.eq_ignore_ascii_case(expected) {
            Ok(())
        } else {
            Err(DigesterError::mismatch(self.algorithm(), path, expected, &actual).into())
        }
    }
}

fn open_regular_file(path: &Path) -> Result<File> {
    let file = File::open(path).map_err(|e| IoError::from_std(e).with_path(path))?;
    let metadata = file
        .metadata()
        .map_err(|e| IoError::from_std(e).with_path(path))?;
    if !metadata.is_file() {
        return Err(IoError::not_a_file(path).into());
    }
    Ok(file)
}
