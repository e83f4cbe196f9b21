//! Errors raised while computing or verifying a digest

use super::io::IoError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of a `calc` or `verify` call on a digester
#[derive(Error, Debug)]
pub enum DigesterError {
    /// The file could not be opened or read
    #[error("Unable to compute checksum: {0}")]
    Io(#[source] IoError),

    /// The hashing engine for this algorithm is not compiled into this build
    #[error("Checksum algorithm '{algorithm}' is not available in this build")]
    AlgorithmUnavailable { algorithm: String },

    /// Computed digest differs from the expected value
    #[error(
        "{algorithm} checksum mismatch for {}: expected {expected}, got {actual}",
        path.display()
    )]
    Mismatch {
        algorithm: String,
        path: PathBuf,
        expected: String,
        actual: String,
    },
}

impl DigesterError {
    /// Create an algorithm unavailable error
    pub fn algorithm_unavailable(algorithm: &str) -> Self {
        Self::AlgorithmUnavailable {
            algorithm: algorithm.to_string(),
        }
    }

    /// Create a digest mismatch error
    pub fn mismatch(algorithm: &str, path: &Path, expected: &str, actual: &str) -> Self {
        Self::Mismatch {
            algorithm: algorithm.to_string(),
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IoErrorKind;

    #[test]
    fn test_io_error_wraps_path() {
        let error = DigesterError::Io(IoError::file_not_found(Path::new("some/missing/file")));

        assert!(error.to_string().contains("Unable to compute checksum"));
        assert!(error.to_string().contains("some/missing/file"));
        match error {
            DigesterError::Io(io) => assert_eq!(io.kind, IoErrorKind::FileNotFound),
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_algorithm_unavailable_error() {
        let error = DigesterError::algorithm_unavailable("MD2");
        assert!(error.to_string().contains("MD2"));
        assert!(error.to_string().contains("not available"));
    }

    #[test]
    fn test_mismatch_error_reports_both_digests() {
        let error = DigesterError::mismatch("CRC32", Path::new("a.bin"), "deadbeef", "00000000");
        let message = error.to_string();

        assert!(message.contains("CRC32"));
        assert!(message.contains("a.bin"));
        assert!(message.contains("expected deadbeef"));
        assert!(message.contains("got 00000000"));
    }
}
