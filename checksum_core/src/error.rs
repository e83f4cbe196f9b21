//! Error types for the checksum core library
//!
//! Errors fall into two categories that callers must handle:
//! - Validation errors: an algorithm name the registry cannot resolve, or
//!   an invalid configuration value
//! - Digester errors: failures while computing or verifying a digest

use thiserror::Error;

pub mod digester;
pub mod io;
pub mod validation;

pub use self::digester::DigesterError;
pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the checksum core library
#[derive(Error, Debug)]
pub enum Error {
    /// Validation related errors (unsupported algorithm, bad configuration)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Digest computation or verification errors
    #[error(transparent)]
    Digester(#[from] DigesterError),
}

impl Error {
    /// Whether this error reports an algorithm name the registry does not know
    pub fn is_unsupported_algorithm(&self) -> bool {
        matches!(
            self,
            Error::Validation(ValidationError::UnsupportedAlgorithm { .. })
        )
    }

    /// Whether this error reports a digest that did not match its reference
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Error::Digester(DigesterError::Mismatch { .. }))
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Digester(DigesterError::Io(IoError::from_std(source)))
    }
}

impl From<IoError> for Error {
    fn from(source: IoError) -> Self {
        Self::Digester(DigesterError::Io(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_unsupported_algorithm_error_creation() {
        let error = Error::Validation(ValidationError::unsupported_algorithm("FOO123"));

        assert!(error.is_unsupported_algorithm());
        assert!(!error.is_mismatch());
        assert!(error.to_string().contains("FOO123"));
    }

    #[test]
    fn test_mismatch_error_creation() {
        let error = Error::Digester(DigesterError::mismatch(
            "MD5",
            Path::new("/tmp/file.txt"),
            "deadbeef",
            "d41d8cd98f00b204e9800998ecf8427e",
        ));

        assert!(error.is_mismatch());
        assert!(!error.is_unsupported_algorithm());
        let message = error.to_string();
        assert!(message.contains("MD5"));
        assert!(message.contains("deadbeef"));
        assert!(message.contains("/tmp/file.txt"));
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();

        match error {
            Error::Digester(DigesterError::Io(io_err)) => {
                assert_eq!(io_err.kind, IoErrorKind::FileNotFound);
            }
            _ => panic!("Expected Digester::Io error"),
        }
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let path = Path::new("/test/file.bin");
        let error = Error::from(IoError::permission_denied(path, io_error));

        // Digester -> IoError -> std::io::Error
        let io_layer = error.source().expect("digester error should expose its cause");
        assert!(io_layer.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_display_formatting() {
        let errors = vec![
            Error::Validation(ValidationError::unsupported_algorithm("SHA3")),
            Error::Validation(ValidationError::invalid_configuration("buffer_size is 0")),
            Error::Digester(DigesterError::algorithm_unavailable("MD2")),
            Error::from(IoError::file_not_found(Path::new("missing.bin"))),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
