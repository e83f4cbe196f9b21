//! Validation related error types

use thiserror::Error;

/// Validation and configuration errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Algorithm name matches none of the supported algorithms
    #[error("Unsupported checksum algorithm: {name}")]
    UnsupportedAlgorithm { name: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl ValidationError {
    /// Create an unsupported algorithm error
    pub fn unsupported_algorithm(name: &str) -> Self {
        Self::UnsupportedAlgorithm {
            name: name.to_string(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(message: &str) -> Self {
        Self::InvalidConfiguration {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_algorithm_error() {
        let error = ValidationError::unsupported_algorithm("FOO123");
        assert!(error.to_string().contains("Unsupported checksum algorithm"));
        assert!(error.to_string().contains("FOO123"));
    }

    #[test]
    fn test_invalid_configuration_error() {
        let error = ValidationError::invalid_configuration("Bad config");
        assert!(error.to_string().contains("Invalid configuration"));
        assert!(error.to_string().contains("Bad config"));
    }
}
