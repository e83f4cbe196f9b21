//! Checksum calculation for the checksum core library
//!
//! A [`Digester`] computes and verifies the digest of a whole file for one
//! [`Algorithm`]. Digesters are obtained by name from a [`DigesterRegistry`],
//! which builds each one lazily and caches it for reuse.

use crate::{Error, Result, error::ValidationError};
use serde::{Deserialize, Serialize};

mod algorithms;
mod registry;
mod traits;

pub use algorithms::{Crc32Digester, MessageDigestDigester};
pub use registry::DigesterRegistry;
pub use traits::{Digester, StreamingHasher};

/// Checksum algorithms supported by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Algorithm {
    /// CRC-32 (IEEE) checksum
    #[serde(rename = "CRC32")]
    Crc32,
    /// MD2 message digest
    #[serde(rename = "MD2")]
    Md2,
    /// MD5 message digest
    #[serde(rename = "MD5")]
    Md5,
    /// SHA-1 secure hash
    #[serde(rename = "SHA-1")]
    Sha1,
    /// SHA-256 secure hash
    #[serde(rename = "SHA-256")]
    Sha256,
    /// SHA-384 secure hash
    #[serde(rename = "SHA-384")]
    Sha384,
    /// SHA-512 secure hash
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl Algorithm {
    /// Every algorithm the registry knows about, compiled in or not
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Crc32,
        Algorithm::Md2,
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
    ];

    /// Canonical display name, also the token accepted by the registry
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Crc32 => "CRC32",
            Algorithm::Md2 => "MD2",
            Algorithm::Md5 => "MD5",
            Algorithm::Sha1 => "SHA-1",
            Algorithm::Sha256 => "SHA-256",
            Algorithm::Sha384 => "SHA-384",
            Algorithm::Sha512 => "SHA-512",
        }
    }

    /// Suffix appended to a file name to name its reference checksum file
    pub const fn filename_extension(self) -> &'static str {
        match self {
            Algorithm::Crc32 => ".crc32",
            Algorithm::Md2 => ".md2",
            Algorithm::Md5 => ".md5",
            Algorithm::Sha1 => ".sha1",
            Algorithm::Sha256 => ".sha256",
            Algorithm::Sha384 => ".sha384",
            Algorithm::Sha512 => ".sha512",
        }
    }

    /// Length of the hex encoded digest
    pub const fn hex_len(self) -> usize {
        match self {
            Algorithm::Crc32 => 8,
            Algorithm::Md2 | Algorithm::Md5 => 32,
            Algorithm::Sha1 => 40,
            Algorithm::Sha256 => 64,
            Algorithm::Sha384 => 96,
            Algorithm::Sha512 => 128,
        }
    }

    /// Whether the hashing engine for this algorithm is compiled in
    pub const fn is_available(self) -> bool {
        match self {
            Algorithm::Crc32 => true,
            Algorithm::Md2 => cfg!(feature = "md2"),
            Algorithm::Md5 => cfg!(feature = "md5"),
            Algorithm::Sha1 => cfg!(feature = "sha1"),
            Algorithm::Sha256 | Algorithm::Sha384 | Algorithm::Sha512 => cfg!(feature = "sha2"),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = Error;

    /// Case-insensitive, otherwise exact: "sha-256" parses, "SHA256" does not.
    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Validation(ValidationError::unsupported_algorithm(s)))
    }
}
