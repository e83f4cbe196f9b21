//! Digester implementations

use super::{Algorithm, Digester};
use crate::{DigestConfig, Result};
use std::sync::Arc;

mod crc32;
mod message_digest;

pub use crc32::Crc32Digester;
pub use message_digest::MessageDigestDigester;

/// Construct the digester for `algorithm` with the given read settings
pub(crate) fn create(algorithm: Algorithm, config: &DigestConfig) -> Result<Arc<dyn Digester>> {
    match algorithm {
        Algorithm::Crc32 => Ok(Arc::new(Crc32Digester::with_buffer_size(config.buffer_size))),
        other => Ok(Arc::new(MessageDigestDigester::with_buffer_size(
            other,
            config.buffer_size,
        )?)),
    }
}
