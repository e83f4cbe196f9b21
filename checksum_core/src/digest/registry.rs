//! Central registry for digester instances

use super::traits::Digester;
use super::{Algorithm, algorithms};
use crate::{DigestConfig, Result};
use log::{debug, trace};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Resolves algorithm names to shared digesters, building each one lazily
///
/// Instances are cached under the name exactly as the caller spelled it, so
/// `"md5"` and `"MD5"` may hold two functionally identical digesters. The
/// cache never evicts.
pub struct DigesterRegistry {
    config: DigestConfig,
    digesters: RwLock<HashMap<String, Arc<dyn Digester>>>,
}

impl std::fmt::Debug for DigesterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigesterRegistry")
            .field("config", &self.config)
            .field("cached", &self.cached())
            .finish()
    }
}

impl Default for DigesterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DigesterRegistry {
    /// Create an empty registry with the default read settings
    pub fn new() -> Self {
        Self {
            config: DigestConfig::default(),
            digesters: RwLock::new(HashMap::new()),
        }
    }

    /// Create an empty registry whose digesters use `config`
    pub fn with_config(config: DigestConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            digesters: RwLock::new(HashMap::new()),
        })
    }

    /// Get the process-wide registry instance
    pub fn global() -> &'static Self {
        static INSTANCE: OnceCell<DigesterRegistry> = OnceCell::new();
        INSTANCE.get_or_init(Self::new)
    }

    /// Settings handed to every digester built by this registry
    pub fn config(&self) -> &DigestConfig {
        &self.config
    }

    /// Get the digester for `name`, matched case-insensitively
    ///
    /// Fails with `ValidationError::UnsupportedAlgorithm` when the name matches
    /// no supported algorithm or its engine is not compiled in.
    pub fn get_digester(&self, name: &str) -> Result<Arc<dyn Digester>> {
        // The map only ever grows, so a poisoned lock still holds valid entries
        if let Some(digester) = self
            .digesters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            trace!("Digester cache hit for '{name}'");
            return Ok(Arc::clone(digester));
        }

        let algorithm: Algorithm = name.parse()?;
        let digester = algorithms::create(algorithm, &self.config)?;
        debug!("Created {algorithm} digester for '{name}'");

        // A racing caller may have inserted first; keep theirs
        let mut digesters = self
            .digesters
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(
            digesters.entry(name.to_string()).or_insert(digester),
        ))
    }

    /// Number of cached digesters
    pub fn cached(&self) -> usize {
        self.digesters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Algorithms available in this build
    pub fn supported() -> Vec<Algorithm> {
        Algorithm::ALL
            .into_iter()
            .filter(|algorithm| algorithm.is_available())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_supported_name_resolves() {
        let registry = DigesterRegistry::new();
        for name in [
            "CRC32", "MD2", "MD5", "SHA-1", "SHA-256", "SHA-384", "SHA-512",
        ] {
            let digester = registry.get_digester(name).unwrap();
            assert_eq!(digester.algorithm(), name);
            assert!(!digester.filename_extension().is_empty());
        }
    }

    #[test]
    fn test_lowercase_names_resolve() {
        let registry = DigesterRegistry::new();
        let digester = registry.get_digester("sha-384").unwrap();
        assert_eq!(digester.kind(), Algorithm::Sha384);
        assert_eq!(digester.filename_extension(), ".sha384");
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let registry = DigesterRegistry::new();
        let err = registry
            .get_digester("FOO123")
            .err()
            .expect("FOO123 should be rejected");

        assert!(err.is_unsupported_algorithm());
        assert_eq!(registry.cached(), 0);
    }

    #[test]
    fn test_same_name_returns_cached_instance() {
        let registry = DigesterRegistry::new();
        let first = registry.get_digester("MD5").unwrap();
        let second = registry.get_digester("MD5").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.cached(), 1);
    }

    #[test]
    fn test_cache_is_keyed_by_exact_spelling() {
        let registry = DigesterRegistry::new();
        let upper = registry.get_digester("SHA-1").unwrap();
        let lower = registry.get_digester("sha-1").unwrap();

        assert!(!Arc::ptr_eq(&upper, &lower));
        assert_eq!(upper.kind(), lower.kind());
        assert_eq!(registry.cached(), 2);
    }

    #[test]
    fn test_with_config_rejects_zero_buffer() {
        let err = DigesterRegistry::with_config(DigestConfig { buffer_size: 0 }).unwrap_err();
        assert!(err.to_string().contains("buffer_size"));
    }

    #[test]
    fn test_with_config_rejects_oversized_buffer() {
        let config = DigestConfig {
            buffer_size: crate::MAX_BUFFER_SIZE + 1,
        };
        let err = DigesterRegistry::with_config(config).unwrap_err();
        assert!(err.to_string().contains("buffer_size"));
    }

    #[test]
    fn test_config_reaches_digesters() {
        let registry = DigesterRegistry::with_config(DigestConfig { buffer_size: 4096 }).unwrap();
        assert_eq!(registry.get_digester("CRC32").unwrap().buffer_size(), 4096);
        assert_eq!(registry.get_digester("SHA-512").unwrap().buffer_size(), 4096);
    }

    #[test]
    fn test_global_is_shared() {
        let a = DigesterRegistry::global().get_digester("SHA-256").unwrap();
        let b = DigesterRegistry::global().get_digester("SHA-256").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_supported_lists_default_build() {
        assert_eq!(DigesterRegistry::supported(), Algorithm::ALL.to_vec());
    }
}
