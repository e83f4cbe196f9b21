//! Fixture file builder for digest tests

use checksum_core::error::IoError;
use checksum_core::{Digester, Result, reference};
use std::path::{Path, PathBuf};

/// Builder that writes fixture files into a directory and removes them on drop
pub struct TestFileBuilder {
    base_dir: PathBuf,
    generated_files: Vec<PathBuf>,
}

impl TestFileBuilder {
    /// Create a new test file builder
    pub fn new(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            generated_files: Vec::new(),
        }
    }

    /// Check if the builder is ready to use
    pub fn is_ready(&self) -> bool {
        self.base_dir.exists() && self.base_dir.is_dir()
    }

    /// Path a fixture called `name` would have, without creating it
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Generate a file with exact content
    pub fn generate_file(&mut self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let file_path = self.base_dir.join(name);
        std::fs::write(&file_path, content)
            .map_err(|e| IoError::from_std(e).with_path(&file_path))?;

        self.generated_files.push(file_path.clone());
        Ok(file_path)
    }

    /// Generate an empty file
    pub fn generate_empty_file(&mut self, name: &str) -> Result<PathBuf> {
        self.generate_file(name, &[])
    }

    /// Generate a file of `size` copies of `byte`
    pub fn generate_repeating_file(&mut self, name: &str, size: usize, byte: u8) -> Result<PathBuf> {
        self.generate_file(name, &vec![byte; size])
    }

    /// Generate a deterministic pseudo-random file with specific size and seed
    pub fn generate_deterministic_file(
        &mut self,
        name: &str,
        size: usize,
        seed: u64,
    ) -> Result<PathBuf> {
        self.generate_file(name, &Self::deterministic_content(size, seed))
    }

    /// Content written by [`generate_deterministic_file`](Self::generate_deterministic_file)
    pub fn deterministic_content(size: usize, seed: u64) -> Vec<u8> {
        // Linear congruential generator, same constants as Numerical Recipes
        let mut state = seed ^ 0x9e37_79b9_7f4a_7c15;
        let mut content = Vec::with_capacity(size);
        for _ in 0..size {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            content.push((state >> 24) as u8);
        }
        content
    }

    /// Write the reference file of `file` for `digester` and track it for cleanup
    pub fn write_reference(
        &mut self,
        file: &Path,
        digester: &dyn Digester,
        digest: &str,
    ) -> Result<PathBuf> {
        let path = reference::write_reference(file, digester, digest)?;
        self.generated_files.push(path.clone());
        Ok(path)
    }

    /// Files generated so far
    pub fn generated_files(&self) -> &[PathBuf] {
        &self.generated_files
    }

    /// Clean up all generated files
    pub fn cleanup(&mut self) {
        for file_path in &self.generated_files {
            if let Err(e) = std::fs::remove_file(file_path) {
                log::trace!("Fixture {} not removed: {e}", file_path.display());
            }
        }
        self.generated_files.clear();
    }
}

impl Drop for TestFileBuilder {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checksum_core::Crc32Digester;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "checksum-test-utils-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_deterministic_content_is_stable() {
        let a = TestFileBuilder::deterministic_content(4096, 7);
        let b = TestFileBuilder::deterministic_content(4096, 7);
        let c = TestFileBuilder::deterministic_content(4096, 8);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 4096);
    }

    #[test]
    fn test_files_are_removed_on_drop() {
        let dir = scratch_dir("drop");
        let (file, reference) = {
            let mut builder = TestFileBuilder::new(&dir);
            assert!(builder.is_ready());
            let file = builder.generate_repeating_file("data.bin", 10, 0xAB).unwrap();
            let reference = builder
                .write_reference(&file, &Crc32Digester::new(), "00000000")
                .unwrap();
            assert_eq!(std::fs::read(&file).unwrap(), vec![0xAB; 10]);
            assert_eq!(builder.generated_files().len(), 2);
            (file, reference)
        };

        assert!(!file.exists());
        assert!(!reference.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
