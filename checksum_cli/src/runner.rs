//! Digest and verify batches of files
//!
//! Algorithm names are resolved once through the registry; each file is then
//! digested on the blocking thread pool so several files run concurrently.

use anyhow::{Context, Result};
use checksum_core::error::{DigesterError, IoErrorKind};
use checksum_core::{Algorithm, Digester, DigesterRegistry, Error, reference};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Digests of one file
#[derive(Debug, Clone, Serialize)]
pub struct FileDigests {
    pub file: PathBuf,
    pub size: u64,
    pub digests: BTreeMap<Algorithm, String>,
    /// Reference files written for this file, if any
    pub references: Vec<PathBuf>,
    #[serde(rename = "processing_time_ms", serialize_with = "as_millis")]
    pub processing_time: Duration,
}

/// Result of checking one file against one reference file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerifyStatus {
    Ok,
    Mismatch { expected: String, actual: String },
    MissingReference { reference: PathBuf },
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyOutcome {
    pub file: PathBuf,
    pub algorithm: Algorithm,
    #[serde(flatten)]
    pub status: VerifyStatus,
}

impl VerifyOutcome {
    pub fn is_ok(&self) -> bool {
        self.status == VerifyStatus::Ok
    }
}

fn as_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u128(duration.as_millis())
}

/// Runs a fixed set of digesters over batches of files
pub struct DigestRunner {
    digesters: Vec<Arc<dyn Digester>>,
}

impl DigestRunner {
    /// Resolve `algorithms` through `registry`
    ///
    /// Fails on the first unsupported name. Repeated algorithms (in any
    /// spelling) are digested once.
    pub fn new(registry: &DigesterRegistry, algorithms: &[String]) -> Result<Self> {
        if algorithms.is_empty() {
            anyhow::bail!("At least one checksum algorithm must be specified");
        }

        let mut digesters: Vec<Arc<dyn Digester>> = Vec::with_capacity(algorithms.len());
        for name in algorithms {
            let digester = registry.get_digester(name)?;
            if digesters.iter().all(|d| d.kind() != digester.kind()) {
                digesters.push(digester);
            }
        }
        log::debug!(
            "Resolved algorithms: {:?}",
            digesters.iter().map(|d| d.algorithm()).collect::<Vec<_>>()
        );

        Ok(Self { digesters })
    }

    /// Algorithms in the order they were requested
    pub fn algorithms(&self) -> Vec<Algorithm> {
        self.digesters.iter().map(|d| d.kind()).collect()
    }

    /// Digest every file with every algorithm, optionally writing reference files
    ///
    /// Output order matches `files`. Every file is processed before this
    /// returns; if any failed, the first failure in input order is returned.
    pub async fn calc(&self, files: &[PathBuf], write_references: bool) -> Result<Vec<FileDigests>> {
        let handles: Vec<_> = files
            .iter()
            .cloned()
            .map(|file| {
                let digesters = self.digesters.clone();
                tokio::task::spawn_blocking(move || {
                    calc_file(&file, &digesters, write_references)
                        .with_context(|| format!("Failed to digest {}", file.display()))
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            outcomes.push(handle.await.context("Digest task panicked")?);
        }
        outcomes.into_iter().collect()
    }

    /// Check every file against its reference file for every algorithm
    ///
    /// Individual failures are reported as outcomes, never as an `Err`.
    pub async fn verify(&self, files: &[PathBuf]) -> Result<Vec<VerifyOutcome>> {
        let handles: Vec<_> = files
            .iter()
            .cloned()
            .map(|file| {
                let digesters = self.digesters.clone();
                tokio::task::spawn_blocking(move || {
                    digesters
                        .iter()
                        .map(|digester| verify_file(&file, digester.as_ref()))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.extend(handle.await.context("Verify task panicked")?);
        }
        Ok(outcomes)
    }
}

fn calc_file(
    file: &Path,
    digesters: &[Arc<dyn Digester>],
    write_references: bool,
) -> checksum_core::Result<FileDigests> {
    let start = Instant::now();
    let size = std::fs::metadata(file)
        .map_err(|e| checksum_core::error::IoError::from_std(e).with_path(file))?
        .len();

    let mut digests = BTreeMap::new();
    let mut references = Vec::new();
    for digester in digesters {
        let digest = if write_references {
            let (digest, path) = reference::calc_and_write(file, digester.as_ref())?;
            references.push(path);
            digest
        } else {
            digester.calc(file)?
        };
        digests.insert(digester.kind(), digest);
    }

    Ok(FileDigests {
        file: file.to_path_buf(),
        size,
        digests,
        references,
        processing_time: start.elapsed(),
    })
}

fn verify_file(file: &Path, digester: &dyn Digester) -> VerifyOutcome {
    let reference_path = reference::reference_path(file, digester);
    let status = match reference::read_reference(file, digester) {
        Err(Error::Digester(DigesterError::Io(io))) if io.kind == IoErrorKind::FileNotFound => {
            VerifyStatus::MissingReference {
                reference: reference_path,
            }
        }
        Err(e) => VerifyStatus::Failed {
            message: e.to_string(),
        },
        Ok(expected) => match digester.verify(file, &expected) {
            Ok(()) => VerifyStatus::Ok,
            Err(Error::Digester(DigesterError::Mismatch {
                expected, actual, ..
            })) => VerifyStatus::Mismatch { expected, actual },
            Err(e) => VerifyStatus::Failed {
                message: e.to_string(),
            },
        },
    };

    if status != VerifyStatus::Ok {
        log::debug!("{} {}: {status:?}", digester.algorithm(), file.display());
    }

    VerifyOutcome {
        file: file.to_path_buf(),
        algorithm: digester.kind(),
        status,
    }
}
