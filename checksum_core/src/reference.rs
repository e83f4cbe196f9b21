//! Reference checksum files
//!
//! The checksum of `X` for an algorithm with extension `.ext` is stored as
//! the bare hex digest in a sibling file named `X.ext`, without a trailing
//! newline.

use crate::Result;
use crate::digest::Digester;
use crate::error::IoError;
use log::debug;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the reference file holding the digest of `file`
pub fn reference_path(file: &Path, digester: &dyn Digester) -> PathBuf {
    let mut name = OsString::from(file.as_os_str());
    name.push(digester.filename_extension());
    PathBuf::from(name)
}

/// Write `digest` to the reference file of `file`, returning its path
pub fn write_reference(file: &Path, digester: &dyn Digester, digest: &str) -> Result<PathBuf> {
    let path = reference_path(file, digester);
    fs::write(&path, digest).map_err(|e| IoError::from_std(e).with_path(&path))?;
    debug!("Wrote {} reference {}", digester.algorithm(), path.display());
    Ok(path)
}

/// Read the expected digest of `file` from its reference file
///
/// Trailing whitespace (e.g. a newline added by an editor) is ignored.
pub fn read_reference(file: &Path, digester: &dyn Digester) -> Result<String> {
    let path = reference_path(file, digester);
    let content = fs::read_to_string(&path).map_err(|e| IoError::from_std(e).with_path(&path))?;
    Ok(content.trim_end().to_string())
}

/// Compute the digest of `file` and store it in its reference file
pub fn calc_and_write(file: &Path, digester: &dyn Digester) -> Result<(String, PathBuf)> {
    let digest = digester.calc(file)?;
    let path = write_reference(file, digester, &digest)?;
    Ok((digest, path))
}

/// Verify `file` against the digest stored in its reference file
pub fn verify_reference(file: &Path, digester: &dyn Digester) -> Result<()> {
    let expected = read_reference(file, digester)?;
    digester.verify(file, &expected)
}
