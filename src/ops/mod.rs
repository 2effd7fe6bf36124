//! The six conversion operations, one module each.
//!
//! Every operation has the same shape: validate inputs, call into exactly
//! one capability crate, write exactly one output file, return a small
//! stats value for the CLI's status line. Failures propagate as
//! [`ConvertError`](crate::error::ConvertError) — there is no retry or
//! partial-success handling anywhere in this layer.

pub mod docx2pdf;
pub mod img2pdf;
pub mod merge;
pub mod pdf2docx;
pub mod pdf2xlsx;
pub mod split;

use crate::error::ConvertError;
use std::io::Write;
use std::path::Path;

/// Write `bytes` to `path` atomically: stage in a temp file in the same
/// directory, then rename over the target. A failure mid-write leaves the
/// previous output (or nothing) in place, never a torn file.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    let wrap = |source: std::io::Error| ConvertError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir).map_err(wrap)?;
    }

    let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))
        .map_err(wrap)?;
    tmp.write_all(bytes).map_err(wrap)?;
    tmp.persist(path)
        .map_err(|e| wrap(e.error))?;
    Ok(())
}

/// Reject missing input paths with a uniform error.
pub(crate) fn ensure_exists(path: &Path) -> Result<(), ConvertError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ConvertError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}
