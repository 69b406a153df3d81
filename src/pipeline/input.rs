//! Document staging: normalise caller input to a validated local file.
//!
//! ## Why stage bytes to a temp file?
//!
//! pdfium requires a file-system path — it cannot stream from a byte buffer.
//! Writing uploaded bytes to a `NamedTempFile` gives us a path pdfium can
//! open while guaranteeing cleanup: the file is deleted when the
//! [`StagedDocument`] drops, on every exit path of a run, even if the
//! process panics mid-pipeline. We validate the PDF magic bytes (`%PDF`)
//! before returning so callers get a meaningful error rather than a pdfium
//! failure several stages later.

use crate::error::AnuvadError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// A document the pipeline may read — either a caller-owned local file or
/// caller-supplied bytes staged to a temporary file.
///
/// Owned by the orchestrator for the duration of one run and dropped at its
/// end; nothing is cached across runs.
pub enum StagedDocument {
    /// Input was already a local file; the caller keeps ownership.
    Local(PathBuf),
    /// Input arrived as bytes; the temp file is deleted when this drops.
    Staged { path: PathBuf, _file: NamedTempFile },
}

impl StagedDocument {
    /// Path to the document regardless of how it was staged.
    pub fn path(&self) -> &Path {
        match self {
            StagedDocument::Local(p) => p,
            StagedDocument::Staged { path, .. } => path,
        }
    }
}

/// Validate a local file: existence, readability, and PDF magic bytes.
pub fn stage_path(path: impl AsRef<Path>) -> Result<StagedDocument, AnuvadError> {
    let path = path.as_ref().to_path_buf();

    if !path.exists() {
        return Err(AnuvadError::FileNotFound { path });
    }

    match std::fs::File::open(&path) {
        Ok(mut f) => {
            use std::io::Read;
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(AnuvadError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(AnuvadError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(AnuvadError::FileNotFound { path });
        }
    }

    debug!("staged local document: {}", path.display());
    Ok(StagedDocument::Local(path))
}

/// Write caller-supplied bytes to a managed temp file after validating the
/// PDF magic bytes.
pub fn stage_bytes(bytes: &[u8]) -> Result<StagedDocument, AnuvadError> {
    if bytes.len() < 4 || &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        let len = bytes.len().min(4);
        magic[..len].copy_from_slice(&bytes[..len]);
        return Err(AnuvadError::NotAPdf {
            path: PathBuf::from("<bytes>"),
            magic,
        });
    }

    let mut file = NamedTempFile::new().map_err(AnuvadError::Staging)?;
    file.write_all(bytes).map_err(AnuvadError::Staging)?;
    file.flush().map_err(AnuvadError::Staging)?;

    let path = file.path().to_path_buf();
    debug!(bytes = bytes.len(), "staged in-memory document: {}", path.display());
    Ok(StagedDocument::Staged { path, _file: file })
}
