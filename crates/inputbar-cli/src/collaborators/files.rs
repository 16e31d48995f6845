//! Turning filesystem paths into file candidates.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use inputbar_core::FileRef;

/// Builds a [`FileRef`] from a path on disk.
///
/// The MIME type is sniffed from the file's magic bytes; plain-text formats
/// have no signature and are left without one.
pub fn file_ref_from_path(path: &Path) -> Result<FileRef> {
    let metadata =
        fs::metadata(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if !metadata.is_file() {
        bail!("{} is not a regular file", path.display());
    }

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))?;

    let mut file = FileRef::new(name, metadata.len()).with_path(path);
    if let Ok(Some(kind)) = infer::get_from_path(path) {
        file = file.with_mime_type(kind.mime_type());
    }
    Ok(file)
}
