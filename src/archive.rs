use eyre::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::utils::ExportError;

/// Resolve `source` to a directory containing the `.json` entry files.
///
/// A directory is used as-is. A ZIP backup is extracted into a fresh
/// directory next to it, named after the archive's stem
/// (`journey-foo.zip` extracts into `journey-foo/`). The extraction
/// directory must not already exist; this tool never overwrites.
pub fn resolve_source(source: &Path) -> Result<PathBuf> {
    if !source.exists() {
        return Err(ExportError::InputNotFound(source.to_path_buf()).into());
    }
    if source.is_dir() {
        return Ok(source.to_path_buf());
    }

    let dest = source.with_extension("");
    if dest.exists() {
        return Err(ExportError::OutputCollision(dest).into());
    }
    extract_archive(source, &dest)?;
    Ok(dest)
}

fn extract_archive(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive_path)
        .wrap_err_with(|| format!("Failed to open archive: {}", archive_path.display()))?;

    let mut archive = zip::ZipArchive::new(file).map_err(|source| ExportError::Archive {
        path: archive_path.to_path_buf(),
        source,
    })?;
    archive.extract(dest).map_err(|source| ExportError::Archive {
        path: archive_path.to_path_buf(),
        source,
    })?;

    Ok(())
}
