//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Copy a file into `dir`, keeping its file name. Returns the new path.
pub fn copy_into(file: &Path, dir: &Path) -> Result<PathBuf> {
    let Some(name) = file.file_name() else {
        bail!("not a file: {}", file.display());
    };
    if !file.is_file() {
        bail!("not a file: {}", file.display());
    }

    ensure_dir(dir)?;
    let dst = dir.join(name);
    fs::copy(file, &dst)
        .with_context(|| format!("failed to copy {} to {}", file.display(), dst.display()))?;
    Ok(dst)
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}
