//! Output path resolution for file-based builds.

use crate::{BundleResult, PluginMeta};
use std::fs;
use std::path::{Path, PathBuf};

/// Compute the destination path for a file-based build.
///
/// - No requested path: `<current_directory>/<id>-v<version>.mbp`.
/// - Requested path is an existing directory: the canonical filename inside
///   that directory.
/// - Requested path is an existing file: ask `confirm` whether to override.
///   Declining returns `Ok(None)` (abort, no error); confirming deletes the
///   existing file before proceeding.
/// - Anything else: the requested path as given.
///
/// The returned path is always absolute. Buffer-based builds skip this
/// resolver entirely.
pub fn resolve_output(
    requested: Option<&Path>,
    meta: &PluginMeta,
    confirm: impl FnOnce(&str) -> bool,
) -> BundleResult<Option<PathBuf>> {
    let filename = meta.bundle_filename();
    let path = match requested {
        None => std::env::current_dir()?.join(filename),
        Some(dir) if dir.is_dir() => dir.join(filename),
        Some(existing) if existing.exists() => {
            if !confirm(&format!("{} exists, override?", existing.display())) {
                return Ok(None);
            }
            fs::remove_file(existing)?;
            existing.to_path_buf()
        }
        Some(other) => other.to_path_buf(),
    };
    Ok(Some(std::path::absolute(path)?))
}
