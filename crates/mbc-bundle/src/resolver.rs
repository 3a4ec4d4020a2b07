//! Resource resolution.
//!
//! Expands the modules and extra-file glob patterns declared in plugin
//! metadata into the concrete list of files to embed in the bundle. Nothing
//! here is fatal: every problem degrades to a [`ResolveWarning`] plus
//! omission, so a build always proceeds with whatever resources were found.

use crate::{PluginMeta, INIT_FILE, META_FILE, MODULE_EXTENSION};
use std::collections::HashSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// A concrete file mapped to its entry path within the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    /// Entry path within the bundle archive, `/`-separated.
    pub archive_path: String,
    /// Path of the file on disk.
    pub source_path: PathBuf,
}

/// Non-fatal problem encountered while resolving resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    /// A declared module matched neither a source file nor a directory.
    ModuleNotFound { module: String },
    /// A declared directory module lacks its initializer file.
    MissingInit { module: String },
    /// An extra_files entry is not a valid glob pattern.
    InvalidPattern { pattern: String, reason: String },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModuleNotFound { module } => {
                write!(f, "module {module} not found, skipping")
            }
            Self::MissingInit { module } => {
                write!(f, "module {module} is missing {INIT_FILE}, skipping")
            }
            Self::InvalidPattern { pattern, reason } => {
                write!(f, "invalid extra_files pattern {pattern:?}: {reason}")
            }
        }
    }
}

/// Outcome of resource resolution.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Resources to embed, in bundle entry order.
    pub resources: Vec<ResolvedResource>,
    /// Problems encountered along the way.
    pub warnings: Vec<ResolveWarning>,
}

/// Resolve the modules and extra-file patterns of `meta` against
/// `project_root`.
///
/// Modules are resolved in declaration order: a regular file
/// `<root>/<module>.py` wins over a directory package, and a directory
/// package is only included when it contains `__init__.py` (its files are
/// walked in sorted order). Extra-file patterns expand in declaration order
/// with alphabetical match order within each pattern. Entries are
/// deduplicated by archive path, and the metadata entry name is never
/// emitted as a resource.
///
/// Module names and patterns are taken at face value; a pattern that
/// explicitly escapes the project root is honored.
#[must_use]
pub fn resolve(project_root: &Path, meta: &PluginMeta) -> Resolution {
    let mut resolution = Resolution::default();
    // The metadata entry is written separately and must never be duplicated.
    let mut seen: HashSet<String> = HashSet::from([META_FILE.to_string()]);

    for module in &meta.modules {
        let file = project_root.join(format!("{module}.{MODULE_EXTENSION}"));
        let dir = project_root.join(module);

        if file.is_file() {
            push_resource(&mut resolution.resources, &mut seen, project_root, file);
        } else if dir.is_dir() {
            if dir.join(INIT_FILE).is_file() {
                for entry in WalkDir::new(&dir)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(Result::ok)
                    .filter(|e| e.file_type().is_file())
                {
                    push_resource(
                        &mut resolution.resources,
                        &mut seen,
                        project_root,
                        entry.into_path(),
                    );
                }
            } else {
                resolution.warnings.push(ResolveWarning::MissingInit {
                    module: module.clone(),
                });
            }
        } else {
            resolution.warnings.push(ResolveWarning::ModuleNotFound {
                module: module.clone(),
            });
        }
    }

    for pattern in &meta.extra_files {
        // The root is a literal path, not a pattern: escape it so glob
        // metacharacters in directory names match themselves. Absolute
        // patterns stay as written, so escaping patterns work.
        let full_pattern = if Path::new(pattern).is_absolute() {
            pattern.clone()
        } else {
            let root = glob::Pattern::escape(&project_root.to_string_lossy());
            format!("{root}{}{pattern}", std::path::MAIN_SEPARATOR)
        };
        let paths = match glob::glob(&full_pattern) {
            Ok(paths) => paths,
            Err(e) => {
                resolution.warnings.push(ResolveWarning::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.msg.to_string(),
                });
                continue;
            }
        };
        // A pattern matching nothing is silently skipped.
        for path in paths.flatten().filter(|p| p.is_file()) {
            push_resource(&mut resolution.resources, &mut seen, project_root, path);
        }
    }

    resolution
}

fn push_resource(
    resources: &mut Vec<ResolvedResource>,
    seen: &mut HashSet<String>,
    project_root: &Path,
    source_path: PathBuf,
) {
    let archive_path = archive_name(project_root, &source_path);
    if seen.insert(archive_path.clone()) {
        resources.push(ResolvedResource {
            archive_path,
            source_path,
        });
    }
}

/// Entry name for a source file: its path relative to the project root,
/// `/`-separated. A path outside the root keeps its own components, minus
/// any leading root or drive prefix.
fn archive_name(project_root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(project_root).unwrap_or(path);
    relative
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
