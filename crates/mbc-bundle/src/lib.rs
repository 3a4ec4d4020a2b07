//! Plugin bundle format for maubot-style plugins
//!
//! This crate provides the build pipeline for `.mbp` (maubot plugin) bundles -
//! compressed archives containing a plugin's metadata, source modules, and
//! extra resource files, consumable by the host runtime.
//!
//! # Bundle Structure
//!
//! ```text
//! echo-v1.0.0.mbp
//! ├── maubot.yaml                # re-rendered plugin metadata, always first
//! ├── echo.py                    # single-file module
//! ├── helpers/
//! │   ├── __init__.py            # directory-package module
//! │   └── matching.py
//! └── res/template.html          # extra file matched by a glob pattern
//! ```
//!
//! # Example
//!
//! ```no_run
//! use mbc_bundle::{resolve, BuildTarget, BundleBuilder, PluginMeta};
//! use std::path::Path;
//!
//! let root = Path::new("/home/user/echo");
//! let meta = PluginMeta::load(root)?;
//! let resolution = resolve(root, &meta);
//!
//! let mut builder = BundleBuilder::new(meta);
//! builder.add_resources(&resolution.resources)?;
//!
//! let mut target = BuildTarget::File("/tmp/echo-v1.0.0.mbp".into());
//! builder.write(&mut target)?;
//! # Ok::<(), mbc_bundle::BundleError>(())
//! ```

mod error;
mod meta;

pub mod builder;
pub mod output;
pub mod reader;
pub mod resolver;

pub use builder::{BuildTarget, BundleBuilder};
pub use error::BundleError;
pub use meta::PluginMeta;
pub use output::resolve_output;
pub use reader::BundleReader;
pub use resolver::{resolve, ResolvedResource, Resolution, ResolveWarning};

/// Result type for bundle operations.
pub type BundleResult<T> = Result<T, BundleError>;

/// Bundle file extension.
pub const BUNDLE_EXTENSION: &str = "mbp";

/// Metadata file name, both in the project root and within the bundle.
pub const META_FILE: &str = "maubot.yaml";

/// Source file extension for single-file modules.
pub const MODULE_EXTENSION: &str = "py";

/// Initializer file a directory must contain to count as a package module.
pub const INIT_FILE: &str = "__init__.py";
