//! Plugin metadata schema.
//!
//! The metadata file (`maubot.yaml`) in the project root names the plugin's
//! identity, version, and constituent resources. It is parsed once per build
//! and never mutated afterwards.

use crate::{BundleError, BundleResult, BUNDLE_EXTENSION, META_FILE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Plugin metadata - the authoritative description of a buildable plugin.
///
/// Corresponds to the `maubot.yaml` file in the project root and the first
/// entry of a built bundle. Keys this crate does not care about
/// (`main_class`, `license`, ...) are preserved verbatim through a
/// load/render round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginMeta {
    /// Stable unique identifier (e.g. "xyz.maubot.echo").
    pub id: String,

    /// Plugin version (semver-like, e.g. "1.0.0").
    pub version: String,

    /// Source modules to embed, in order. Each names either a single
    /// `<name>.py` file or a directory package containing `__init__.py`.
    #[serde(default)]
    pub modules: Vec<String>,

    /// Glob patterns for additional files to embed verbatim, relative to
    /// the project root.
    #[serde(default)]
    pub extra_files: Vec<String>,

    /// All other metadata keys, preserved as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl PluginMeta {
    /// Load and validate metadata from a project directory.
    ///
    /// Reads `<project_root>/maubot.yaml`. Fails with
    /// [`BundleError::MetaNotFound`] when the file is absent,
    /// [`BundleError::MetaSyntax`] when it is not valid YAML, and
    /// [`BundleError::InvalidMeta`] when it violates the metadata shape.
    pub fn load(project_root: &Path) -> BundleResult<Self> {
        let path = project_root.join(META_FILE);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BundleError::MetaNotFound(path));
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&text)
    }

    /// Parse and validate metadata from YAML text.
    ///
    /// Stateless counterpart to [`PluginMeta::render`].
    pub fn parse(text: &str) -> BundleResult<Self> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(BundleError::MetaSyntax)?;
        let meta: Self =
            serde_yaml::from_value(value).map_err(|e| BundleError::InvalidMeta(e.to_string()))?;
        meta.validate()?;
        Ok(meta)
    }

    /// Render the metadata back to YAML text.
    pub fn render(&self) -> BundleResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the metadata shape.
    pub fn validate(&self) -> BundleResult<()> {
        if self.id.is_empty() {
            return Err(BundleError::InvalidMeta("id must not be empty".to_string()));
        }

        if let Some(bad) = self
            .id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')))
        {
            return Err(BundleError::InvalidMeta(format!(
                "id contains invalid character {bad:?}"
            )));
        }

        if self.version.is_empty() {
            return Err(BundleError::InvalidMeta(
                "version must not be empty".to_string(),
            ));
        }

        // Basic semver shape check
        if !self.version.contains('.') {
            return Err(BundleError::InvalidMeta(format!(
                "version {:?} should be in semver format (e.g. 1.0.0)",
                self.version
            )));
        }

        Ok(())
    }

    /// Canonical output filename: `<id>-v<version>.mbp`.
    #[must_use]
    pub fn bundle_filename(&self) -> String {
        format!("{}-v{}.{BUNDLE_EXTENSION}", self.id, self.version)
    }
}
