//! Error types for bundle operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during bundle operations.
#[derive(Debug, Error)]
pub enum BundleError {
    /// Metadata file does not exist in the project root.
    #[error("metadata file not found: {}", .0.display())]
    MetaNotFound(PathBuf),

    /// Metadata file exists but is not parseable YAML.
    #[error("metadata file is not valid YAML: {0}")]
    MetaSyntax(serde_yaml::Error),

    /// Metadata parsed but violates the required shape.
    #[error("invalid plugin metadata: {0}")]
    InvalidMeta(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// YAML serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Missing required entry in a bundle.
    #[error("missing bundle entry: {0}")]
    MissingEntry(String),
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn BundleError___meta_not_found___displays_path() {
        let err = BundleError::MetaNotFound(PathBuf::from("/proj/maubot.yaml"));

        assert_eq!(
            err.to_string(),
            "metadata file not found: /proj/maubot.yaml"
        );
    }

    #[test]
    fn BundleError___invalid_meta___displays_message() {
        let err = BundleError::InvalidMeta("missing field `id`".to_string());

        assert_eq!(err.to_string(), "invalid plugin metadata: missing field `id`");
    }

    #[test]
    fn BundleError___missing_entry___displays_name() {
        let err = BundleError::MissingEntry("maubot.yaml".to_string());

        assert_eq!(err.to_string(), "missing bundle entry: maubot.yaml");
    }

    #[test]
    fn BundleError___from_io_error___converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: BundleError = io_err.into();

        assert!(matches!(err, BundleError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }
}
