//! Bundle reading utilities.
//!
//! The [`BundleReader`] opens an existing `.mbp` archive, parses and
//! validates its metadata entry, and gives access to the remaining entries.
//! Used for inspection and for verifying a bundle before upload.

use crate::{BundleError, BundleResult, PluginMeta, META_FILE};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Reader for plugin bundles.
///
/// # Example
///
/// ```no_run
/// use mbc_bundle::BundleReader;
///
/// let mut reader = BundleReader::open("echo-v1.0.mbp")?;
/// println!("{} v{}", reader.meta().id, reader.meta().version);
/// let source = reader.read_entry_string("echo.py")?;
/// # Ok::<(), mbc_bundle::BundleError>(())
/// ```
#[derive(Debug)]
pub struct BundleReader {
    archive: ZipArchive<File>,
    meta: PluginMeta,
}

impl BundleReader {
    /// Open a bundle file and parse its metadata entry.
    pub fn open<P: AsRef<Path>>(path: P) -> BundleResult<Self> {
        let file = File::open(path.as_ref())?;
        let mut archive = ZipArchive::new(file)?;

        let meta = {
            let mut meta_entry = archive
                .by_name(META_FILE)
                .map_err(|_| BundleError::MissingEntry(META_FILE.to_string()))?;
            let mut yaml = String::new();
            meta_entry.read_to_string(&mut yaml)?;
            PluginMeta::parse(&yaml)?
        };

        Ok(Self { archive, meta })
    }

    /// Get the bundle metadata.
    #[must_use]
    pub fn meta(&self) -> &PluginMeta {
        &self.meta
    }

    /// Read an entry from the bundle as bytes.
    pub fn read_entry(&mut self, path: &str) -> BundleResult<Vec<u8>> {
        let mut entry = self
            .archive
            .by_name(path)
            .map_err(|_| BundleError::MissingEntry(path.to_string()))?;

        let mut contents = Vec::new();
        entry.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// Read an entry from the bundle as a string.
    pub fn read_entry_string(&mut self, path: &str) -> BundleResult<String> {
        let mut entry = self
            .archive
            .by_name(path)
            .map_err(|_| BundleError::MissingEntry(path.to_string()))?;

        let mut contents = String::new();
        entry.read_to_string(&mut contents)?;
        Ok(contents)
    }

    /// List all entries in the bundle, in archive order.
    #[must_use]
    pub fn list_entries(&self) -> Vec<String> {
        (0..self.archive.len())
            .filter_map(|i| self.archive.name_for_index(i).map(String::from))
            .collect()
    }

    /// Check if an entry exists in the bundle.
    #[must_use]
    pub fn has_entry(&self, path: &str) -> bool {
        self.archive.index_for_name(path).is_some()
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::builder::{BuildTarget, BundleBuilder};
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample_meta() -> PluginMeta {
        PluginMeta::parse("id: test.plugin\nversion: 1.0.0\nmodules: [echo]\nmain_class: Echo\n")
            .unwrap()
    }

    fn create_test_bundle(temp_dir: &TempDir) -> PathBuf {
        let bundle_path = temp_dir.path().join("test.mbp");
        let mut builder = BundleBuilder::new(sample_meta());
        builder.add_bytes("echo.py", b"bot = 1".to_vec());

        let mut target = BuildTarget::File(bundle_path.clone());
        builder.write(&mut target).unwrap();
        bundle_path
    }

    #[test]
    fn BundleReader___open___reads_meta() {
        let temp_dir = TempDir::new().unwrap();
        let bundle_path = create_test_bundle(&temp_dir);

        let reader = BundleReader::open(&bundle_path).unwrap();

        assert_eq!(reader.meta(), &sample_meta());
    }

    #[test]
    fn BundleReader___open___nonexistent_file___returns_error() {
        let result = BundleReader::open("/nonexistent/bundle.mbp");

        assert!(matches!(result, Err(BundleError::Io(_))));
    }

    #[test]
    fn BundleReader___open___not_a_zip___returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let fake = temp_dir.path().join("fake.mbp");
        fs::write(&fake, b"not a zip file").unwrap();

        let result = BundleReader::open(&fake);

        assert!(matches!(result, Err(BundleError::Zip(_))));
    }

    #[test]
    fn BundleReader___open___missing_meta_entry___returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let bundle_path = temp_dir.path().join("no-meta.mbp");

        let file = File::create(&bundle_path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("some-file.txt", options).unwrap();
        zip.write_all(b"content").unwrap();
        zip.finish().unwrap();

        let result = BundleReader::open(&bundle_path);

        let err = result.unwrap_err();
        assert!(matches!(err, BundleError::MissingEntry(_)));
        assert!(err.to_string().contains(META_FILE));
    }

    #[test]
    fn BundleReader___open___invalid_meta_yaml___returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let bundle_path = temp_dir.path().join("bad-meta.mbp");

        let file = File::create(&bundle_path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(META_FILE, options).unwrap();
        zip.write_all(b"id: [unclosed").unwrap();
        zip.finish().unwrap();

        let result = BundleReader::open(&bundle_path);

        assert!(matches!(result, Err(BundleError::MetaSyntax(_))));
    }

    #[test]
    fn BundleReader___list_entries___returns_all_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let bundle_path = create_test_bundle(&temp_dir);

        let reader = BundleReader::open(&bundle_path).unwrap();

        assert_eq!(reader.list_entries(), vec![META_FILE, "echo.py"]);
    }

    #[test]
    fn BundleReader___has_entry___matches_contents() {
        let temp_dir = TempDir::new().unwrap();
        let bundle_path = create_test_bundle(&temp_dir);

        let reader = BundleReader::open(&bundle_path).unwrap();

        assert!(reader.has_entry("echo.py"));
        assert!(!reader.has_entry("ghost.py"));
    }

    #[test]
    fn BundleReader___read_entry___returns_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let bundle_path = create_test_bundle(&temp_dir);

        let mut reader = BundleReader::open(&bundle_path).unwrap();

        assert_eq!(reader.read_entry("echo.py").unwrap(), b"bot = 1");
        assert_eq!(reader.read_entry_string("echo.py").unwrap(), "bot = 1");
    }

    #[test]
    fn BundleReader___read_entry___missing___returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let bundle_path = create_test_bundle(&temp_dir);

        let mut reader = BundleReader::open(&bundle_path).unwrap();
        let result = reader.read_entry("ghost.py");

        assert!(matches!(result, Err(BundleError::MissingEntry(_))));
    }
}
