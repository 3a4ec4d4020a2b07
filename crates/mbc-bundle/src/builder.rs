//! Bundle creation utilities.
//!
//! The [`BundleBuilder`] assembles plugin metadata and resolved resources
//! into a `.mbp` archive, written either to a file or to an in-memory
//! buffer via [`BuildTarget`].

use crate::{BundleResult, PluginMeta, ResolvedResource, META_FILE};
use std::fs::{self, File};
use std::io::{Cursor, Seek, Write};
use std::path::PathBuf;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Destination of a bundle build. Exactly one variant is active per build.
///
/// A `File` target is created only after output-path conflict resolution has
/// succeeded; the file persists after the build as the final artifact. A
/// `Buffer` target holds the archive transiently, e.g. for an upload that
/// never touches disk. The builder leaves the buffer's position at the end,
/// so readers must rewind it first.
#[derive(Debug)]
pub enum BuildTarget {
    /// Write the bundle to this path, replacing any prior contents.
    File(PathBuf),
    /// Write the bundle into an owned in-memory byte sink.
    Buffer(Cursor<Vec<u8>>),
}

impl BuildTarget {
    /// Create an empty in-memory target.
    #[must_use]
    pub fn buffer() -> Self {
        Self::Buffer(Cursor::new(Vec::new()))
    }
}

/// Builder for plugin bundles.
///
/// # Example
///
/// ```no_run
/// use mbc_bundle::{BuildTarget, BundleBuilder, PluginMeta};
///
/// let meta = PluginMeta::parse("id: echo\nversion: 1.0.0\n")?;
/// let mut builder = BundleBuilder::new(meta);
/// builder.add_bytes("echo.py", b"bot = 1".to_vec());
///
/// let mut target = BuildTarget::File("echo-v1.0.0.mbp".into());
/// builder.write(&mut target)?;
/// # Ok::<(), mbc_bundle::BundleError>(())
/// ```
pub struct BundleBuilder {
    meta: PluginMeta,
    files: Vec<BundleFile>,
}

/// A file to include in the bundle.
struct BundleFile {
    /// Entry path within the bundle archive.
    archive_path: String,
    /// File contents.
    contents: Vec<u8>,
    /// Unix permission bits of the source file, where available.
    mode: Option<u32>,
}

impl BundleBuilder {
    /// Create a new builder for the given metadata.
    #[must_use]
    pub fn new(meta: PluginMeta) -> Self {
        Self {
            meta,
            files: Vec::new(),
        }
    }

    /// Add resolved resources, reading each source file once.
    pub fn add_resources(&mut self, resources: &[ResolvedResource]) -> BundleResult<()> {
        for resource in resources {
            let contents = fs::read(&resource.source_path)?;
            let mode = file_mode(&resource.source_path);
            self.files.push(BundleFile {
                archive_path: resource.archive_path.clone(),
                contents,
                mode,
            });
        }
        Ok(())
    }

    /// Add raw bytes as an entry in the bundle.
    pub fn add_bytes(&mut self, archive_path: &str, contents: Vec<u8>) {
        self.files.push(BundleFile {
            archive_path: archive_path.to_string(),
            contents,
            mode: None,
        });
    }

    /// Write the bundle to the given target.
    ///
    /// The re-rendered metadata is always the first entry, under
    /// `maubot.yaml`; resource entries follow in insertion order, each
    /// stored individually so per-file permissions survive. For a
    /// [`BuildTarget::File`], the file is created or fully replaced in
    /// place.
    pub fn write(self, target: &mut BuildTarget) -> BundleResult<()> {
        self.meta.validate()?;
        match target {
            BuildTarget::File(path) => self.write_to(File::create(path)?),
            BuildTarget::Buffer(buffer) => self.write_to(buffer),
        }
    }

    fn write_to<W: Write + Seek>(self, writer: W) -> BundleResult<()> {
        let mut zip = ZipWriter::new(writer);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let meta_yaml = self.meta.render()?;
        zip.start_file(META_FILE, options)?;
        zip.write_all(meta_yaml.as_bytes())?;

        for file in &self.files {
            let mut entry_options = options;
            if let Some(mode) = file.mode {
                entry_options = entry_options.unix_permissions(mode);
            }
            zip.start_file(&file.archive_path, entry_options)?;
            zip.write_all(&file.contents)?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Get the metadata this builder was created with.
    #[must_use]
    pub fn meta(&self) -> &PluginMeta {
        &self.meta
    }
}

#[cfg(unix)]
fn file_mode(path: &std::path::Path) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).ok().map(|m| m.permissions().mode())
}

#[cfg(not(unix))]
fn file_mode(_path: &std::path::Path) -> Option<u32> {
    None
}
