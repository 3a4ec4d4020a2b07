//! Build command implementation.
//!
//! Sequences the bundle-build pipeline: load metadata, decide the build
//! target, resolve resources, write the archive, and optionally hand the
//! bytes to the upload transport.

use anyhow::{Context, Result};
use dialoguer::Confirm;
use mbc_bundle::{resolve, resolve_output, BuildTarget, BundleBuilder, PluginMeta};
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use crate::upload;

/// Exit code for a deliberate operator abort (declined override).
pub const EXIT_ABORTED: u8 = 2;

/// Run the build command.
pub fn run(
    path: &Path,
    output: Option<PathBuf>,
    do_upload: bool,
    server: Option<&str>,
) -> Result<u8> {
    run_with(path, output, do_upload, server, prompt_override, upload::upload)
}

/// Build pipeline with the interactive prompt and the upload transport
/// injected, so tests can run it without a terminal or a server.
fn run_with(
    path: &Path,
    output: Option<PathBuf>,
    do_upload: bool,
    server: Option<&str>,
    confirm: impl FnOnce(&str) -> bool,
    uploader: impl FnOnce(Vec<u8>, &PluginMeta, Option<&str>) -> Result<()>,
) -> Result<u8> {
    let project_root = std::path::absolute(path)
        .with_context(|| format!("invalid project path: {}", path.display()))?;

    let meta = PluginMeta::load(&project_root).context("failed to build plugin")?;

    // An empty --output is the same as no --output.
    let output = output.filter(|p| !p.as_os_str().is_empty());

    // A persisted file is produced unless this is an upload-only build.
    let mut target = if output.is_some() || !do_upload {
        match resolve_output(output.as_deref(), &meta, confirm)? {
            Some(path) => BuildTarget::File(path),
            None => {
                println!("Not overwriting existing file, build cancelled.");
                return Ok(EXIT_ABORTED);
            }
        }
    } else {
        BuildTarget::buffer()
    };

    let resolution = resolve(&project_root, &meta);
    for warning in &resolution.warnings {
        eprintln!("Warning: {warning}");
    }

    let mut builder = BundleBuilder::new(meta.clone());
    builder
        .add_resources(&resolution.resources)
        .context("failed to read plugin resources")?;
    builder.write(&mut target).context("failed to write bundle")?;

    match target {
        BuildTarget::File(path) => {
            println!("Plugin built to {}", path.display());
            if do_upload {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("failed to re-read bundle: {}", path.display()))?;
                uploader(bytes, &meta, server)?;
            }
        }
        BuildTarget::Buffer(mut buffer) => {
            // The builder leaves the position at the end of the archive.
            buffer.rewind()?;
            let mut bytes = Vec::new();
            buffer.read_to_end(&mut bytes)?;
            uploader(bytes, &meta, server)?;
        }
    }

    Ok(0)
}

/// Interactive prompt for overriding an existing output file.
///
/// A non-interactive terminal counts as a decline.
fn prompt_override(question: &str) -> bool {
    Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()
        .unwrap_or(false)
}
