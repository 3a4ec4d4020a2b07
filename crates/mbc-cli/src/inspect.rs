//! Inspect command implementation.

use anyhow::{Context, Result};
use mbc_bundle::BundleReader;
use std::path::Path;

/// Print the metadata and contents of a bundle.
pub fn run(path: &Path) -> Result<u8> {
    let reader = BundleReader::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let meta = reader.meta();

    println!("Plugin: {} v{}", meta.id, meta.version);
    if !meta.modules.is_empty() {
        println!("Modules:");
        for module in &meta.modules {
            println!("  {module}");
        }
    }
    if !meta.extra_files.is_empty() {
        println!("Extra files:");
        for pattern in &meta.extra_files {
            println!("  {pattern}");
        }
    }

    println!("\nEntries:");
    for entry in reader.list_entries() {
        println!("  {entry}");
    }

    Ok(0)
}
