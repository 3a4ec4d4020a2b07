//! Upload transport.
//!
//! Sends a built bundle to a management server's plugin upload endpoint.
//! The request is driven to completion on a current-thread runtime, so from
//! the build pipeline's perspective this is a single blocking call. There is
//! no retry: a failed upload is surfaced and the command exits, leaving any
//! file-based artifact on disk.

use anyhow::{bail, Context, Result};
use mbc_bundle::{BundleReader, PluginMeta};
use std::path::Path;

use crate::config::Config;

/// Upload endpoint, relative to the server base URL. `allow_override` lets
/// the server replace an already-installed version of the same plugin.
const UPLOAD_PATH: &str = "/_matrix/maubot/v1/plugins/upload?allow_override=true";

/// Run the upload command: verify an existing bundle, then send it.
pub fn run(path: &Path, server: Option<&str>) -> Result<u8> {
    let reader = BundleReader::open(path)
        .with_context(|| format!("not a valid plugin bundle: {}", path.display()))?;
    let meta = reader.meta().clone();

    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read bundle: {}", path.display()))?;
    upload(bytes, &meta, server)?;
    Ok(0)
}

/// Upload bundle bytes to the resolved server.
pub fn upload(bytes: Vec<u8>, meta: &PluginMeta, server: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let (base_url, token) = config.server_token(server)?;

    println!("Uploading {} v{} to {base_url}", meta.id, meta.version);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start upload runtime")?;
    runtime.block_on(send(bytes, &base_url, &token))?;

    println!("Plugin uploaded successfully.");
    Ok(())
}

async fn send(bytes: Vec<u8>, base_url: &str, token: &str) -> Result<()> {
    let url = format!("{}{UPLOAD_PATH}", base_url.trim_end_matches('/'));
    let client = reqwest::Client::new();

    let response = client
        .post(url)
        .bearer_auth(token)
        .header(reqwest::header::CONTENT_TYPE, "application/zip")
        .body(bytes)
        .send()
        .await
        .context("upload request failed")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("server rejected upload ({status}): {body}");
    }
    Ok(())
}
