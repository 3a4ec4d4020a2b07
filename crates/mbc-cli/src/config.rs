//! CLI configuration.
//!
//! Read-only registry of management servers: base URLs mapped to access
//! tokens, plus an optional default server. Obtaining and refreshing tokens
//! is out of scope here; this module only consumes what a login flow wrote
//! to `<config_dir>/mbc/config.json`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server to upload to when none is given on the command line.
    #[serde(default)]
    pub default_server: Option<String>,

    /// Server base URL -> access token.
    #[serde(default)]
    pub servers: BTreeMap<String, String>,
}

impl Config {
    /// Location of the config file, if a config directory exists.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mbc").join("config.json"))
    }

    /// Load the config file. A missing file behaves as an empty config.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => Self::parse(&text)
                .with_context(|| format!("invalid config file: {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to read config: {}", path.display()))
            }
        }
    }

    /// Parse config from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse config")
    }

    /// Resolve the upload destination and its access token.
    ///
    /// `server` falls back to the configured default server; the resolved
    /// server must have a token on record.
    pub fn server_token(&self, server: Option<&str>) -> Result<(String, String)> {
        let Some(server) = server.or(self.default_server.as_deref()) else {
            bail!("no server specified and no default server configured");
        };
        match self.servers.get(server) {
            Some(token) => Ok((server.to_string(), token.clone())),
            None => bail!("not logged in to {server}"),
        }
    }
}
