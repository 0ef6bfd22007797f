use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::decode::TrimPolicy;
use crate::resolver::ResolverConfig;
use crate::token::AccessToken;
use crate::url_model::DEFAULT_EXTENSIONS;

/// Environment variables consulted for the access token, in priority order.
const TOKEN_ENV_VARS: &[&str] = &["DOCLINK_ACCESS_TOKEN", "SAS_TOKEN"];

/// Global configuration loaded from `~/.config/doclink/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DoclinkConfig {
    /// Query-string credential appended to resolved document URLs (e.g. a SAS token).
    pub access_token: String,
    /// Document extensions recognized when extracting URLs.
    pub extensions: Vec<String>,
    /// Maximum trailing characters dropped while retrying a corrupted reference.
    pub max_trims: u32,
    /// Path prefix of the server-side view endpoint.
    pub view_prefix: String,
    /// Path prefix of the server-side download endpoint.
    pub download_prefix: String,
    /// Include raw/cleaned values in failure notices.
    pub show_diagnostics: bool,
    /// Fire a best-effort HEAD request after each successful resolution.
    pub probe_after_resolve: bool,
}

impl Default for DoclinkConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_trims: TrimPolicy::default().max_trims,
            view_prefix: "/api/view".to_string(),
            download_prefix: "/api/download".to_string(),
            show_diagnostics: false,
            probe_after_resolve: false,
        }
    }
}

impl fmt::Debug for DoclinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoclinkConfig")
            .field("access_token", &AccessToken::new(&self.access_token))
            .field("extensions", &self.extensions)
            .field("max_trims", &self.max_trims)
            .field("view_prefix", &self.view_prefix)
            .field("download_prefix", &self.download_prefix)
            .field("show_diagnostics", &self.show_diagnostics)
            .field("probe_after_resolve", &self.probe_after_resolve)
            .finish()
    }
}

impl DoclinkConfig {
    /// Overrides the access token from the first non-empty variable returned by `lookup`.
    pub fn with_token_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for name in TOKEN_ENV_VARS {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                tracing::debug!("access token taken from ${}", name);
                self.access_token = value;
                break;
            }
        }
        self
    }

    /// Resolver settings derived from this configuration.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            access_token: AccessToken::new(&self.access_token),
            extensions: self.extensions.clone(),
            trim_policy: TrimPolicy::new(self.max_trims),
            view_prefix: self.view_prefix.clone(),
            download_prefix: self.download_prefix.clone(),
            show_diagnostics: self.show_diagnostics,
            probe_after_resolve: self.probe_after_resolve,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("doclink")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<DoclinkConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: DoclinkConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
/// Token environment variables take precedence over the file.
pub fn load_or_init() -> Result<DoclinkConfig> {
    let path = config_path()?;
    let cfg = if path.exists() {
        load_from(&path)?
    } else {
        let default_cfg = DoclinkConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        default_cfg
    };
    Ok(cfg.with_token_overrides(|name| std::env::var(name).ok()))
}
