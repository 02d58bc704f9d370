//! Configuration module
//!
//! TOML file at `--config` / `KEG_CONFIG`, falling back to the platform
//! config directory (`~/.config/keg/config.toml` on Linux).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Name of the keg used when nothing else selects one
    #[serde(default)]
    pub current: Option<String>,

    /// Known kegs, name -> directory (`~` is expanded)
    #[serde(default)]
    pub kegs: BTreeMap<String, String>,

    #[serde(default)]
    pub latest: LatestConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub publish: PublishConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestConfig {
    /// Entries shown by `keg latest` without a count
    #[serde(default = "default_latest_count")]
    pub default_count: usize,
}

impl Default for LatestConfig {
    fn default() -> Self {
        Self {
            default_count: default_latest_count(),
        }
    }
}

fn default_latest_count() -> usize {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EditorConfig {
    /// Editor command; `$VISUAL` then `$EDITOR` when unset
    #[serde(default)]
    pub command: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Commit dex changes when the keg is a git repository
    #[serde(default = "default_publish_enabled")]
    pub enabled: bool,

    /// Commit message
    #[serde(default = "default_publish_message")]
    pub message: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            enabled: default_publish_enabled(),
            message: default_publish_message(),
        }
    }
}

fn default_publish_enabled() -> bool {
    true
}

fn default_publish_message() -> String {
    "update dex".to_string()
}

impl Config {
    /// Load config from `path`, or from the default location.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = Self::resolve_path(path) else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Config file in effect: `explicit` if given, else the platform path
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit.map(Path::to_path_buf).or_else(Self::default_path)
    }

    /// Platform config path (`<config dir>/keg/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "keg").map(|d| d.config_dir().join("config.toml"))
    }

    /// Directory of the keg registered as `name`
    pub fn keg_path(&self, name: &str) -> Option<PathBuf> {
        let raw = self.kegs.get(name)?.trim();
        if raw.is_empty() || raw == "null" {
            return None;
        }
        Some(expand_tilde(raw))
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf());
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
