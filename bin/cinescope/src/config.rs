//! Client-side configuration.
//!
//! Reads/writes `~/.cinescope/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Client configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server URL (e.g. "http://localhost:5000").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,
}

impl ClientConfig {
    /// Default config file path: ~/.cinescope/config.toml.
    pub fn default_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Load config from disk, or return default if the file doesn't
    /// exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Server URL or an actionable error.
    pub fn require_server(&self) -> anyhow::Result<&str> {
        if self.server.is_empty() {
            anyhow::bail!("No server URL set. Run `cinescope server <url>`.");
        }
        Ok(&self.server)
    }
}

/// The CineScope client directory (~/.cinescope).
pub fn config_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".cinescope")
}

/// Session file co-located with the config file.
pub fn session_path_for(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) => parent.join("session.toml"),
        None => PathBuf::from("session.toml"),
    }
}
