//! Configuration loading
//!
//! TOML or JSON configuration with per-section defaults. The shell
//! falls back to defaults on any load failure; a broken config file
//! never prevents the session from starting.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shell session settings
    pub shell: ShellConfig,
    /// Fetch protocol settings
    pub fetch: FetchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shell: ShellConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

/// Session-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Prompt shown when no continuation is pending
    pub prompt: String,
    /// Username reported by `whoami` and used by `passwd`
    pub username: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "mprsh# ".to_string(),
            username: "console".to_string(),
        }
    }
}

/// Fetch protocol settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Port `wget` connects to
    pub port: u16,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { port: 80 }
    }
}

impl Config {
    /// Load from an explicit path; the format follows the extension
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                format: "TOML".to_string(),
                reason: e.to_string(),
            }),
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                    format: "JSON".to_string(),
                    reason: e.to_string(),
                })
            }
            _ => Err(Error::ConfigLoadFailed {
                path: path.to_path_buf(),
                reason: "unsupported config format".to_string(),
            }),
        }
    }

    /// Load from the first config file found in the search paths,
    /// falling back to defaults when none loads.
    pub fn load_or_default() -> Self {
        for path in Self::search_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("configuration loaded from {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("skipping config {}: {}", path.display(), e);
                }
            }
        }
        debug!("no configuration file found, using defaults");
        Self::default()
    }

    /// Candidate config file locations, most specific first
    fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("mprsh").join("config.toml"));
            paths.push(config_dir.join("mprsh").join("config.json"));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".mprsh.toml"));
        }
        paths
    }
}
