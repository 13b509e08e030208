//! Preference file loading
//!
//! Two knobs: whether commands run through sudo, and the grace period
//! between child exit and the final report. A missing file means defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_GRACE_MS: u64 = 5;

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub use_sudo: bool,
    #[serde(default = "default_grace_ms")]
    pub grace_period_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_sudo: false,
            grace_period_ms: DEFAULT_GRACE_MS,
        }
    }
}

fn default_grace_ms() -> u64 {
    DEFAULT_GRACE_MS
}

/// `~/.config/sysrestart/config.toml` on a stock setup
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sysrestart").join("config.toml"))
}

/// Load and parse the config file; an absent file yields defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        log::debug!("no config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&contents).context("failed to parse TOML config")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.use_sudo);
        assert_eq!(config.grace_period_ms, 5);
    }

    #[test]
    fn parses_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "use_sudo = true\ngrace_period_ms = 50\n").unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.use_sudo);
        assert_eq!(config.grace_period_ms, 50);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "use_sudo = true\n").unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.use_sudo);
        assert_eq!(config.grace_period_ms, 5);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "use_sudo = \"maybe\"\n").unwrap();

        assert!(load_config(&path).is_err());
    }
}
