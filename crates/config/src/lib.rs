#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for the snapd directory layout
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (/etc/snapd/dirs.toml)
//! - Environment variables

use serde::{Deserialize, Serialize};
use snapd_errors::{ConfigError, Error};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub mod constants;

pub use constants::{DEFAULT_CONFIG_PATH, HOMEDIRS_ENV, ROOT_DIR_ENV};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub root: RootConfig,

    #[serde(default)]
    pub homedirs: HomeDirsConfig,
}

/// Root directory configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RootConfig {
    /// Alternative root for chroot, image building and tests
    pub root_dir: Option<PathBuf>,
}

/// Home directory configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HomeDirsConfig {
    /// Comma separated list of home directories, `/home` is always added
    #[serde(default)]
    pub homedirs: String,
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        debug!(path = %path.display(), "loaded dirs configuration");

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Path::new(DEFAULT_CONFIG_PATH);

        if fs::try_exists(config_path).await.unwrap_or(false) {
            Self::load_from_file(config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// An empty `SNAPPY_GLOBAL_ROOT` clears any configured root.
    ///
    /// # Errors
    ///
    /// Returns an error if the root override is not an absolute path.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // SNAPPY_GLOBAL_ROOT
        if let Ok(root) = std::env::var(ROOT_DIR_ENV) {
            if root.is_empty() {
                self.root.root_dir = None;
            } else if Path::new(&root).is_absolute() {
                self.root.root_dir = Some(PathBuf::from(root));
            } else {
                return Err(ConfigError::InvalidValue {
                    field: ROOT_DIR_ENV.to_string(),
                    value: root,
                }
                .into());
            }
        }

        // SNAPD_HOMEDIRS
        if let Ok(homedirs) = std::env::var(HOMEDIRS_ENV) {
            self.homedirs.homedirs = homedirs;
        }

        Ok(())
    }

    /// Get the root directory (with default)
    #[must_use]
    pub fn root_dir(&self) -> PathBuf {
        self.root
            .root_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.root_dir(), PathBuf::from("/"));
        assert!(config.homedirs.homedirs.is_empty());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str("[homedirs]\nhomedirs = \"/srv/home\"\n").unwrap();
        assert_eq!(config.homedirs.homedirs, "/srv/home");
        assert_eq!(config.root.root_dir, None);
    }
}
