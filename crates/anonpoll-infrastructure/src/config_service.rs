//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` (by default
//! `~/.config/anonpoll/config.toml`). A missing file yields defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anonpoll_core::config::RootConfig;
use anyhow::{Context, Result};
use tracing::debug;

use crate::paths::PollPaths;

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses `path` when given, otherwise the default config location.
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => PollPaths::config_file()?,
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<RootConfig> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(RootConfig::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config file: {:?}", self.path))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", self.path))
    }

    /// Claim file path: configured value, or the data directory default.
    pub fn claims_file(&self, config: &RootConfig) -> Result<PathBuf> {
        match &config.storage.claims_file {
            Some(path) => Ok(path.clone()),
            None => Ok(PollPaths::claims_file()?),
        }
    }

    /// Log directory: configured value, or the config `logs/` directory.
    pub fn logs_dir(&self, config: &RootConfig) -> Result<PathBuf> {
        match &config.logging.directory {
            Some(path) => Ok(path.clone()),
            None => Ok(PollPaths::logs_dir()?),
        }
    }
}
