//! Unified path management for anonpoll files.
//!
//! ```text
//! ~/.config/anonpoll/          # Config directory
//! ├── config.toml              # Application configuration
//! ├── secret.json              # Mail relay credentials
//! └── logs/                    # Rolling server logs
//!     └── anonpoll.log.YYYY-MM-DD
//!
//! ~/.local/share/anonpoll/     # Data directory
//! └── used_avatars.json        # Claimed avatar tokens
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "anonpoll";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct PollPaths;

impl PollPaths {
    /// Platform config directory with `anonpoll` appended.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Platform data directory with `anonpoll` appended.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    pub fn claims_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("used_avatars.json"))
    }

    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}
