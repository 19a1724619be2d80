//! Secret configuration file storage.
//!
//! Loads the mail relay settings from `~/.config/anonpoll/secret.json`,
//! with environment variables of the same names taking precedence.

use crate::paths::PollPaths;
use anonpoll_core::notify::MailSettings;
use std::fs;
use std::path::PathBuf;

/// Errors that can occur during secret storage operations.
#[derive(Debug)]
pub enum SecretStorageError {
    /// Configuration file not found.
    NotFound(PathBuf),
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::NotFound(path) => {
                write!(f, "Secret file not found at: {}", path.display())
            }
            SecretStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SecretStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            SecretStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine home directory")
            }
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::ParseError(e)
    }
}

/// Storage for the secret configuration file (secret.json).
///
/// Read-only. The file should be readable by the service user only
/// (e.g. mode 600); its contents are never logged.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Creates a SecretStorage with the default path (~/.config/anonpoll/secret.json).
    pub fn new() -> Result<Self, SecretStorageError> {
        let path = PollPaths::secret_file().map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a SecretStorage with a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads the mail settings from the JSON file.
    ///
    /// # Returns
    ///
    /// - `Ok(MailSettings)`: Successfully loaded and parsed
    /// - `Err(SecretStorageError::NotFound)`: File doesn't exist
    /// - `Err(SecretStorageError::IoError)`: Failed to read file
    /// - `Err(SecretStorageError::ParseError)`: Invalid JSON format
    pub fn load(&self) -> Result<MailSettings, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let settings = serde_json::from_str(&content)?;

        Ok(settings)
    }

    /// File settings overlaid with process environment variables.
    ///
    /// A missing file is not an error; the notifier reports whatever
    /// required fields are still unset when a send is attempted.
    pub fn load_merged(&self) -> Result<MailSettings, SecretStorageError> {
        self.load_merged_with(|key| std::env::var(key).ok())
    }

    /// Like [`load_merged`](Self::load_merged) with `lookup` in place of
    /// the process environment.
    pub fn load_merged_with<F>(&self, lookup: F) -> Result<MailSettings, SecretStorageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_file = match self.load() {
            Ok(settings) => settings,
            Err(SecretStorageError::NotFound(_)) => MailSettings::default(),
            Err(e) => return Err(e),
        };
        Ok(mail_settings_from(lookup).or(from_file))
    }
}

/// Builds settings from a key lookup (`SMTP_HOST`, `SMTP_PORT`, ...).
///
/// An unparsable `SMTP_PORT` is treated as unset.
pub fn mail_settings_from<F>(lookup: F) -> MailSettings
where
    F: Fn(&str) -> Option<String>,
{
    MailSettings {
        smtp_host: lookup("SMTP_HOST"),
        smtp_port: lookup("SMTP_PORT").and_then(|p| p.trim().parse().ok()),
        smtp_user: lookup("SMTP_USER"),
        smtp_pass: lookup("SMTP_PASS"),
        mail_to: lookup("MAIL_TO"),
        mail_from: lookup("MAIL_FROM"),
    }
}
