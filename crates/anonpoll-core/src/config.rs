use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root of `config.toml`. Every section is optional.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RootConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8501".to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StorageSettings {
    /// Claim file location. Relative paths resolve against the working
    /// directory; unset means `used_avatars.json` in the data directory.
    #[serde(default)]
    pub claims_file: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Idle tabs are forgotten after this many minutes.
    #[serde(default = "default_idle_minutes")]
    pub idle_minutes: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            idle_minutes: default_idle_minutes(),
        }
    }
}

fn default_idle_minutes() -> u64 {
    120
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct LoggingSettings {
    /// Directory for the rolling log file. Unset means the config `logs/` dir.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.session.idle_minutes, 120);
        assert_eq!(config.server.bind, "127.0.0.1:8501");
    }

    #[test]
    fn test_partial_sections() {
        let config: RootConfig = toml::from_str(
            r#"
            [server]
            bind = "0.0.0.0:9000"

            [storage]
            claims_file = "/var/lib/anonpoll/used_avatars.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(
            config.storage.claims_file,
            Some(PathBuf::from("/var/lib/anonpoll/used_avatars.json"))
        );
        assert_eq!(config.session.idle_minutes, 120);
    }
}
