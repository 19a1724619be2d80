//! Outbound results notification.
//!
//! Defines the notifier interface and the mail relay settings it needs.

mod settings;

pub use settings::{DEFAULT_SMTP_PORT, MailSettings, ResolvedMailSettings};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// Required relay settings are absent. Raised before any network I/O.
    #[error("Fehlende secrets: {}", .0.join(", "))]
    ConfigMissing(Vec<&'static str>),

    /// A configured address could not be parsed.
    #[error("Invalid mail address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The relay rejected or failed the transmission.
    #[error("Mail transport failed: {0}")]
    Transport(String),
}

impl NotificationError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Missing setting names, empty for other errors.
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Self::ConfigMissing(fields) => fields,
            _ => &[],
        }
    }
}

/// Sends a finished answer bundle to the survey owners.
///
/// Implementations make a single attempt; failures are reported to the
/// caller and never retried.
///
/// # Security Note
///
/// Implementations must not log the message body or relay credentials.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotificationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_missing_message_lists_fields() {
        let err = NotificationError::ConfigMissing(vec!["SMTP_HOST", "MAIL_TO"]);
        assert_eq!(err.to_string(), "Fehlende secrets: SMTP_HOST, MAIL_TO");
        assert_eq!(err.missing_fields(), &["SMTP_HOST", "MAIL_TO"]);
    }
}
