//! Mail relay settings.

use serde::{Deserialize, Serialize};

use super::NotificationError;

/// Implicit-TLS submission port.
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// Relay settings as read from the secret store. Every field may be absent.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailSettings {
    #[serde(rename = "SMTP_HOST", default)]
    pub smtp_host: Option<String>,
    #[serde(rename = "SMTP_PORT", default)]
    pub smtp_port: Option<u16>,
    #[serde(rename = "SMTP_USER", default)]
    pub smtp_user: Option<String>,
    #[serde(rename = "SMTP_PASS", default)]
    pub smtp_pass: Option<String>,
    #[serde(rename = "MAIL_TO", default)]
    pub mail_to: Option<String>,
    #[serde(rename = "MAIL_FROM", default)]
    pub mail_from: Option<String>,
}

/// Complete settings, ready for a transport.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedMailSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub to: String,
    pub from: String,
}

impl MailSettings {
    /// Checks that every required field is set.
    ///
    /// Empty strings count as missing. All missing names are reported at
    /// once, in the order `SMTP_HOST`, `SMTP_USER`, `SMTP_PASS`, `MAIL_TO`.
    pub fn resolve(&self) -> Result<ResolvedMailSettings, NotificationError> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        let required = [
            ("SMTP_HOST", present(&self.smtp_host)),
            ("SMTP_USER", present(&self.smtp_user)),
            ("SMTP_PASS", present(&self.smtp_pass)),
            ("MAIL_TO", present(&self.mail_to)),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();

        match required {
            [(_, Some(host)), (_, Some(user)), (_, Some(password)), (_, Some(to))] => {
                Ok(ResolvedMailSettings {
                    host: host.to_string(),
                    port: self.smtp_port.unwrap_or(DEFAULT_SMTP_PORT),
                    user: user.to_string(),
                    password: password.to_string(),
                    to: to.to_string(),
                    from: present(&self.mail_from).unwrap_or(user).to_string(),
                })
            }
            _ => Err(NotificationError::ConfigMissing(missing)),
        }
    }

    /// Fills unset fields from `other`.
    pub fn or(self, other: MailSettings) -> MailSettings {
        MailSettings {
            smtp_host: self.smtp_host.or(other.smtp_host),
            smtp_port: self.smtp_port.or(other.smtp_port),
            smtp_user: self.smtp_user.or(other.smtp_user),
            smtp_pass: self.smtp_pass.or(other.smtp_pass),
            mail_to: self.mail_to.or(other.mail_to),
            mail_from: self.mail_from.or(other.mail_from),
        }
    }
}

impl std::fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailSettings")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_pass", &self.smtp_pass.as_ref().map(|_| "***"))
            .field("mail_to", &self.mail_to)
            .field("mail_from", &self.mail_from)
            .finish()
    }
}

impl std::fmt::Debug for ResolvedMailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedMailSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("to", &self.to)
            .field("from", &self.from)
            .finish()
    }
}
