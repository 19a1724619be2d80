//! SMTP delivery of survey results.

use anonpoll_core::notify::{MailSettings, NotificationError, Notifier, ResolvedMailSettings};
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

/// Sends results over an implicit-TLS SMTP relay with login credentials.
///
/// Settings are resolved on every send, so a missing field is reported
/// without opening a connection.
pub struct SmtpNotifier {
    settings: MailSettings,
}

impl SmtpNotifier {
    pub fn new(settings: MailSettings) -> Self {
        Self { settings }
    }

    fn build_message(
        settings: &ResolvedMailSettings,
        subject: &str,
        body: &str,
    ) -> Result<Message, NotificationError> {
        Message::builder()
            .from(parse_mailbox(&settings.from)?)
            .to(parse_mailbox(&settings.to)?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| NotificationError::transport(e.to_string()))
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotificationError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| NotificationError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotificationError> {
        let settings = self.settings.resolve()?;
        let message = Self::build_message(&settings, subject, body)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
            .map_err(|e| NotificationError::transport(e.to_string()))?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.user.clone(),
                settings.password.clone(),
            ))
            .build();

        match transport.send(message).await {
            Ok(_) => {
                info!(host = %settings.host, port = settings.port, "results mail sent");
                Ok(())
            }
            Err(e) => {
                warn!(
                    host = %settings.host,
                    port = settings.port,
                    error = %e,
                    "results mail failed"
                );
                Err(NotificationError::transport(e.to_string()))
            }
        }
    }
}
