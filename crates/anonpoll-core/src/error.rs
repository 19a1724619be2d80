//! Error types for anonpoll.

use thiserror::Error;

/// Shared error type for the survey domain.
///
/// Storage problems are mostly swallowed at the store boundary (see
/// [`crate::avatar::AvatarStore`]); the variants that do surface are either
/// integration errors (`InvalidToken`) or user-facing refusals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// The requested token is not part of the avatar catalog.
    #[error("Unknown avatar token '{0}'")]
    InvalidToken(String),

    /// The session already holds a reservation and cannot change its avatar.
    #[error("Avatar '{reserved}' is already reserved for this session")]
    SelectionLocked { reserved: String },

    /// Claim file could not be read or parsed.
    #[error("Claim storage malformed: {0}")]
    StorageReadMalformed(String),

    /// Claim file could not be written.
    #[error("Claim storage write failed: {0}")]
    StorageWriteFailed(String),

    /// The single-writer lock could not be acquired.
    #[error("Lock error: {0}")]
    Lock(String),

    /// Unknown question identifier.
    #[error("Unknown question '{0}'")]
    UnknownQuestion(String),

    /// Option index outside the question's option list.
    #[error("Question '{question}' has no option #{index}")]
    InvalidOption {
        question: &'static str,
        index: usize,
    },

    /// More options selected than the question allows.
    #[error("Question '{question}' allows at most {max} answers")]
    TooManyOptions { question: &'static str, max: usize },

    /// Send requested without opt-in or without a reserved avatar.
    #[error("Sending requires opt-in and a reserved avatar")]
    SendNotAllowed,

    /// No live session with the given id.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PollError {
    pub fn invalid_token(token: impl Into<String>) -> Self {
        Self::InvalidToken(token.into())
    }

    pub fn write_failed(message: impl Into<String>) -> Self {
        Self::StorageWriteFailed(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// True for errors caused by the caller's input rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidToken(_)
                | Self::SelectionLocked { .. }
                | Self::UnknownQuestion(_)
                | Self::InvalidOption { .. }
                | Self::TooManyOptions { .. }
                | Self::SendNotAllowed
        )
    }

    pub fn is_session_not_found(&self) -> bool {
        matches!(self, Self::SessionNotFound(_))
    }
}

impl From<std::io::Error> for PollError {
    fn from(err: std::io::Error) -> Self {
        Self::StorageWriteFailed(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for PollError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PollError>`.
pub type Result<T> = std::result::Result<T, PollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(PollError::invalid_token("x").is_client_error());
        assert!(PollError::SendNotAllowed.is_client_error());
        assert!(!PollError::write_failed("disk full").is_client_error());
        assert!(!PollError::internal("boom").is_client_error());
    }

    #[test]
    fn test_io_error_maps_to_write_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: PollError = io.into();
        assert!(matches!(err, PollError::StorageWriteFailed(msg) if msg.contains("read-only")));
    }
}
