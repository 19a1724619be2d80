use anonpoll_core::PollError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed form: {0}")]
    MalformedForm(String),

    #[error(transparent)]
    Poll(#[from] PollError),

    #[error("Rendering failed: {0}")]
    Render(#[from] minijinja::Error),
}

impl AppError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedForm(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedForm(_) => StatusCode::BAD_REQUEST,
            AppError::Poll(e) if e.is_session_not_found() => StatusCode::NOT_FOUND,
            AppError::Poll(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::Poll(_) | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, self.to_string()).into_response()
    }
}

/// German text for refusals shown on the page.
pub fn user_message(error: &PollError) -> String {
    match error {
        PollError::InvalidToken(token) => format!("„{token}“ ist kein Avatar dieser Umfrage."),
        PollError::SelectionLocked { reserved } => {
            format!(
                "Du hast bereits {reserved} reserviert. Der Avatar kann nicht mehr gewechselt werden."
            )
        }
        PollError::InvalidOption { .. } | PollError::UnknownQuestion(_) => {
            "Die Antwort passt nicht zu den Fragen dieser Umfrage.".to_string()
        }
        PollError::TooManyOptions { max, .. } => {
            format!(
                "Bitte höchstens {max} Antworten auswählen. Die Änderung wurde nicht übernommen."
            )
        }
        PollError::SendNotAllowed => {
            "Zum Senden bitte zuerst einen Avatar reservieren und dem Versand zustimmen."
                .to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(PollError::SessionNotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(PollError::invalid_token("🦊")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(PollError::internal("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_user_message_names_limit() {
        let message = user_message(&PollError::TooManyOptions {
            question: "topics",
            max: 4,
        });
        assert!(message.contains("höchstens 4"));
    }
}
