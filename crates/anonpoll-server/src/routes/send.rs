use anonpoll_application::SendOutcome;
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::{SharedState, page, refusal};
use crate::error::AppError;
use crate::render::Notice;

#[derive(Deserialize)]
pub struct SendForm {
    sid: String,
    /// Present only when the checkbox is ticked.
    #[serde(default)]
    opt_in: Option<String>,
}

pub async fn send_handler(
    State(state): State<SharedState>,
    Form(form): Form<SendForm>,
) -> Result<Response, AppError> {
    let notices = match state
        .survey
        .send_results(&form.sid, form.opt_in.is_some())
        .await
    {
        Ok(SendOutcome::Sent) => vec![Notice::success(
            "Vielen Dank! Die Ergebnisse wurden per E-Mail versendet.",
        )],
        Ok(SendOutcome::Failed(e)) => vec![
            Notice::error(format!("E-Mail konnte nicht versendet werden: {e}")),
            Notice::info("Prüfe die SMTP-Daten in secret.json oder in den Umgebungsvariablen."),
        ],
        Err(e) => return refusal(&state, &form.sid, e).await,
    };

    let snapshot = state.survey.resume(Some(&form.sid)).await?;
    Ok(page(&state, &snapshot, &notices, None)?.into_response())
}
