use anonpoll_core::session::ConfirmOutcome;
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::{SharedState, page, refusal};
use crate::error::AppError;
use crate::render::Notice;

#[derive(Deserialize)]
pub struct AvatarForm {
    sid: String,
    token: String,
}

pub async fn pick_handler(
    State(state): State<SharedState>,
    Form(form): Form<AvatarForm>,
) -> Result<Response, AppError> {
    match state.survey.pick(&form.sid, &form.token).await {
        Ok(snapshot) => {
            let notice = Notice::info(format!(
                "Ausgewählt: {}. Noch nicht reserviert.",
                form.token
            ));
            Ok(page(&state, &snapshot, &[notice], None)?.into_response())
        }
        Err(e) => refusal(&state, &form.sid, e).await,
    }
}

pub async fn reserve_handler(
    State(state): State<SharedState>,
    Form(form): Form<AvatarForm>,
) -> Result<Response, AppError> {
    match state.survey.reserve(&form.sid, &form.token).await {
        Ok((outcome, snapshot)) => {
            let mut notices = Vec::new();
            if outcome != ConfirmOutcome::Unavailable {
                notices.push(Notice::success(format!("Dein Avatar ist: {}", form.token)));
            }
            if let Some(warning) = outcome.warning() {
                notices.push(Notice::warning(warning));
            }
            Ok(page(&state, &snapshot, &notices, None)?.into_response())
        }
        Err(e) => refusal(&state, &form.sid, e).await,
    }
}
