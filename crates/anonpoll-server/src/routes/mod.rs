//! HTTP handlers. Every handler answers with the full page re-rendered
//! from a fresh read of the claim file.

mod answers;
mod avatar;
mod page;
mod send;

pub use answers::answers_handler;
pub use avatar::{pick_handler, reserve_handler};
pub use page::{health_handler, index_handler, survey_handler};
pub use send::send_handler;

use std::sync::Arc;

use anonpoll_application::SessionSnapshot;
use anonpoll_core::PollError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::error::{AppError, user_message};
use crate::render::Notice;
use crate::state::AppState;

pub type SharedState = Arc<AppState>;

fn page(
    state: &AppState,
    snapshot: &SessionSnapshot,
    notices: &[Notice],
    preview: Option<&str>,
) -> Result<Html<String>, AppError> {
    Ok(Html(state.pages.render(snapshot, notices, preview)?))
}

/// Client errors re-render the session's page with the reason; anything
/// else becomes a plain error response.
async fn refusal(state: &AppState, sid: &str, error: PollError) -> Result<Response, AppError> {
    if !error.is_client_error() {
        return Err(error.into());
    }
    let snapshot = state.survey.resume(Some(sid)).await?;
    let notices = [Notice::error(user_message(&error))];
    let html = page(state, &snapshot, &notices, None)?;
    Ok((StatusCode::BAD_REQUEST, html).into_response())
}
