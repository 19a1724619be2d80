use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use super::{SharedState, page};
use crate::error::AppError;

#[derive(Deserialize)]
pub struct SurveyQuery {
    sid: Option<String>,
}

pub async fn index_handler(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    let snapshot = state.survey.start_session().await?;
    page(&state, &snapshot, &[], None)
}

/// Unknown or expired ids start a new session instead of failing.
pub async fn survey_handler(
    State(state): State<SharedState>,
    Query(query): Query<SurveyQuery>,
) -> Result<Html<String>, AppError> {
    let snapshot = state.survey.resume(query.sid.as_deref()).await?;
    page(&state, &snapshot, &[], None)
}

pub async fn health_handler() -> &'static str {
    "ok"
}
