use std::collections::HashMap;

use anonpoll_application::AnswerUpdate;
use anonpoll_core::survey::QuestionId;
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Response},
};

use super::{SharedState, page, refusal};
use crate::error::AppError;
use crate::render::Notice;

#[derive(Debug, PartialEq, Eq)]
struct AnswerForm {
    sid: String,
    preview: bool,
    updates: Vec<AnswerUpdate>,
}

/// Parses `sid`, `action`, repeated `<question>=<index>` and
/// `<question>_other` pairs.
///
/// Only questions that appear in the form are updated.
fn parse_answer_form(pairs: Vec<(String, String)>) -> Result<AnswerForm, AppError> {
    let mut sid = None;
    let mut preview = false;
    let mut updates: HashMap<QuestionId, AnswerUpdate> = HashMap::new();

    for (key, value) in pairs {
        match key.as_str() {
            "sid" => sid = Some(value),
            "action" => preview = value == "preview",
            _ => {
                let (name, is_other) = match key.strip_suffix("_other") {
                    Some(name) => (name, true),
                    None => (key.as_str(), false),
                };
                let question: QuestionId = name.parse()?;
                let update = updates.entry(question).or_insert_with(|| AnswerUpdate {
                    question,
                    selected: Vec::new(),
                    other: String::new(),
                });
                if is_other {
                    update.other = value;
                } else {
                    let index = value.parse::<usize>().map_err(|_| {
                        AppError::malformed(format!("'{value}' is not an option index"))
                    })?;
                    update.selected.push(index);
                }
            }
        }
    }

    let sid = sid.ok_or_else(|| AppError::malformed("missing sid"))?;
    let updates = QuestionId::ALL
        .into_iter()
        .filter_map(|id| updates.remove(&id))
        .collect();

    Ok(AnswerForm {
        sid,
        preview,
        updates,
    })
}

pub async fn answers_handler(
    State(state): State<SharedState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = parse_answer_form(pairs)?;

    let snapshot = match state.survey.update_answers(&form.sid, &form.updates).await {
        Ok(snapshot) => snapshot,
        Err(e) => return refusal(&state, &form.sid, e).await,
    };

    if form.preview {
        let preview = state.survey.preview(&form.sid).await?;
        return Ok(page(&state, &snapshot, &[], Some(&preview))?.into_response());
    }

    let notice = Notice::info("Antworten übernommen. Es wurde nichts gespeichert.");
    Ok(page(&state, &snapshot, &[notice], None)?.into_response())
}
