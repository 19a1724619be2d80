//! HTML page rendering.

use anonpoll_application::SessionSnapshot;
use anonpoll_core::board::AvatarBoard;
use anonpoll_core::survey::QUESTIONS;
use minijinja::Environment;
use serde::Serialize;

const PAGE_TEMPLATE: &str = "page.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

/// A message box shown above the page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Serialize)]
struct OptionView {
    index: usize,
    label: &'static str,
    checked: bool,
    disabled: bool,
}

#[derive(Serialize)]
struct QuestionView {
    key: &'static str,
    title: &'static str,
    max_choices: usize,
    options: Vec<OptionView>,
    other: String,
}

#[derive(Serialize)]
struct PageView<'a> {
    sid: &'a str,
    board: &'a AvatarBoard,
    questions: Vec<QuestionView>,
    opted_in: bool,
    notices: &'a [Notice],
    preview: Option<&'a str>,
}

pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE, include_str!("../templates/page.html"))?;
        Ok(Self { env })
    }

    pub fn render(
        &self,
        snapshot: &SessionSnapshot,
        notices: &[Notice],
        preview: Option<&str>,
    ) -> Result<String, minijinja::Error> {
        let view = PageView {
            sid: &snapshot.sid,
            board: &snapshot.board,
            questions: question_views(snapshot),
            opted_in: snapshot.opted_in,
            notices,
            preview,
        };
        self.env.get_template(PAGE_TEMPLATE)?.render(&view)
    }
}

/// Options beyond the limit are disabled unless already checked.
fn question_views(snapshot: &SessionSnapshot) -> Vec<QuestionView> {
    QUESTIONS
        .iter()
        .map(|question| {
            let answer = snapshot.answers.answer(question.id);
            let limit_reached = answer.selected.len() >= question.max_choices;
            QuestionView {
                key: question.id.key(),
                title: question.title,
                max_choices: question.max_choices,
                options: question
                    .options
                    .iter()
                    .enumerate()
                    .map(|(index, &label)| {
                        let checked = snapshot.answers.is_selected(question.id, index);
                        OptionView {
                            index,
                            label,
                            checked,
                            disabled: limit_reached && !checked,
                        }
                    })
                    .collect(),
                other: answer.other.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anonpoll_core::avatar::ClaimSet;
    use anonpoll_core::board::render_board;
    use anonpoll_core::session::SessionSelection;
    use anonpoll_core::survey::{AnswerBundle, QuestionId};

    fn snapshot(answers: AnswerBundle) -> SessionSnapshot {
        SessionSnapshot {
            sid: "abc".to_string(),
            board: render_board(&ClaimSet::from_tokens(["🦇"]), &SessionSelection::new()),
            answers,
            opted_in: false,
        }
    }

    #[test]
    fn test_page_lists_avatars_and_questions() {
        let renderer = PageRenderer::new().unwrap();

        let html = renderer
            .render(
                &snapshot(AnswerBundle::new()),
                &[Notice::info("Hallo")],
                None,
            )
            .unwrap();

        assert!(html.contains("Fledermaus"));
        assert!(html.contains("name=\"sid\" value=\"abc\""));
        assert!(html.contains("Was sind Deine Motive dabei zu sein?"));
        assert!(html.contains("Hallo"));
    }

    #[test]
    fn test_preview_is_escaped() {
        let renderer = PageRenderer::new().unwrap();

        let html = renderer
            .render(&snapshot(AnswerBundle::new()), &[], Some("<script>"))
            .unwrap();

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_options_beyond_limit_are_disabled() {
        let mut answers = AnswerBundle::new();
        answers
            .set_answer(QuestionId::Changes, &[0, 1, 2], "")
            .unwrap();

        let views = question_views(&snapshot(answers));
        let changes = views.iter().find(|q| q.key == "changes").unwrap();

        assert!(changes.options[3].disabled);
        assert!(!changes.options[0].disabled);
        assert!(changes.options[0].checked);
    }
}
