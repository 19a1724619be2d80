//! Typed answer record and the results payload.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PollError, Result};

use super::questions::QuestionId;

/// Subject line of the results email.
pub const RESULTS_SUBJECT: &str = "Neue Umfrageantwort (anonym)";

/// Answer to one question: chosen option labels plus free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub selected: Vec<String>,
    pub other: String,
}

/// All answers of one session, one field per question.
///
/// Lives only in memory and in the outgoing email body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerBundle {
    pub motives: QuestionAnswer,
    pub expectations: QuestionAnswer,
    pub topics: QuestionAnswer,
    pub changes: QuestionAnswer,
    pub obstacles: QuestionAnswer,
}

impl AnswerBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, id: QuestionId) -> &QuestionAnswer {
        match id {
            QuestionId::Motives => &self.motives,
            QuestionId::Expectations => &self.expectations,
            QuestionId::Topics => &self.topics,
            QuestionId::Changes => &self.changes,
            QuestionId::Obstacles => &self.obstacles,
        }
    }

    fn answer_mut(&mut self, id: QuestionId) -> &mut QuestionAnswer {
        match id {
            QuestionId::Motives => &mut self.motives,
            QuestionId::Expectations => &mut self.expectations,
            QuestionId::Topics => &mut self.topics,
            QuestionId::Changes => &mut self.changes,
            QuestionId::Obstacles => &mut self.obstacles,
        }
    }

    /// Replaces the answer to `id`.
    ///
    /// `indices` refer to the question's option list; duplicates collapse and
    /// labels are stored in catalog order. The previous answer is kept when
    /// validation fails.
    pub fn set_answer(&mut self, id: QuestionId, indices: &[usize], other: &str) -> Result<()> {
        let question = id.question();

        let mut picked = vec![false; question.options.len()];
        for &index in indices {
            let slot = picked.get_mut(index).ok_or(PollError::InvalidOption {
                question: id.key(),
                index,
            })?;
            *slot = true;
        }

        let selected: Vec<String> = question
            .options
            .iter()
            .zip(picked)
            .filter_map(|(label, on)| on.then(|| label.to_string()))
            .collect();

        if selected.len() > question.max_choices {
            return Err(PollError::TooManyOptions {
                question: id.key(),
                max: question.max_choices,
            });
        }

        *self.answer_mut(id) = QuestionAnswer {
            selected,
            other: other.trim().to_string(),
        };
        Ok(())
    }

    pub fn is_selected(&self, id: QuestionId, index: usize) -> bool {
        id.question()
            .options
            .get(index)
            .is_some_and(|label| self.answer(id).selected.iter().any(|s| s == label))
    }
}

/// Body of the results email.
#[derive(Debug, Clone, Serialize)]
pub struct ResultsPayload<'a> {
    pub timestamp_utc: String,
    pub avatar: Option<&'a str>,
    pub answers: &'a AnswerBundle,
}

impl<'a> ResultsPayload<'a> {
    pub fn new(avatar: Option<&'a str>, answers: &'a AnswerBundle, now: DateTime<Utc>) -> Self {
        Self {
            timestamp_utc: now.to_rfc3339_opts(SecondsFormat::Micros, false),
            avatar,
            answers,
        }
    }

    /// Pretty JSON with non-ASCII left unescaped.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
