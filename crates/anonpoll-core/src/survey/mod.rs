//! Survey domain module.
//!
//! # Module Structure
//!
//! - `questions`: the fixed question catalog
//! - `answers`: typed answer record and the results payload

mod answers;
mod questions;

pub use answers::{AnswerBundle, QuestionAnswer, RESULTS_SUBJECT, ResultsPayload};
pub use questions::{QUESTIONS, Question, QuestionId};
