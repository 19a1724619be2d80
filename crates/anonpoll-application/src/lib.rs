//! Application layer for anonpoll.
//!
//! Coordinates the domain services for one browser tab at a time: session
//! registry, avatar reservation, answers and the results mail.

pub mod session;
pub mod survey_usecase;

pub use session::SessionManager;
pub use survey_usecase::{AnswerUpdate, SendOutcome, SessionSnapshot, SurveyUseCase};
