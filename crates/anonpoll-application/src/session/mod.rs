//! Per-tab session registry.

mod manager;

pub use manager::{SessionHandle, SessionManager, SurveySession};
