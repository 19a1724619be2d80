//! Domain layer of anonpoll: avatar catalog, claim set, reservation,
//! per-session selection and the survey answer model.
//!
//! Only the set of claimed avatar tokens is durable. Answers never leave
//! memory except inside an explicitly requested results email.

pub mod avatar;
pub mod board;
pub mod config;
pub mod error;
pub mod notify;
pub mod reservation;
pub mod session;
pub mod survey;

// Re-export common error type
pub use error::PollError;
