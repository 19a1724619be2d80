//! Session-scoped avatar state.

mod selection;

pub use selection::{ConfirmOutcome, NO_LONGER_AVAILABLE, SessionSelection};
