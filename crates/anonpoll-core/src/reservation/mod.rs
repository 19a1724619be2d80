//! Avatar reservation.

mod service;

pub use service::{ClaimOutcome, ReservationService};
