//! Per-session avatar selection.

use serde::Serialize;

use crate::avatar::{ClaimSet, catalog};
use crate::error::{PollError, Result};
use crate::reservation::{ClaimOutcome, ReservationService};

/// Message shown when a token was taken between render and reservation.
pub const NO_LONGER_AVAILABLE: &str =
    "Dieses Tier ist leider nicht mehr frei. Bitte wähle ein anderes.";

/// Ephemeral avatar selection of one browser tab.
///
/// Lifecycle: `Empty → Chosen(t) → Reserved(t)`. A chosen token may be
/// replaced freely; a reserved token is final for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSelection {
    chosen: Option<String>,
    reserved: Option<String>,
}

/// What happened on `confirm_reservation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Token claimed and persisted.
    Reserved,
    /// Token claimed for this session only; durability not guaranteed.
    ReservedUnpersisted { reason: String },
    /// The session already held this token; nothing changed.
    AlreadyYours,
    /// Someone else holds the token; pick another.
    Unavailable,
}

impl ConfirmOutcome {
    /// User-facing message, if the outcome warrants one.
    pub fn warning(&self) -> Option<String> {
        match self {
            Self::ReservedUnpersisted { reason } => Some(format!(
                "Die Avatar-Liste konnte nicht dauerhaft gespeichert werden (technischer Hinweis: {reason})."
            )),
            Self::Unavailable => Some(NO_LONGER_AVAILABLE.to_string()),
            Self::Reserved | Self::AlreadyYours => None,
        }
    }
}

impl SessionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chosen(&self) -> Option<&str> {
        self.chosen.as_deref()
    }

    pub fn reserved(&self) -> Option<&str> {
        self.reserved.as_deref()
    }

    /// Tentatively picks `token` without touching the store.
    pub fn pick_tentative(&mut self, token: &str) -> Result<()> {
        if !catalog::contains(token) {
            return Err(PollError::invalid_token(token));
        }
        if let Some(reserved) = &self.reserved {
            return Err(PollError::SelectionLocked {
                reserved: reserved.clone(),
            });
        }
        self.chosen = Some(token.to_string());
        Ok(())
    }

    /// Claims `token` through `reservations` and records the result.
    ///
    /// `seen` is the claim set this session last rendered.
    pub fn confirm_reservation(
        &mut self,
        token: &str,
        seen: &ClaimSet,
        reservations: &ReservationService,
    ) -> Result<ConfirmOutcome> {
        match self.reserved.as_deref() {
            Some(reserved) if reserved == token => return Ok(ConfirmOutcome::AlreadyYours),
            Some(reserved) => {
                return Err(PollError::SelectionLocked {
                    reserved: reserved.to_string(),
                });
            }
            None => {}
        }

        match reservations.try_claim(token, seen)? {
            ClaimOutcome::Claimed(_) => {
                self.hold(token);
                Ok(ConfirmOutcome::Reserved)
            }
            ClaimOutcome::ClaimedUnpersisted { reason, .. } => {
                self.hold(token);
                Ok(ConfirmOutcome::ReservedUnpersisted { reason })
            }
            ClaimOutcome::AlreadyClaimed => {
                if self.chosen.as_deref() == Some(token) {
                    self.chosen = None;
                }
                Ok(ConfirmOutcome::Unavailable)
            }
        }
    }

    fn hold(&mut self, token: &str) {
        self.chosen = Some(token.to_string());
        self.reserved = Some(token.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avatar::{AvatarStore, MemoryAvatarStore};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts `load` calls on top of an in-memory store.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryAvatarStore,
        loads: AtomicUsize,
    }

    impl AvatarStore for CountingStore {
        fn load(&self) -> ClaimSet {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.inner.load()
        }

        fn save(&self, claims: &ClaimSet) -> Result<()> {
            self.inner.save(claims)
        }
    }

    fn reservations() -> (ReservationService, Arc<MemoryAvatarStore>) {
        let store = Arc::new(MemoryAvatarStore::new());
        (ReservationService::new(store.clone()), store)
    }

    #[test]
    fn test_pick_has_no_store_side_effects() {
        let (_service, store) = reservations();
        let mut selection = SessionSelection::new();

        selection.pick_tentative("🦉").unwrap();
        selection.pick_tentative("🦅").unwrap();

        assert_eq!(selection.chosen(), Some("🦅"));
        assert_eq!(selection.reserved(), None);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_confirm_sets_chosen_and_reserved() {
        let (service, store) = reservations();
        let mut selection = SessionSelection::new();
        selection.pick_tentative("🦉").unwrap();

        let outcome = selection

            .confirm_reservation("🦉", &ClaimSet::new(), &service)

            .unwrap();

        assert_eq!(outcome, ConfirmOutcome::Reserved);
        assert_eq!(selection.chosen(), Some("🦉"));
        assert_eq!(selection.reserved(), Some("🦉"));
        assert!(store.load().contains("🦉"));
    }

    #[test]
    fn test_confirm_twice_is_noop() {
        let (service, store) = reservations();
        let mut selection = SessionSelection::new();

        selection

            .confirm_reservation("🦉", &ClaimSet::new(), &service)

            .unwrap();
        let before = store.load();
        let outcome = selection
            .confirm_reservation("🦉", &ClaimSet::new(), &service)
            .unwrap();

        assert_eq!(outcome, ConfirmOutcome::AlreadyYours);
        assert_eq!(store.load(), before);
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_reserved_is_terminal() {
        let (service, _store) = reservations();
        let mut selection = SessionSelection::new();
        selection
            .confirm_reservation("🦉", &ClaimSet::new(), &service)
            .unwrap();

        assert!(matches!(
            selection.pick_tentative("🦅"),
            Err(PollError::SelectionLocked { .. })
        ));
        assert!(matches!(
            selection.confirm_reservation("🦅", &ClaimSet::new(), &service),
            Err(PollError::SelectionLocked { .. })
        ));
        assert_eq!(selection.reserved(), Some("🦉"));
    }

    #[test]
    fn test_confirm_taken_token_reports_unavailable() {
        let store = Arc::new(MemoryAvatarStore::with_claims(ClaimSet::from_tokens(["🦉"])));
        let service = ReservationService::new(store);
        let mut selection = SessionSelection::new();
        selection.pick_tentative("🦉").unwrap();

        let outcome = selection

            .confirm_reservation("🦉", &ClaimSet::new(), &service)

            .unwrap();

        assert_eq!(outcome, ConfirmOutcome::Unavailable);
        assert_eq!(outcome.warning().as_deref(), Some(NO_LONGER_AVAILABLE));
        assert_eq!(selection.reserved(), None);
        assert_eq!(selection.chosen(), None);
    }

    #[test]
    fn test_unpersisted_claim_still_reserves() {
        let store = Arc::new(MemoryAvatarStore::read_only(ClaimSet::new()));
        let service = ReservationService::new(store);
        let mut selection = SessionSelection::new();

        let outcome = selection

            .confirm_reservation("🐙", &ClaimSet::new(), &service)

            .unwrap();

        assert!(matches!(outcome, ConfirmOutcome::ReservedUnpersisted { .. }));
        assert!(outcome.warning().unwrap().contains("nicht dauerhaft"));
        assert_eq!(selection.reserved(), Some("🐙"));
    }

    #[test]
    fn test_confirm_reads_store_once() {
        let store = Arc::new(CountingStore::default());
        let service = ReservationService::new(store.clone());
        let mut selection = SessionSelection::new();

        let rendered = ClaimSet::from_tokens(["🦇"]);
        selection
            .confirm_reservation("🦉", &rendered, &service)
            .unwrap();

        assert_eq!(store.loads.load(Ordering::SeqCst), 1);
        assert!(store.inner.load().contains("🦉"));
    }

    #[test]
    fn test_pick_unknown_token() {
        let mut selection = SessionSelection::new();
        assert!(matches!(
            selection.pick_tentative("🦊"),
            Err(PollError::InvalidToken(_))
        ));
    }
}
