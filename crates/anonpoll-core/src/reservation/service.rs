//! Reservation service: the only way a token moves from free to claimed.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::avatar::{AvatarStore, ClaimSet, WriteGuard, catalog};
use crate::error::{PollError, Result};

/// Result of a claim attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The token is now claimed and the updated set is durable.
    Claimed(ClaimSet),
    /// The token is claimed for this interaction but the save failed.
    ///
    /// Treat as a soft success and warn about reduced durability.
    ClaimedUnpersisted { claims: ClaimSet, reason: String },
    /// Someone else already holds the token. Expected, not an error.
    AlreadyClaimed,
}

impl ClaimOutcome {
    pub fn is_claimed(&self) -> bool {
        matches!(self, Self::Claimed(_) | Self::ClaimedUnpersisted { .. })
    }

    /// The claim set as seen after the attempt, if it changed.
    pub fn claims(&self) -> Option<&ClaimSet> {
        match self {
            Self::Claimed(claims) | Self::ClaimedUnpersisted { claims, .. } => Some(claims),
            Self::AlreadyClaimed => None,
        }
    }
}

/// Checks availability against the store and claims free tokens.
///
/// The read-decide-write sequence runs inside the store's write guard. For
/// stores without a locking primitive (or when the lock cannot be taken) a
/// narrow window remains in which two sessions may both claim the same
/// token; the last save wins.
#[derive(Clone)]
pub struct ReservationService {
    store: Arc<dyn AvatarStore>,
}

impl ReservationService {
    pub fn new(store: Arc<dyn AvatarStore>) -> Self {
        Self { store }
    }

    /// Fresh read of the authoritative claim set.
    pub fn current_claims(&self) -> ClaimSet {
        self.store.load()
    }

    /// Attempts to claim `token`.
    ///
    /// `seen` is the caller's (possibly stale) copy of the claim set; the
    /// decision is always made against a fresh read.
    ///
    /// # Returns
    ///
    /// - `Ok(ClaimOutcome)`: see the variants
    /// - `Err(PollError::InvalidToken)`: `token` is not in the catalog
    pub fn try_claim(&self, token: &str, seen: &ClaimSet) -> Result<ClaimOutcome> {
        if !catalog::contains(token) {
            return Err(PollError::invalid_token(token));
        }

        let _guard = self.acquire_guard();

        let mut claims = self.store.load();
        let interleaved = claims.difference(seen).count();
        if interleaved > 0 {
            debug!(interleaved, "claim set changed since last render");
        }

        if claims.contains(token) {
            debug!(token, "avatar already claimed");
            return Ok(ClaimOutcome::AlreadyClaimed);
        }

        claims.insert(token);
        match self.store.save(&claims) {
            Ok(()) => {
                info!(token, total = claims.len(), "avatar claimed");
                Ok(ClaimOutcome::Claimed(claims))
            }
            Err(e) => {
                warn!(token, error = %e, "avatar claimed but not persisted");
                Ok(ClaimOutcome::ClaimedUnpersisted {
                    claims,
                    reason: e.to_string(),
                })
            }
        }
    }

    fn acquire_guard(&self) -> WriteGuard {
        self.store.write_guard().unwrap_or_else(|e| {
            warn!(error = %e, "claim proceeds without write lock");
            WriteGuard::unlocked()
        })
    }
}
