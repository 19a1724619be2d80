//! In-process avatar store.
//!
//! Useful for tests and single-process demos. Holds no lock, so concurrent
//! reservations against it have the baseline last-write-wins behaviour.

use std::sync::Mutex;

use crate::error::{PollError, Result};

use super::{AvatarStore, ClaimSet};

#[derive(Debug, Default)]
pub struct MemoryAvatarStore {
    claims: Mutex<ClaimSet>,
    fail_saves: bool,
}

impl MemoryAvatarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_claims(claims: ClaimSet) -> Self {
        Self {
            claims: Mutex::new(claims),
            fail_saves: false,
        }
    }

    /// A store whose `save` always fails, like a read-only filesystem.
    pub fn read_only(claims: ClaimSet) -> Self {
        Self {
            claims: Mutex::new(claims),
            fail_saves: true,
        }
    }
}

impl AvatarStore for MemoryAvatarStore {
    fn load(&self) -> ClaimSet {
        self.claims
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn save(&self, claims: &ClaimSet) -> Result<()> {
        if self.fail_saves {
            return Err(PollError::write_failed("store is read-only"));
        }
        *self
            .claims
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = claims.clone();
        Ok(())
    }
}
