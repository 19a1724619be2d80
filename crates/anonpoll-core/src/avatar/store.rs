//! Avatar store trait.
//!
//! Defines the interface for persisting the claim set.

use crate::error::Result;

use super::ClaimSet;

/// A held single-writer scope. Dropping it releases the underlying lock.
///
/// Stores without a locking primitive hand out [`WriteGuard::unlocked`].
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct WriteGuard {
    inner: Option<Box<dyn Send>>,
}

impl WriteGuard {
    /// Wraps a store-specific lock handle.
    pub fn new<G: Send + 'static>(guard: G) -> Self {
        Self {
            inner: Some(Box::new(guard)),
        }
    }

    pub fn unlocked() -> Self {
        Self { inner: None }
    }

    pub fn is_locked(&self) -> bool {
        self.inner.is_some()
    }
}

impl std::fmt::Debug for WriteGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteGuard")
            .field("locked", &self.is_locked())
            .finish()
    }
}

/// Durable representation of the [`ClaimSet`].
///
/// The store is the only shared mutable resource of the system and is read
/// fresh on every interaction; implementations must not cache the set across
/// calls.
///
/// # Implementation Notes
///
/// - `load` never fails: missing storage is an empty set and malformed
///   storage is logged and treated as empty.
/// - `save` replaces the whole persisted set.
pub trait AvatarStore: Send + Sync {
    /// Reads the persisted claim set.
    fn load(&self) -> ClaimSet;

    /// Overwrites the persisted claim set.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: the set is durable
    /// - `Err(PollError::StorageWriteFailed)`: the write did not land
    fn save(&self, claims: &ClaimSet) -> Result<()>;

    /// Acquires exclusive access for a read-decide-write sequence.
    ///
    /// The default implementation has no locking primitive.
    fn write_guard(&self) -> Result<WriteGuard> {
        Ok(WriteGuard::unlocked())
    }
}
