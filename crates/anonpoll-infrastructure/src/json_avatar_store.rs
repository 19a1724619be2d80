//! File-backed avatar store.
//!
//! The claim file is a pretty-printed JSON array of avatar glyphs, e.g.
//!
//! ```text
//! [
//!   "🦦",
//!   "🐢"
//! ]
//! ```

use std::path::{Path, PathBuf};

use anonpoll_core::avatar::{AvatarStore, ClaimSet, WriteGuard};
use anonpoll_core::error::{PollError, Result};
use tracing::warn;

use crate::storage::{AtomicJsonError, AtomicJsonFile};

/// [`AvatarStore`] over a single JSON file.
///
/// Reads fail open: a missing or unreadable file is an empty claim set.
/// Writes replace the file atomically and report failures to the caller.
pub struct JsonAvatarStore {
    file: AtomicJsonFile<Vec<String>>,
}

impl JsonAvatarStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Strict read used by [`AvatarStore::load`]; malformed content is an error.
    pub fn try_load(&self) -> Result<ClaimSet> {
        match self.file.load() {
            Ok(Some(tokens)) => Ok(ClaimSet::from_tokens(tokens)),
            Ok(None) => Ok(ClaimSet::new()),
            Err(e) => Err(PollError::StorageReadMalformed(e.to_string())),
        }
    }
}

impl AvatarStore for JsonAvatarStore {
    fn load(&self) -> ClaimSet {
        self.try_load().unwrap_or_else(|e| {
            warn!(path = %self.path().display(), error = %e, "ignoring unreadable claim file");
            ClaimSet::new()
        })
    }

    fn save(&self, claims: &ClaimSet) -> Result<()> {
        let tokens: Vec<String> = claims.iter().map(str::to_string).collect();
        self.file
            .save(&tokens)
            .map_err(|e| PollError::write_failed(e.to_string()))
    }

    fn write_guard(&self) -> Result<WriteGuard> {
        match self.file.lock() {
            Ok(lock) => Ok(WriteGuard::new(lock)),
            Err(AtomicJsonError::LockError(msg)) => Err(PollError::Lock(msg)),
            Err(e) => Err(PollError::Lock(e.to_string())),
        }
    }
}
