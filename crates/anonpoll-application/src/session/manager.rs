use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anonpoll_core::avatar::ClaimSet;
use anonpoll_core::error::{PollError, Result};
use anonpoll_core::session::SessionSelection;
use anonpoll_core::survey::AnswerBundle;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

/// Everything one browser tab knows. Never persisted.
#[derive(Debug, Clone)]
pub struct SurveySession {
    pub selection: SessionSelection,
    pub answers: AnswerBundle,
    pub opted_in: bool,
    /// Claim set behind the last rendered board.
    pub seen_claims: ClaimSet,
    last_seen: Instant,
}

impl SurveySession {
    fn new() -> Self {
        Self {
            selection: SessionSelection::new(),
            answers: AnswerBundle::new(),
            opted_in: false,
            seen_claims: ClaimSet::new(),
            last_seen: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_seen.elapsed()
    }
}

pub type SessionHandle = Arc<Mutex<SurveySession>>;

/// Registry of live tab sessions, keyed by an opaque random id.
///
/// Each session sits behind its own lock so a slow claim in one tab never
/// blocks another. Sessions idle for longer than the timeout are dropped
/// whenever a new one is created.
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, SessionHandle>>>,
    idle_timeout: Duration,
}

impl SessionManager {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Creates an empty session and returns its id.
    pub async fn create(&self) -> (String, SessionHandle) {
        self.prune_idle().await;

        let id = Uuid::new_v4().to_string();
        let handle = Arc::new(Mutex::new(SurveySession::new()));

        let mut sessions = self.sessions.write().await;
        sessions.insert(id.clone(), handle.clone());
        debug!(live = sessions.len(), "session created");

        (id, handle)
    }

    /// Looks up a live session.
    ///
    /// # Errors
    ///
    /// Returns `PollError::SessionNotFound` for unknown or expired ids.
    pub async fn get(&self, id: &str) -> Result<SessionHandle> {
        let sessions = self.sessions.read().await;
        sessions
            .get(id)
            .cloned()
            .ok_or_else(|| PollError::SessionNotFound(id.to_string()))
    }

    /// Returns the session for `id`, or a fresh one if `id` is absent or unknown.
    pub async fn get_or_create(&self, id: Option<&str>) -> (String, SessionHandle) {
        if let Some(id) = id {
            if let Ok(handle) = self.get(id).await {
                return (id.to_string(), handle);
            }
        }
        self.create().await
    }

    /// Drops sessions idle for longer than the timeout.
    ///
    /// Sessions currently locked by a request are in use and kept.
    pub async fn prune_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => session.idle_for() < self.idle_timeout,
            Err(_) => true,
        });
        let pruned = before - sessions.len();
        if pruned > 0 {
            debug!(pruned, live = sessions.len(), "idle sessions dropped");
        }
        pruned
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
