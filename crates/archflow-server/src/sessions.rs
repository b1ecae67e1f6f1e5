//! The session store.
//!
//! A process-wide concurrent map from session id to session. Each session
//! serializes its own mutations through a `tokio::Mutex` while reads of other
//! sessions proceed untouched; a background sweeper evicts sessions idle past
//! the TTL. A reader racing the sweeper sees either the live session or a
//! clean miss, never a half-removed one.

use archflow::ArchitectureSpec;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Mutable per-session state, guarded by the session's mutex.
#[derive(Debug)]
pub struct SessionState {
    /// Spec snapshot after the last successful generation
    pub spec: ArchitectureSpec,

    /// Artifact paths of the last render
    pub artifact_paths: Vec<PathBuf>,

    /// Artifact URLs of the last render
    pub artifact_urls: Vec<String>,

    /// Generation id of the last render
    pub generation_id: Uuid,

    /// Prior specs, most recent last; bounded by the store's undo depth
    pub undo_stack: VecDeque<ArchitectureSpec>,
}

/// One client session.
#[derive(Debug)]
pub struct Session {
    /// Session id
    pub id: Uuid,

    created_at: Instant,
    last_access: Mutex<Instant>,

    /// Serializes modify/undo/regenerate for this session
    pub state: tokio::sync::Mutex<SessionState>,
}

impl Session {
    /// Seconds since creation, for logs.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    fn touch(&self) {
        *self.last_access.lock() = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.last_access.lock().elapsed()
    }
}

/// Process-wide session store.
pub struct SessionStore {
    sessions: DashMap<Uuid, Arc<Session>>,
    ttl: Duration,
    undo_depth: usize,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration, undo_depth: usize) -> Self {
        SessionStore {
            sessions: DashMap::new(),
            ttl,
            undo_depth,
        }
    }

    /// Create a session for a freshly generated spec.
    pub fn insert(
        &self,
        spec: ArchitectureSpec,
        artifact_paths: Vec<PathBuf>,
        artifact_urls: Vec<String>,
        generation_id: Uuid,
    ) -> Arc<Session> {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let session = Arc::new(Session {
            id,
            created_at: now,
            last_access: Mutex::new(now),
            state: tokio::sync::Mutex::new(SessionState {
                spec,
                artifact_paths,
                artifact_urls,
                generation_id,
                undo_stack: VecDeque::new(),
            }),
        });
        self.sessions.insert(id, Arc::clone(&session));
        crate::metrics::set_active_sessions(self.sessions.len());
        session
    }

    /// Fetch a live session, refreshing its idle clock. Expired sessions are
    /// removed on contact and reported as absent.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<Arc<Session>> {
        let session = self.sessions.get(&id).map(|s| Arc::clone(&s))?;
        if session.idle_for() > self.ttl {
            self.sessions.remove(&id);
            crate::metrics::set_active_sessions(self.sessions.len());
            return None;
        }
        session.touch();
        Some(session)
    }

    /// Push a prior spec onto a session's undo stack, enforcing the bound.
    pub fn push_undo(&self, state: &mut SessionState, prior: ArchitectureSpec) {
        state.undo_stack.push_back(prior);
        while state.undo_stack.len() > self.undo_depth {
            state.undo_stack.pop_front();
        }
    }

    /// Remove sessions idle past the TTL. Returns how many were evicted.
    pub fn sweep(&self) -> usize {
        let expired: Vec<Uuid> = self
            .sessions
            .iter()
            .filter(|entry| entry.idle_for() > self.ttl)
            .map(|entry| *entry.key())
            .collect();
        for id in &expired {
            self.sessions.remove(id);
        }
        if !expired.is_empty() {
            tracing::info!(evicted = expired.len(), "session sweep");
        }
        crate::metrics::set_active_sessions(self.sessions.len());
        expired.len()
    }

    /// Live session count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Spawn the TTL sweeper. The task never blocks request handlers; it only
/// takes the map shard locks long enough to collect and remove ids.
pub fn spawn_sweeper(store: Arc<SessionStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick fires immediately; skip it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            store.sweep();
        }
    })
}
