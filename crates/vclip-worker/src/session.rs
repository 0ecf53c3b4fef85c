//! Keyed store for planned sessions with time-based expiry.
//!
//! Entries older than the TTL are invisible to lookups immediately and are
//! physically removed by [`SessionStore::sweep_expired`], which a background
//! task calls on an interval.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{WorkerError, WorkerResult};
use crate::metrics;

/// Unique identifier for a planning session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = WorkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| WorkerError::invalid_input(format!("invalid session id: {}", s)))
    }
}

/// A stored value and its lifetime.
#[derive(Debug)]
pub struct SessionEntry<T> {
    pub value: Arc<T>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl<T> SessionEntry<T> {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Session store with TTL expiry.
pub struct SessionStore<T> {
    entries: Arc<RwLock<HashMap<SessionId, SessionEntry<T>>>>,
    ttl: chrono::Duration,
}

impl<T> Clone for SessionStore<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
        }
    }
}

impl<T> fmt::Debug for SessionStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").field("ttl", &self.ttl).finish()
    }
}

impl<T: Send + Sync + 'static> SessionStore<T> {
    /// Create a new store whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(365)),
        }
    }

    pub async fn insert(&self, id: SessionId, value: T) -> DateTime<Utc> {
        self.insert_at(id, value, Utc::now()).await
    }

    /// Insert as of `now`, returning the expiry time.
    pub async fn insert_at(&self, id: SessionId, value: T, now: DateTime<Utc>) -> DateTime<Utc> {
        let expires_at = now + self.ttl;
        self.entries.write().await.insert(
            id,
            SessionEntry {
                value: Arc::new(value),
                created_at: now,
                expires_at,
            },
        );
        debug!(session_id = %id, %expires_at, "Stored session");
        expires_at
    }

    pub async fn get(&self, id: &SessionId) -> Option<Arc<T>> {
        self.get_at(id, Utc::now()).await
    }

    /// Look up a live entry as of `now`.
    pub async fn get_at(&self, id: &SessionId, now: DateTime<Utc>) -> Option<Arc<T>> {
        let entries = self.entries.read().await;
        entries
            .get(id)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| Arc::clone(&entry.value))
    }

    /// Like [`get`](Self::get) but missing sessions are an error.
    pub async fn require(&self, id: &SessionId) -> WorkerResult<Arc<T>> {
        self.get(id)
            .await
            .ok_or_else(|| WorkerError::session_not_found(id))
    }

    pub async fn remove(&self, id: &SessionId) -> Option<Arc<T>> {
        self.entries.write().await.remove(id).map(|entry| entry.value)
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Utc::now()).await
    }

    /// Remove every entry expired as of `now`, returning how many went.
    pub async fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();

        if removed > 0 {
            info!(removed, remaining = entries.len(), "Swept expired sessions");
        }
        metrics::record_sessions_expired(removed);
        removed
    }

    /// Spawn a background task sweeping expired entries every `every`.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(every);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                store.sweep_expired().await;
            }
        })
    }
}
