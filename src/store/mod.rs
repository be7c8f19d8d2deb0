//! In-process session storage with idle expiry and a capacity bound.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use leadsim_core::models::Session;

/// Keyed registry of live sessions.
///
/// `get` hands out a copy; callers write changes back with `put`. Two callers
/// working on the same session at once will race and the last `put` wins.
pub trait SessionStore: Send + Sync {
    fn get(&self, id: Uuid, now: DateTime<Utc>) -> Option<Session>;
    fn put(&self, session: Session, now: DateTime<Utc>);
    fn delete(&self, id: Uuid) -> bool;
    /// Drop every session idle for longer than the TTL. Returns how many went.
    fn sweep_expired(&self, now: DateTime<Utc>) -> usize;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct Entry {
    session: Session,
    last_access: DateTime<Utc>,
}

/// [`SessionStore`] backed by a `HashMap`.
///
/// Entries idle for longer than `ttl` are treated as gone. When a `put` pushes
/// the map past `capacity`, the least recently used other entry is evicted.
#[derive(Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<Uuid, Entry>>>,
    capacity: usize,
    ttl: Duration,
}

impl MemoryStore {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.max(1),
            ttl,
        }
    }

    fn is_expired(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        now - entry.last_access > self.ttl
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, id: Uuid, now: DateTime<Utc>) -> Option<Session> {
        let mut entries = self.entries.lock().expect("session store lock poisoned");
        let expired = self.is_expired(entries.get(&id)?, now);
        if expired {
            entries.remove(&id);
            tracing::info!(session_id = %id, "Session expired");
            return None;
        }

        let entry = entries.get_mut(&id)?;
        entry.last_access = now;
        Some(entry.session.clone())
    }

    fn put(&self, session: Session, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().expect("session store lock poisoned");
        let id = session.id;
        entries.insert(
            id,
            Entry {
                session,
                last_access: now,
            },
        );

        while entries.len() > self.capacity {
            let Some(oldest) = entries
                .iter()
                .filter(|(key, _)| **key != id)
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(key, _)| *key)
            else {
                break;
            };
            entries.remove(&oldest);
            tracing::info!(session_id = %oldest, "Evicted least recently used session");
        }
    }

    fn delete(&self, id: Uuid) -> bool {
        let mut entries = self.entries.lock().expect("session store lock poisoned");
        entries.remove(&id).is_some()
    }

    fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.lock().expect("session store lock poisoned");
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        before - entries.len()
    }

    fn len(&self) -> usize {
        self.entries.lock().expect("session store lock poisoned").len()
    }
}
