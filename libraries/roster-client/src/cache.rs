//! In-memory user cache.
//!
//! Unbounded by design: entries stay until invalidated by a write
//! operation or a wholesale clear. There is no TTL and no eviction; the
//! cache lives as long as the service that owns it.

use roster_core::types::{User, UserId};
use std::collections::HashMap;

/// Map from user id to the most recently fetched `User`.
#[derive(Debug, Default)]
pub struct UserCache {
    entries: HashMap<UserId, User>,
}

impl UserCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached user.
    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.entries.get(id)
    }

    /// Store a user under its id, replacing any previous entry.
    pub fn insert(&mut self, user: User) {
        self.entries.insert(user.id.clone(), user);
    }

    /// Remove the entry for `id`, if present.
    pub fn remove(&mut self, id: &UserId) {
        self.entries.remove(id);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached users.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
