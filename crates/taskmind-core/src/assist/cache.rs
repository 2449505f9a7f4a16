//! Short-lived reply cache for the intent responder.
//!
//! Keys capture everything a reply depends on (normalized message, task
//! list contents, reference date), so a hit returns exactly what the pure
//! path would compute. Storage is a [`moka`] cache bounded by entry count
//! and time-to-live; lookups never block the caller.

use chrono::NaiveDate;
use moka::sync::Cache;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use crate::task::TaskRecord;

pub const DEFAULT_TTL: Duration = Duration::from_secs(30);
pub const DEFAULT_CAPACITY: usize = 256;

/// Composite key: normalized message plus a fingerprint of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    message: String,
    task_count: usize,
    fingerprint: u64,
    today: NaiveDate,
}

impl CacheKey {
    /// `message` is expected to be normalized already.
    pub fn new(message: &str, tasks: &[TaskRecord], today: NaiveDate) -> Self {
        let mut hasher = DefaultHasher::new();
        tasks.hash(&mut hasher);
        Self {
            message: message.to_string(),
            task_count: tasks.len(),
            fingerprint: hasher.finish(),
            today,
        }
    }
}

/// Bounded, time-expiring reply store.
pub struct ResponseCache {
    ttl: Duration,
    capacity: usize,
    entries: Cache<CacheKey, String>,
}

impl fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCache")
            .field("ttl", &self.ttl)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CAPACITY)
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let entries = Cache::builder()
            .max_capacity(capacity as u64)
            .time_to_live(ttl)
            .build();
        Self {
            ttl,
            capacity,
            entries,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `None` on a miss or once the entry has outlived the TTL.
    pub fn get(&self, key: &CacheKey) -> Option<String> {
        self.entries.get(key)
    }

    pub fn insert(&self, key: CacheKey, reply: String) {
        self.entries.insert(key, reply);
    }

    /// Number of entries after pending evictions have been applied.
    pub fn len(&self) -> usize {
        self.entries.run_pending_tasks();
        self.entries.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}
