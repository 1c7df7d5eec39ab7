//! # Idempotency Cache
//!
//! Maps an idempotence key to the transport built for it, so retries and
//! page continuations under the same key reuse one transport (same
//! credentials, same rate limiter, same logging).
//!
//! Entries expire a fixed TTL after insertion. Expired entries are never
//! returned; moka drops them lazily.

use crate::config::IDEMPOTENCY_TTL;
use crate::transport::Transport;
use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

/// TTL cache of shared values keyed by idempotence key
pub struct IdempotencyCache<T = Transport> {
    entries: Cache<String, Arc<T>>,
    ttl: Duration,
}

impl<T: Send + Sync + 'static> IdempotencyCache<T> {
    /// Cache with the provider's 90 second idempotence window
    pub fn new() -> Self {
        Self::with_ttl(IDEMPOTENCY_TTL)
    }

    /// Cache with a custom TTL (useful for testing)
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Cache::builder().time_to_live(ttl).build(),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        self.entries.get(key)
    }

    pub fn insert(&self, key: impl Into<String>, value: Arc<T>) {
        self.entries.insert(key.into(), value);
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Approximate number of live entries
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Send + Sync + 'static> Default for IdempotencyCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> std::fmt::Debug for IdempotencyCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdempotencyCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}
