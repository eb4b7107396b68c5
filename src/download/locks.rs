//! Per-filename download serialization.
//!
//! Two concurrent requests for the same uncached track would otherwise both
//! pass the cache-existence check and write the same target file. The lock
//! is keyed by the sanitized filename stem, so the second request waits and
//! then hits the cache.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Registry of per-track locks. Entries are never evicted; a stem is a few
/// dozen bytes and the set of requested songs is small.
#[derive(Default)]
pub struct FileLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl FileLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock guarding the cache entry with the given filename stem.
    pub fn for_stem(&self, stem: &str) -> Arc<Mutex<()>> {
        self.locks.entry(stem.to_string()).or_default().value().clone()
    }
}
