use crate::cache::{CacheStats, DirectionsCache};
use crate::models::CandidatePath;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Directions responses held in process memory.
///
/// Entries expire `ttl` after insertion and the least recently used ones are
/// evicted once `max_entries` is reached.
pub struct MemoryDirectionsCache {
    entries: Cache<String, Arc<[CandidatePath]>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryDirectionsCache {
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        MemoryDirectionsCache {
            entries: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(max_entries)
                .build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn record(&self, hit: bool) {
        let counter = if hit { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl DirectionsCache for MemoryDirectionsCache {
    async fn get_cached_paths(&self, key: &str) -> Option<Vec<CandidatePath>> {
        let found = self.entries.get(key).await;
        self.record(found.is_some());
        tracing::debug!(hit = found.is_some(), "Directions cache lookup: {}", key);
        found.map(|paths| paths.to_vec())
    }

    async fn cache_paths(&self, key: &str, paths: &[CandidatePath]) {
        self.entries.insert(key.to_string(), Arc::from(paths)).await;
        tracing::debug!("Stored {} candidate paths under {}", paths.len(), key);
    }

    async fn get_stats(&self) -> CacheStats {
        CacheStats::from_counts(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.entries.entry_count(),
        )
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
