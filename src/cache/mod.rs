pub mod memory;

pub use memory::MemoryDirectionsCache;

use crate::constants::DIRECTIONS_CACHE_KEY_DECIMALS;
use crate::models::{CandidatePath, GeoPoint};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Storage for directions responses, keyed by rounded endpoints.
#[async_trait]
pub trait DirectionsCache: Send + Sync {
    async fn get_cached_paths(&self, key: &str) -> Option<Vec<CandidatePath>>;
    async fn cache_paths(&self, key: &str, paths: &[CandidatePath]);
    async fn get_stats(&self) -> CacheStats;
    fn backend_name(&self) -> &'static str;
}

/// Cache key for a directions request.
/// Endpoints are rounded to 4 decimals (~11m) so nearby taps share an entry.
pub fn directions_cache_key(origin: &GeoPoint, destination: &GeoPoint) -> String {
    let origin = origin.round(DIRECTIONS_CACHE_KEY_DECIMALS);
    let destination = destination.round(DIRECTIONS_CACHE_KEY_DECIMALS);
    format!(
        "directions:{:.4},{:.4}:{:.4},{:.4}",
        origin.lat, origin.lng, destination.lat, destination.lng
    )
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub entries: u64,
}

impl CacheStats {
    /// Stats with `hit_rate` as a percentage of all lookups, 0 before the first one.
    pub fn from_counts(hits: u64, misses: u64, entries: u64) -> Self {
        let lookups = hits + misses;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            hits as f64 * 100.0 / lookups as f64
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            entries,
        }
    }
}
