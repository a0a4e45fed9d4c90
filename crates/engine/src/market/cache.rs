use std::collections::HashMap;
use std::time::{Duration, Instant};

use gemval_common::types::MarketDataSnapshot;

/// In-memory snapshot cache with TTL-based expiration, keyed by
/// specification bucket. Owned by the resolver; never shared.
pub struct SnapshotCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

struct CacheEntry {
    snapshot: MarketDataSnapshot,
    inserted_at: Instant,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Get a cached snapshot if it exists and hasn't expired.
    pub fn get(&self, key: &str) -> Option<MarketDataSnapshot> {
        if let Some(entry) = self.entries.get(key) {
            if entry.inserted_at.elapsed() < self.ttl {
                metrics::counter!("market.cache.hit").increment(1);
                return Some(entry.snapshot.clone());
            }
        }
        metrics::counter!("market.cache.miss").increment(1);
        None
    }

    /// Insert a live snapshot, evicting expired entries.
    pub fn insert(&mut self, key: String, snapshot: MarketDataSnapshot) {
        self.entries
            .retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);

        self.entries.insert(
            key,
            CacheEntry {
                snapshot,
                inserted_at: Instant::now(),
            },
        );
    }
}
