use once_cell::sync::Lazy;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::snapshot::Snapshot;

/// Time-boxed holder of the current snapshot.
///
/// Readers share the cached `Arc<Snapshot>` while it is younger than the TTL;
/// a stale read inside that window is accepted. Loads are serialized by the
/// write lock, so concurrent misses trigger a single fetch.
pub struct SnapshotCache {
    slot: RwLock<Option<(Instant, Arc<Snapshot>)>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    pub async fn get_or_load<F, Fut>(&self, ttl: Duration, load: F) -> Arc<Snapshot>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Snapshot>,
    {
        {
            let cache = self.slot.read().await;
            if let Some((timestamp, snapshot)) = cache.as_ref() {
                if timestamp.elapsed() < ttl {
                    return Arc::clone(snapshot);
                }
            }
        }

        let mut cache = self.slot.write().await;
        // Another request may have reloaded while we waited for the lock
        if let Some((timestamp, snapshot)) = cache.as_ref() {
            if timestamp.elapsed() < ttl {
                return Arc::clone(snapshot);
            }
        }

        let snapshot = Arc::new(load().await);
        *cache = Some((Instant::now(), Arc::clone(&snapshot)));
        snapshot
    }

    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}

// Process-wide vehicle table cache
pub static SNAPSHOT_CACHE: Lazy<SnapshotCache> = Lazy::new(SnapshotCache::new);
