//! Approximate-LRU cache of type descriptors.
//!
//! Descriptors are cheap to build but are needed on every traversal node,
//! so they are computed once per `(TypeId, tag)` and kept behind a
//! read-write lock. Recency is tracked at second granularity; when several
//! entries tie within the same second the eviction victim is whichever one
//! map iteration visits first. This is an approximate LRU, not an exact one.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::describe::TypeSpec;

/// Default capacity of the process-wide descriptor cache.
pub const DEFAULT_SPEC_CAPACITY: usize = 128;

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ============================================================================
// ENTRY
// ============================================================================

struct CacheEntry {
    spec: Arc<TypeSpec>,
    /// Unix seconds of the last read; updated without the write lock.
    last_access: AtomicU64,
}

impl CacheEntry {
    fn new(spec: Arc<TypeSpec>) -> Self {
        Self {
            spec,
            last_access: AtomicU64::new(unix_seconds()),
        }
    }

    fn touch(&self) {
        self.last_access.store(unix_seconds(), Ordering::Relaxed);
    }
}

// ============================================================================
// STATS
// ============================================================================

/// Counters for cache behavior; useful in tests and tracing output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that found a finished descriptor.
    pub hits: u64,
    /// Lookups that had to build the descriptor.
    pub misses: u64,
    /// Entries removed to stay within capacity.
    pub evictions: u64,
}

// ============================================================================
// SPEC CACHE
// ============================================================================

/// Fixed-capacity descriptor cache keyed by `(TypeId, tag)`.
///
/// The read path takes only the read lock; the write path runs on a miss
/// and inserts the fully built descriptor, so concurrent readers never see
/// a partially built one.
pub struct SpecCache {
    entries: RwLock<HashMap<(TypeId, String), CacheEntry>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl SpecCache {
    /// Creates a cache bounded to `capacity` descriptors (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Returns the cached descriptor, building and inserting it on a miss.
    pub fn get_or_build(
        &self,
        type_id: TypeId,
        tag: &str,
        build: impl FnOnce() -> TypeSpec,
    ) -> Arc<TypeSpec> {
        {
            let entries = self.entries.read();
            if let Some(entry) = entries.get(&(type_id, tag.to_string())) {
                entry.touch();
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(tag, "descriptor cache hit");
                return Arc::clone(&entry.spec);
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let spec = Arc::new(build());
        debug!(type_name = spec.type_name, tag, "descriptor cache miss, built spec");

        let mut entries = self.entries.write();
        // Another writer may have raced us here; keep the first insert so
        // every reader shares one Arc.
        let entry = entries
            .entry((type_id, tag.to_string()))
            .or_insert_with(|| CacheEntry::new(Arc::clone(&spec)));
        let spec = Arc::clone(&entry.spec);

        while entries.len() > self.capacity {
            let victim = entries
                .iter()
                .min_by_key(|(_, e)| e.last_access.load(Ordering::Relaxed))
                .map(|(k, _)| k.clone());
            match victim {
                Some(key) => {
                    entries.remove(&key);
                    self.evictions.fetch_add(1, Ordering::Relaxed);
                    debug!("evicted descriptor cache entry");
                }
                None => break,
            }
        }

        spec
    }

    /// Current number of cached descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the hit/miss/eviction counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Drops every cached descriptor (counters are kept).
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

static GLOBAL: LazyLock<SpecCache> = LazyLock::new(|| SpecCache::new(DEFAULT_SPEC_CAPACITY));

/// The process-wide descriptor cache used by [`spec_of`](crate::describe::spec_of).
#[must_use]
pub fn global() -> &'static SpecCache {
    &GLOBAL
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::FieldSpec;

    fn spec(name: &'static str) -> TypeSpec {
        TypeSpec {
            type_name: name,
            fields: vec![FieldSpec::leaf("f", "")],
        }
    }

    struct A;
    struct B;
    struct C;

    #[test]
    fn second_lookup_hits() {
        let cache = SpecCache::new(8);
        let id = TypeId::of::<A>();
        let first = cache.get_or_build(id, "valid", || spec("A"));
        let second = cache.get_or_build(id, "valid", || panic!("must not rebuild"));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn distinct_tags_are_distinct_entries() {
        let cache = SpecCache::new(8);
        let id = TypeId::of::<A>();
        cache.get_or_build(id, "valid", || spec("A"));
        cache.get_or_build(id, "other", || spec("A"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn capacity_is_enforced() {
        let cache = SpecCache::new(2);
        cache.get_or_build(TypeId::of::<A>(), "valid", || spec("A"));
        cache.get_or_build(TypeId::of::<B>(), "valid", || spec("B"));
        cache.get_or_build(TypeId::of::<C>(), "valid", || spec("C"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = SpecCache::new(4);
        cache.get_or_build(TypeId::of::<A>(), "valid", || spec("A"));
        cache.clear();
        assert!(cache.is_empty());
    }
}
