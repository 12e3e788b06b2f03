// SPDX-License-Identifier: MPL-2.0
//! Cache of decoded file positions.
//!
//! Entries are keyed by path and stamped with the file's modification time.
//! A lookup only hits when the file on disk still has that modification
//! time, so a file rewritten behind the library's back is read again.
//!
//! # Design
//!
//! - **LRU eviction**: least recently used paths are evicted first
//! - **Count-bounded**: capacity comes from `[library] position_cache_capacity`
//! - **Negative entries**: "no position" is cached like any other result

use crate::domain::metadata::DecimalCoordinate;
use lru::LruCache;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Default number of cached positions.
pub const DEFAULT_POSITION_CACHE_CAPACITY: usize = 512;

/// Minimum number of cached positions.
pub const MIN_POSITION_CACHE_CAPACITY: usize = 16;

/// Maximum number of cached positions.
pub const MAX_POSITION_CACHE_CAPACITY: usize = 65_536;

#[derive(Debug, Clone, Copy)]
struct Entry {
    modified: SystemTime,
    position: Option<DecimalCoordinate>,
}

/// Statistics about position cache performance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionCacheStats {
    /// Number of lookups answered from the cache.
    pub hits: u64,

    /// Number of lookups that found nothing usable.
    pub misses: u64,

    /// Number of entries dropped because the file changed on disk.
    pub stale: u64,
}

/// LRU cache from file path to its last decoded position.
pub struct PositionCache {
    cache: LruCache<PathBuf, Entry>,
    stats: PositionCacheStats,
}

impl PositionCache {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// The capacity is clamped to the supported range.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(MIN_POSITION_CACHE_CAPACITY, MAX_POSITION_CACHE_CAPACITY);
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            stats: PositionCacheStats::default(),
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_POSITION_CACHE_CAPACITY)
    }

    /// Looks up the cached position for `path`.
    ///
    /// The outer `Option` is the cache answer: `None` is a miss. The inner
    /// `Option` is the cached position, where `None` means the file has no
    /// usable position.
    pub fn get(&mut self, path: &Path) -> Option<Option<DecimalCoordinate>> {
        let current = modified_time(path);
        let cached = self.cache.get(path).copied();
        let fresh = match (cached, current) {
            (Some(entry), Some(modified)) if entry.modified == modified => Some(entry.position),
            (Some(_), _) => {
                self.cache.pop(path);
                self.stats.stale += 1;
                None
            }
            (None, _) => None,
        };

        if fresh.is_some() {
            self.stats.hits += 1;
            tracing::debug!("Position cache hit for {}", path.display());
        } else {
            self.stats.misses += 1;
            tracing::debug!("Position cache miss for {}", path.display());
        }
        fresh
    }

    /// Caches `position` for `path`, stamped with the file's current
    /// modification time.
    ///
    /// Returns `false` if the modification time cannot be read, in which
    /// case nothing is cached.
    pub fn insert(&mut self, path: &Path, position: Option<DecimalCoordinate>) -> bool {
        let Some(modified) = modified_time(path) else {
            self.cache.pop(path);
            return false;
        };
        self.cache.put(path.to_path_buf(), Entry { modified, position });
        true
    }

    /// Drops the entry for `path`, if any.
    pub fn invalidate(&mut self, path: &Path) {
        self.cache.pop(path);
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn stats(&self) -> PositionCacheStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }
}

impl Default for PositionCache {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for PositionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionCache")
            .field("len", &self.cache.len())
            .field("capacity", &self.cache.cap())
            .field("stats", &self.stats)
            .finish()
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn touch(path: &Path) {
        fs::write(path, b"jpeg").expect("write file");
    }

    fn set_mtime(path: &Path, modified: SystemTime) {
        let file = fs::OpenOptions::new()
            .write(true)
            .open(path)
            .expect("open file");
        file.set_modified(modified).expect("set mtime");
    }

    #[test]
    fn insert_then_get_hits() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("a.jpg");
        touch(&path);

        let mut cache = PositionCache::with_defaults();
        let position = DecimalCoordinate::new(10.0, 20.0);
        assert!(cache.insert(&path, Some(position)));

        assert_eq!(cache.get(&path), Some(Some(position)));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn negative_entries_are_cached() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("a.jpg");
        touch(&path);

        let mut cache = PositionCache::with_defaults();
        cache.insert(&path, None);
        assert_eq!(cache.get(&path), Some(None));
    }

    #[test]
    fn changed_mtime_is_a_miss() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("a.jpg");
        touch(&path);
        let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        set_mtime(&path, base);

        let mut cache = PositionCache::with_defaults();
        cache.insert(&path, Some(DecimalCoordinate::new(1.0, 2.0)));

        set_mtime(&path, base + Duration::from_secs(60));
        assert_eq!(cache.get(&path), None);
        assert_eq!(cache.stats().stale, 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn missing_file_is_not_cached() {
        let mut cache = PositionCache::with_defaults();
        assert!(!cache.insert(Path::new("/nonexistent/a.jpg"), None));
        assert!(cache.is_empty());
        assert_eq!(cache.get(Path::new("/nonexistent/a.jpg")), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn deleted_file_drops_entry() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("a.jpg");
        touch(&path);

        let mut cache = PositionCache::with_defaults();
        cache.insert(&path, None);
        fs::remove_file(&path).expect("remove");

        assert_eq!(cache.get(&path), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_and_clear() {
        let dir = tempfile::tempdir().expect("temp dir");
        let a = dir.path().join("a.jpg");
        let b = dir.path().join("b.jpg");
        touch(&a);
        touch(&b);

        let mut cache = PositionCache::with_defaults();
        cache.insert(&a, None);
        cache.insert(&b, None);
        assert_eq!(cache.len(), 2);

        cache.invalidate(&a);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&a), None);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut cache = PositionCache::new(MIN_POSITION_CACHE_CAPACITY);
        let paths: Vec<PathBuf> = (0..=MIN_POSITION_CACHE_CAPACITY)
            .map(|i| dir.path().join(format!("{i:02}.jpg")))
            .collect();
        for path in &paths {
            touch(path);
            cache.insert(path, None);
        }

        assert_eq!(cache.len(), MIN_POSITION_CACHE_CAPACITY);
        assert_eq!(cache.get(&paths[0]), None);
        assert_eq!(cache.get(&paths[1]), Some(None));
    }

    #[test]
    fn capacity_is_clamped() {
        assert_eq!(PositionCache::new(0).capacity(), MIN_POSITION_CACHE_CAPACITY);
        assert_eq!(
            PositionCache::new(usize::MAX).capacity(),
            MAX_POSITION_CACHE_CAPACITY
        );
    }
}
