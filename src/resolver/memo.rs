//! Memoizing wrapper around [`VisibilityResolver`].
//!
//! Renderers sample the same `(day, hour)` grid once per frame. Moon results
//! are cached by the exact bit pattern of the hour, so a cached answer is always
//! identical to a fresh one.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{MoonWindow, Visibility, VisibilityResolver, VisibilitySource};
use crate::data::AstroTable;

type CacheKey = (usize, u64);

/// Caches moon visibility results keyed on `(day, hour)`.
#[derive(Debug)]
pub struct MemoizedResolver {
    inner: VisibilityResolver,
    cache: Mutex<HashMap<CacheKey, Visibility>>,
}

impl MemoizedResolver {
    pub fn new(inner: VisibilityResolver) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached moon results.
    pub fn cached_entries(&self) -> usize {
        self.lock_cache().len()
    }

    pub fn clear(&self) {
        self.lock_cache().clear();
    }

    pub fn inner(&self) -> &VisibilityResolver {
        &self.inner
    }

    fn lock_cache(&self) -> MutexGuard<'_, HashMap<CacheKey, Visibility>> {
        // Entries are plain values, a panic mid-insert cannot leave one half-written
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl VisibilitySource for MemoizedResolver {
    fn table(&self) -> &AstroTable {
        self.inner.table()
    }

    fn resolve_sun(&self, day: usize, hour: f64) -> bool {
        self.inner.resolve_sun(day, hour)
    }

    fn resolve_moon(&self, day: usize, hour: f64) -> Visibility {
        let key = (day, hour.to_bits());
        if let Some(cached) = self.lock_cache().get(&key) {
            return *cached;
        }

        let result = self.inner.resolve_moon(day, hour);
        self.lock_cache().insert(key, result);
        result
    }

    fn moon_window(&self, day: usize) -> MoonWindow {
        self.inner.moon_window(day)
    }
}
