//! Nearest-palette-color lookup with memoization
//!
//! [`NearestColor`] is the seam between the dither engine and color
//! matching. Two implementations are provided:
//!
//! - [`PaletteMatcher`] owns its cache and is used through `&mut`.
//! - [`SharedMatcher`] keeps the palette behind an `Arc` and the cache
//!   behind a `Mutex`; clones share both and can be sent to worker threads.
//!
//! Both resolve a color the same way: cache hit → return; otherwise scan
//! the palette under its distance metric (first minimum wins) and remember
//! the answer under the exact input triple.

mod cache;

use std::sync::{Arc, Mutex, MutexGuard};

pub use cache::{CacheStats, ColorCache};

use crate::color::Rgb;
use crate::palette::Palette;

/// Maps an arbitrary 8-bit color to a palette entry.
pub trait NearestColor {
    /// The palette results are drawn from.
    fn palette(&self) -> &Palette;

    /// Index of the palette entry nearest to `color`.
    ///
    /// Must be deterministic and always return an index below
    /// `palette().len()`.
    fn nearest_index(&mut self, color: Rgb) -> usize {
        self.lookup(color).0
    }

    /// [`nearest_index`](Self::nearest_index) plus whether the answer came
    /// from a cache.
    ///
    /// Implement at least one of the two methods.
    fn lookup(&mut self, color: Rgb) -> (usize, bool) {
        (self.nearest_index(color), false)
    }

    /// The palette color nearest to `color`.
    fn nearest(&mut self, color: Rgb) -> Rgb {
        let idx = self.nearest_index(color);
        self.palette().color(idx)
    }

    /// Cache counters, for logging. Matchers without a cache report zeros.
    fn cache_stats(&self) -> CacheStats {
        CacheStats::default()
    }
}

impl<M: NearestColor + ?Sized> NearestColor for &mut M {
    fn palette(&self) -> &Palette {
        (**self).palette()
    }

    fn nearest_index(&mut self, color: Rgb) -> usize {
        (**self).nearest_index(color)
    }

    fn lookup(&mut self, color: Rgb) -> (usize, bool) {
        (**self).lookup(color)
    }

    fn cache_stats(&self) -> CacheStats {
        (**self).cache_stats()
    }
}

/// Counts the lookups of one call, whoever else shares the cache.
///
/// `cache_stats` reports this call's hits and misses and the inner
/// cache's current size.
pub(crate) struct CallCounter<'m, M: ?Sized> {
    inner: &'m mut M,
    hits: u64,
    misses: u64,
}

impl<'m, M: NearestColor + ?Sized> CallCounter<'m, M> {
    pub fn new(inner: &'m mut M) -> Self {
        Self {
            inner,
            hits: 0,
            misses: 0,
        }
    }
}

impl<M: NearestColor + ?Sized> NearestColor for CallCounter<'_, M> {
    fn palette(&self) -> &Palette {
        self.inner.palette()
    }

    fn lookup(&mut self, color: Rgb) -> (usize, bool) {
        let (idx, hit) = self.inner.lookup(color);
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        (idx, hit)
    }

    fn cache_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.inner.cache_stats().entries,
        }
    }
}

/// Palette plus an owned memo cache.
///
/// # Example
///
/// ```
/// use eink7_dither::{NearestColor, PaletteMatcher, Rgb};
///
/// let mut matcher = PaletteMatcher::eink7();
/// assert_eq!(matcher.nearest(Rgb::new(250, 170, 10)), Rgb::new(255, 165, 0));
/// assert_eq!(matcher.cache().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PaletteMatcher {
    palette: Palette,
    cache: ColorCache,
}

impl PaletteMatcher {
    /// Matcher with an empty cache.
    pub fn new(palette: Palette) -> Self {
        Self::with_cache(palette, ColorCache::new())
    }

    /// Matcher reusing an existing cache.
    ///
    /// The cache must have been filled against the same palette and metric.
    pub fn with_cache(palette: Palette, cache: ColorCache) -> Self {
        Self { palette, cache }
    }

    /// Matcher over the default seven-color palette.
    pub fn eink7() -> Self {
        Self::new(Palette::eink7())
    }

    pub fn cache(&self) -> &ColorCache {
        &self.cache
    }

    /// Forget every memoized color, e.g. between unrelated images.
    pub fn reset_cache(&mut self) {
        self.cache.clear();
    }

    pub fn into_parts(self) -> (Palette, ColorCache) {
        (self.palette, self.cache)
    }
}

impl Default for PaletteMatcher {
    fn default() -> Self {
        Self::eink7()
    }
}

impl NearestColor for PaletteMatcher {
    fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    fn lookup(&mut self, color: Rgb) -> (usize, bool) {
        if let Some(idx) = self.cache.get(color) {
            return (idx, true);
        }
        let (idx, _) = self.palette.find_nearest(color);
        self.cache.insert(color, idx);
        (idx, false)
    }

    fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

/// Thread-shareable matcher: read-only palette, mutex-guarded cache.
///
/// Cloning is cheap and every clone sees the same cache. The palette search
/// runs outside the lock, so concurrent misses on the same color may both
/// search; they store the same answer.
#[derive(Debug, Clone)]
pub struct SharedMatcher {
    palette: Arc<Palette>,
    cache: Arc<Mutex<ColorCache>>,
}

impl SharedMatcher {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette: Arc::new(palette),
            cache: Arc::new(Mutex::new(ColorCache::new())),
        }
    }

    /// Share an owned matcher, keeping what its cache already learned.
    pub fn from_matcher(matcher: PaletteMatcher) -> Self {
        let (palette, cache) = matcher.into_parts();
        Self {
            palette: Arc::new(palette),
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn reset_cache(&self) {
        self.lock_cache().clear();
    }

    // A panic while holding the lock cannot leave a wrong entry behind:
    // entries are inserted whole, so a poisoned cache is still valid.
    fn lock_cache(&self) -> MutexGuard<'_, ColorCache> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl From<PaletteMatcher> for SharedMatcher {
    fn from(matcher: PaletteMatcher) -> Self {
        Self::from_matcher(matcher)
    }
}

impl NearestColor for SharedMatcher {
    fn palette(&self) -> &Palette {
        &self.palette
    }

    fn lookup(&mut self, color: Rgb) -> (usize, bool) {
        if let Some(idx) = self.lock_cache().get(color) {
            return (idx, true);
        }
        let (idx, _) = self.palette.find_nearest(color);
        self.lock_cache().insert(color, idx);
        (idx, false)
    }

    fn cache_stats(&self) -> CacheStats {
        self.lock_cache().stats()
    }
}
