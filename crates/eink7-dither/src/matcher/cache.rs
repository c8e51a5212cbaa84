//! Memo cache for nearest-color lookups.

use std::collections::HashMap;

use crate::color::Rgb;

/// Snapshot of a [`ColorCache`]'s counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to search the palette
    pub misses: u64,
    /// Distinct colors currently cached
    pub entries: usize,
}

impl CacheStats {
    /// Total number of lookups.
    #[inline]
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups answered from the cache, 0.0 when there were none.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            n => self.hits as f64 / n as f64,
        }
    }

    /// Counters accumulated since `earlier`; `entries` is taken from `self`.
    pub fn since(&self, earlier: &CacheStats) -> CacheStats {
        CacheStats {
            hits: self.hits.saturating_sub(earlier.hits),
            misses: self.misses.saturating_sub(earlier.misses),
            entries: self.entries,
        }
    }
}

/// Exact-RGB → palette index map.
///
/// Grows by at most one entry per distinct miss and never evicts; a 24-bit
/// key space bounds it at 16.7M entries. [`clear`](Self::clear) is the only
/// way to shrink it.
#[derive(Debug, Clone, Default)]
pub struct ColorCache {
    entries: HashMap<Rgb, u8>,
    hits: u64,
    misses: u64,
}

impl ColorCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a color, counting the hit or miss.
    #[inline]
    pub fn get(&mut self, color: Rgb) -> Option<usize> {
        match self.entries.get(&color) {
            Some(&idx) => {
                self.hits += 1;
                Some(idx as usize)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Look up a color without touching the counters.
    #[inline]
    pub fn peek(&self, color: Rgb) -> Option<usize> {
        self.entries.get(&color).map(|&idx| idx as usize)
    }

    /// Record the palette index resolved for `color`.
    ///
    /// Palettes hold at most 256 entries, so the index always fits a byte.
    #[inline]
    pub fn insert(&mut self, color: Rgb, idx: usize) {
        debug_assert!(idx <= u8::MAX as usize, "palette index {idx} out of range");
        self.entries.insert(color, idx as u8);
    }

    /// Number of cached colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_counts_hits_and_misses() {
        let mut cache = ColorCache::new();
        let color = Rgb::new(1, 2, 3);

        assert_eq!(cache.get(color), None);
        cache.insert(color, 4);
        assert_eq!(cache.get(color), Some(4));
        assert_eq!(cache.get(color), Some(4));

        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 2,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn test_peek_does_not_count() {
        let mut cache = ColorCache::new();
        cache.insert(Rgb::new(9, 9, 9), 1);
        assert_eq!(cache.peek(Rgb::new(9, 9, 9)), Some(1));
        assert_eq!(cache.peek(Rgb::new(8, 8, 8)), None);
        assert_eq!(cache.stats().lookups(), 0);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cache = ColorCache::new();
        cache.insert(Rgb::new(0, 0, 0), 0);
        cache.get(Rgb::new(0, 0, 0));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_hit_rate() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            entries: 1,
        };
        assert!((stats.hit_rate() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_since() {
        let before = CacheStats {
            hits: 10,
            misses: 5,
            entries: 5,
        };
        let after = CacheStats {
            hits: 16,
            misses: 7,
            entries: 7,
        };
        assert_eq!(
            after.since(&before),
            CacheStats {
                hits: 6,
                misses: 2,
                entries: 7
            }
        );
    }
}
