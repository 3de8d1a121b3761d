//! Extracted outlines, remembered per glyph, instance and mode
//!
//! Fitting reshapes and redraws the same glyphs many times while only a
//! single axis moves, so the face keeps an LRU of finished outlines. The
//! cache lives inside the face and is guarded by the same lock, which means
//! it needs no synchronisation of its own.

use std::num::NonZeroUsize;

use lru::LruCache;

use furniture_core::{
    types::{GlyphId, GlyphOutline, OutlineMode},
    VariationSettings,
};

/// Default number of outlines kept per face
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(512) {
    Some(v) => v,
    None => unreachable!(),
};

/// Uniquely identifies an extracted outline
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutlineCacheKey {
    pub glyph_id: GlyphId,
    pub mode: OutlineMode,
    /// Axis coordinates in thousandths, for hash stability
    pub coords: Vec<(String, i32)>,
}

impl OutlineCacheKey {
    pub fn new(glyph_id: GlyphId, mode: OutlineMode, variations: &VariationSettings) -> Self {
        let coords = variations
            .iter()
            .map(|(tag, value)| (tag.to_string(), (value * 1000.0).round() as i32))
            .collect();
        Self {
            glyph_id,
            mode,
            coords,
        }
    }
}

/// LRU store of extracted outlines
pub struct OutlineCache {
    cache: LruCache<OutlineCacheKey, GlyphOutline>,
    hits: u64,
    misses: u64,
}

impl OutlineCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, key: &OutlineCacheKey) -> Option<GlyphOutline> {
        match self.cache.get(key) {
            Some(outline) => {
                self.hits += 1;
                Some(outline.clone())
            },
            None => {
                self.misses += 1;
                None
            },
        }
    }

    pub fn insert(&mut self, key: OutlineCacheKey, outline: GlyphOutline) {
        self.cache.put(key, outline);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn stats(&self) -> OutlineCacheStats {
        OutlineCacheStats {
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

impl Default for OutlineCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY.get())
    }
}

/// Outline cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineCacheStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

impl OutlineCacheStats {
    /// Hits over lookups, 0.0 before the first lookup
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
