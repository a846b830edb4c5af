//! Bounded transposition cache for minimax scores.

use std::num::NonZeroUsize;

use chess_core::Execution;
use lru::LruCache;

/// Identifies one scored subtree: the position before the execution, the
/// execution itself and the remaining depth below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub state: u64,
    pub execution: Execution,
    pub depth: u8,
}

/// LRU map from [`CacheKey`] to a minimax score.
///
/// One cache serves one evaluator; scores from different evaluators must not share it.
pub struct TranspositionCache {
    entries: LruCache<CacheKey, i64>,
    hits: u64,
    misses: u64,
}

impl TranspositionCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, key: &CacheKey) -> Option<i64> {
        match self.entries.get(key) {
            Some(&score) => {
                self.hits += 1;
                Some(score)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: CacheKey, score: i64) {
        self.entries.put(key, score);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
