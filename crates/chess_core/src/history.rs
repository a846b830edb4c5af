//! Repetition tracking shared between a position and its simulations.
//!
//! The history is a persistent list: recording a signature pushes a new head and
//! leaves the previous list untouched, so cloning a [`Position`](crate::Position)
//! for simulation shares every earlier entry instead of copying a map.

use std::sync::Arc;

#[derive(Debug)]
struct Entry {
    signature: u64,
    /// Occurrences of `signature` up to and including this entry.
    count: u32,
    /// Highest count reached by any signature so far.
    peak: u32,
    prev: Option<Arc<Entry>>,
}

#[derive(Clone, Debug, Default)]
pub struct History {
    head: Option<Arc<Entry>>,
    len: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `signature` and return how often it has now been seen.
    ///
    /// Only the last `lookback` entries can hold an earlier occurrence: an
    /// irreversible move (capture or pawn move) changes the placement for good,
    /// so the halfmove clock bounds the search.
    pub fn record(&mut self, signature: u64, lookback: u32) -> u32 {
        let count = self.find(signature, lookback).map_or(1, |e| e.count + 1);
        let peak = self.peak().max(count);
        self.head = Some(Arc::new(Entry {
            signature,
            count,
            peak,
            prev: self.head.take(),
        }));
        self.len += 1;
        count
    }

    /// Occurrences of `signature` in the recorded history.
    pub fn occurrences(&self, signature: u64) -> u32 {
        self.find(signature, u32::MAX).map_or(0, |e| e.count)
    }

    /// Highest occurrence count of any signature.
    pub fn peak(&self) -> u32 {
        self.head.as_ref().map_or(0, |e| e.peak)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn find(&self, signature: u64, lookback: u32) -> Option<&Entry> {
        let mut cursor = self.head.as_deref();
        let mut remaining = lookback;
        while let Some(entry) = cursor {
            if remaining == 0 {
                return None;
            }
            if entry.signature == signature {
                return Some(entry);
            }
            remaining -= 1;
            cursor = entry.prev.as_deref();
        }
        None
    }
}

impl Drop for Entry {
    // Unlink iteratively so long games don't recurse once per ply on drop.
    fn drop(&mut self) {
        let mut next = self.prev.take();
        while let Some(entry) = next {
            match Arc::try_unwrap(entry) {
                Ok(mut inner) => next = inner.prev.take(),
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
