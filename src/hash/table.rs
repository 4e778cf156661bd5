// Hash index for LZSS match finding.
//
// Every position that still has `HASH_LOOK` bytes ahead of it is hashed once
// and appended to its bucket. Buckets are filled in a single ascending pass,
// so each one is a sorted list of positions. The match finder relies on that
// ordering twice: candidates are scanned oldest-first (which fixes the
// tie-break between equal-length matches), and the in-window slice of a
// bucket can be located with a binary search.

use super::config::{HASH_LOOK, HASH_SHIFT, HASH_SIZE};
use crate::codec::format::WINDOW_SIZE;

/// Hash key of the `HASH_LOOK` bytes starting at `pos`.
///
/// Each byte is folded in as `key = ((key << HASH_SHIFT) ^ byte) % HASH_SIZE`.
///
/// # Panics
///
/// Panics if fewer than `HASH_LOOK` bytes are available at `pos`.
#[inline(always)]
pub fn hash_key(data: &[u8], pos: usize) -> usize {
    data[pos..pos + HASH_LOOK]
        .iter()
        .fold(0, |key, &b| ((key << HASH_SHIFT) ^ b as usize) % HASH_SIZE)
}

/// Immutable index from hash key to ascending input positions.
///
/// Built once per encode call and owned by it; nothing is shared between
/// calls.
pub struct HashIndex {
    buckets: Vec<Vec<usize>>,
    positions: usize,
}

impl HashIndex {
    /// Index every hashable position of `data`.
    ///
    /// All `HASH_SIZE` buckets exist afterwards, including empty ones.
    pub fn build(data: &[u8]) -> Self {
        let mut buckets = vec![Vec::new(); HASH_SIZE];
        let hashable = data.len().saturating_sub(HASH_LOOK - 1);
        for pos in 0..hashable {
            buckets[hash_key(data, pos)].push(pos);
        }
        Self {
            buckets,
            positions: hashable,
        }
    }

    /// All positions stored under `key`, oldest first.
    #[inline]
    pub fn bucket(&self, key: usize) -> &[usize] {
        &self.buckets[key]
    }

    /// Positions under `key` that lie inside the window behind `cursor`:
    /// `cursor - WINDOW_SIZE <= pos < cursor`, oldest first.
    #[inline]
    pub fn candidates(&self, key: usize, cursor: usize) -> &[usize] {
        let bucket = self.bucket(key);
        let lo = cursor.saturating_sub(WINDOW_SIZE);
        let start = bucket.partition_point(|&p| p < lo);
        let end = start + bucket[start..].partition_point(|&p| p < cursor);
        &bucket[start..end]
    }

    /// Bucket count.
    pub fn size(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of indexed positions.
    pub fn len(&self) -> usize {
        self.positions
    }

    /// Whether no position was indexed (input shorter than `HASH_LOOK`).
    pub fn is_empty(&self) -> bool {
        self.positions == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
