// Longest-match search over the hash index.
//
// For a cursor, every bucket entry inside the window is tried oldest-first.
// A candidate only counts if its first byte agrees (buckets can collide), and
// is then extended byte by byte up to `MAX_CODED`. The first candidate to
// reach a given length keeps it; a later one must be strictly longer. The
// scan stops as soon as a candidate reaches `MAX_CODED`.

use super::config::HASH_LOOK;
use super::table::{HashIndex, hash_key};
use crate::codec::format::MAX_CODED;

// ---------------------------------------------------------------------------
// Match result
// ---------------------------------------------------------------------------

/// An earlier occurrence of the bytes at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Absolute position of the earlier occurrence.
    pub position: usize,
    /// Number of bytes that agree, `1..=MAX_CODED`.
    pub length: usize,
}

// ---------------------------------------------------------------------------
// Match finder
// ---------------------------------------------------------------------------

/// Match finder over one input buffer.
///
/// Owns the hash index for that buffer. Create one per encode call.
pub struct MatchFinder<'a> {
    data: &'a [u8],
    index: HashIndex,
}

impl<'a> MatchFinder<'a> {
    /// Build the index for `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            index: HashIndex::build(data),
        }
    }

    /// The underlying index.
    pub fn index(&self) -> &HashIndex {
        &self.index
    }

    /// Best match for the bytes at `cursor`, or `None` when no in-window
    /// candidate shares even the first byte.
    ///
    /// Returns `None` without searching when fewer than `HASH_LOOK` bytes
    /// remain. A returned match may be shorter than a codable match; the
    /// caller decides whether it is worth a back-reference.
    pub fn find(&self, cursor: usize) -> Option<Match> {
        let data = self.data;
        if cursor + HASH_LOOK > data.len() {
            return None;
        }

        let key = hash_key(data, cursor);
        let mut best: Option<Match> = None;

        for &candidate in self.index.candidates(key, cursor) {
            if data[candidate] != data[cursor] {
                continue;
            }

            let length = extend_match(data, candidate, cursor);
            if best.is_none_or(|b| length > b.length) {
                best = Some(Match {
                    position: candidate,
                    length,
                });
            }
            if length >= MAX_CODED {
                break;
            }
        }

        best
    }
}

/// Number of agreeing bytes between `candidate` and `cursor`, given that the
/// first byte already agrees. Capped at `MAX_CODED` and at the end of `data`.
#[inline]
fn extend_match(data: &[u8], candidate: usize, cursor: usize) -> usize {
    let mut len = 1;
    while len < MAX_CODED
        && cursor + len < data.len()
        && data[candidate + len] == data[cursor + len]
    {
        len += 1;
    }
    len
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
