// LZSS tokens: one literal byte or one back-reference.
//
// A token's flag bit is 1 for a literal and 0 for a back-reference. The
// payload is the literal byte itself, or an offset byte followed by a stored
// length byte.

use super::format::{MAX_CODED, MIN_MATCH};

/// One unit of the compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A single uncompressed byte.
    Literal(u8),
    /// Copy `length` bytes starting `offset + 1` bytes behind the output end.
    ///
    /// `length` is the real copy length, `MIN_MATCH..=MAX_CODED`.
    Match { offset: u8, length: u16 },
}

impl Token {
    /// Build a back-reference from its two payload bytes.
    #[inline]
    pub fn from_payload(offset: u8, stored_length: u8) -> Self {
        Self::Match {
            offset,
            length: stored_length as u16 + MIN_MATCH as u16,
        }
    }

    /// Flag bit for this token: `true` for a literal.
    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Number of output bytes this token expands to.
    #[inline]
    pub fn output_len(&self) -> usize {
        match *self {
            Self::Literal(_) => 1,
            Self::Match { length, .. } => length as usize,
        }
    }

    /// Number of payload bytes this token occupies in the stream.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Literal(_) => 1,
            Self::Match { .. } => 2,
        }
    }

    /// Backward distance of a back-reference (`offset + 1`).
    #[inline]
    pub fn distance(&self) -> Option<usize> {
        match *self {
            Self::Literal(_) => None,
            Self::Match { offset, .. } => Some(offset as usize + 1),
        }
    }

    /// Write the payload into `buf` and return its length.
    ///
    /// `buf` must hold at least two bytes.
    #[inline]
    pub fn write_payload(&self, buf: &mut [u8]) -> usize {
        match *self {
            Self::Literal(b) => {
                buf[0] = b;
                1
            }
            Self::Match { offset, length } => {
                debug_assert!((MIN_MATCH..=MAX_CODED).contains(&(length as usize)));
                buf[0] = offset;
                buf[1] = (length as usize - MIN_MATCH) as u8;
                2
            }
        }
    }
}
