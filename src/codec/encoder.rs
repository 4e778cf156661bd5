// LZSS encoder.
//
// The whole input is indexed up front. The cursor then walks forward: at
// each step the match finder is asked for the best earlier occurrence, and
// either a back-reference (match longer than `MAX_UNENCODED`) or a single
// literal is handed to the flag packer.

use log::debug;
use thiserror::Error;

use super::flags::FlagPacker;
use super::format::{MAX_UNENCODED, MIN_MATCH, max_compressed_len};
use super::token::Token;
use crate::hash::matching::{Match, MatchFinder};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A back-reference could not be stored in its one-byte field.
///
/// The match finder's window and length caps keep both values in range, so
/// this indicates a broken invariant. The encode is abandoned and no output
/// is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("match offset out of range at position {position}: {offset}")]
    OffsetOutOfRange { position: usize, offset: isize },
    #[error("match length out of range at position {position}: {length}")]
    LengthOutOfRange { position: usize, length: usize },
}

// ---------------------------------------------------------------------------
// Encoded output
// ---------------------------------------------------------------------------

/// Compressed stream plus token counts.
#[derive(Debug, Clone, Default)]
pub struct Encoded {
    pub data: Vec<u8>,
    pub literals: usize,
    pub matches: usize,
}

impl Encoded {
    /// Total number of tokens written.
    pub fn tokens(&self) -> usize {
        self.literals + self.matches
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Compress `input`.
///
/// An empty input compresses to an empty stream.
pub fn encode(input: &[u8]) -> Result<Vec<u8>, EncodeError> {
    encode_detailed(input).map(|e| e.data)
}

/// Compress `input` and report how many literals and back-references were
/// emitted.
pub fn encode_detailed(input: &[u8]) -> Result<Encoded, EncodeError> {
    if input.is_empty() {
        return Ok(Encoded::default());
    }

    let finder = MatchFinder::new(input);
    let mut packer = FlagPacker::new();
    let mut out = Encoded {
        data: Vec::with_capacity(max_compressed_len(input.len())),
        ..Default::default()
    };

    let mut cursor = 0usize;
    while cursor < input.len() {
        let remaining = input.len() - cursor;
        let found = finder.find(cursor).map(|m| Match {
            length: m.length.min(remaining),
            ..m
        });

        match found {
            Some(m) if m.length > MAX_UNENCODED => {
                packer.push(match_token(cursor, m)?, &mut out.data);
                out.matches += 1;
                cursor += m.length;
            }
            _ => {
                packer.push(Token::Literal(input[cursor]), &mut out.data);
                out.literals += 1;
                cursor += 1;
            }
        }
    }
    packer.finish(&mut out.data);

    debug!(
        "encoded {} -> {} bytes ({} literals, {} matches, {} groups, {} indexed positions)",
        input.len(),
        out.data.len(),
        out.literals,
        out.matches,
        packer.groups_written(),
        finder.index().len()
    );
    Ok(out)
}

/// Convert a match found at `cursor` into its stored form.
fn match_token(cursor: usize, m: Match) -> Result<Token, EncodeError> {
    let offset = cursor as isize - 1 - m.position as isize;
    let offset = u8::try_from(offset).map_err(|_| EncodeError::OffsetOutOfRange {
        position: cursor,
        offset,
    })?;

    let stored = m.length.checked_sub(MIN_MATCH).and_then(|l| u8::try_from(l).ok());
    let Some(stored) = stored else {
        return Err(EncodeError::LengthOutOfRange {
            position: cursor,
            length: m.length,
        });
    };

    Ok(Token::from_payload(offset, stored))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
