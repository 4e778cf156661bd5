// LZSS decoder: token parsing and output reconstruction.
//
// The stream has no header and no terminator. Decoding ends when the input
// runs out or when the caller's output ceiling is reached; neither is an
// error. A back-reference is expanded one byte at a time, each byte read from
// `distance` bytes behind the current output end, so a copy longer than its
// distance repeats the bytes it has just written.
//
// The output ceiling is checked between tokens only. A token that starts
// below the ceiling is always expanded in full, so the last back-reference
// may carry the output up to `MAX_CODED - 1` bytes past it.
//
// `TokenIterator` does the parsing and is usable on its own for inspecting a
// stream. `decode_detailed` drives it and expands the tokens.

use log::debug;
use thiserror::Error;

use super::format::FLAG_GROUP_TOKENS;
use super::token::Token;

// ---------------------------------------------------------------------------
// Decoder error
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A back-reference reaches before the first output byte.
    #[error(
        "invalid back-reference at output position {position}: distance {distance} exceeds decoded length"
    )]
    InvalidBackReference { position: usize, distance: usize },
}

// ---------------------------------------------------------------------------
// Stop reason
// ---------------------------------------------------------------------------

/// Why decoding stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Input ended on a token boundary.
    EndOfStream,
    /// Input ended between the two payload bytes of a back-reference.
    Truncated,
    /// Output reached the caller's ceiling with input left over.
    OutputLimit,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EndOfStream => "end-of-stream",
            Self::Truncated => "truncated",
            Self::OutputLimit => "output-limit",
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Token iterator
// ---------------------------------------------------------------------------

/// Parses a compressed stream into tokens without expanding them.
///
/// Tracks the output length the tokens would produce, so back-references
/// that reach before the start of the output are reported as errors. After
/// the first `None` (or error) the iterator is fused; `stop_reason` tells
/// why it ended.
pub struct TokenIterator<'a> {
    data: &'a [u8],
    pos: usize,
    /// Unconsumed flag bits of the current group, LSB next.
    flags: u8,
    /// Flag bits left in the current group.
    flags_left: usize,
    /// Output length produced by the tokens yielded so far.
    produced: usize,
    stop: Option<StopReason>,
    failed: bool,
}

impl<'a> TokenIterator<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            flags: 0,
            flags_left: 0,
            produced: 0,
            stop: None,
            failed: false,
        }
    }

    /// Input bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Output length of the tokens yielded so far.
    pub fn output_position(&self) -> usize {
        self.produced
    }

    /// Whether every input byte has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Why iteration ended, once it has.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop
    }

    #[inline]
    fn next_byte(&mut self) -> Option<u8> {
        let b = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }

    fn end(&mut self, reason: StopReason) -> Option<Result<Token, DecodeError>> {
        self.stop = Some(reason);
        None
    }
}

impl Iterator for TokenIterator<'_> {
    type Item = Result<Token, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stop.is_some() || self.failed {
            return None;
        }

        if self.flags_left == 0 {
            let Some(flags) = self.next_byte() else {
                return self.end(StopReason::EndOfStream);
            };
            self.flags = flags;
            self.flags_left = FLAG_GROUP_TOKENS;
        }

        let literal = self.flags & 1 != 0;
        self.flags >>= 1;
        self.flags_left -= 1;

        let token = if literal {
            let Some(b) = self.next_byte() else {
                return self.end(StopReason::EndOfStream);
            };
            Token::Literal(b)
        } else {
            let Some(offset) = self.next_byte() else {
                return self.end(StopReason::EndOfStream);
            };
            let Some(stored) = self.next_byte() else {
                return self.end(StopReason::Truncated);
            };
            let token = Token::from_payload(offset, stored);
            let distance = offset as usize + 1;
            if distance > self.produced {
                self.failed = true;
                return Some(Err(DecodeError::InvalidBackReference {
                    position: self.produced,
                    distance,
                }));
            }
            token
        };

        self.produced += token.output_len();
        Some(Ok(token))
    }
}

impl std::iter::FusedIterator for TokenIterator<'_> {}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decoded output plus how decoding ended.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub data: Vec<u8>,
    pub stop: StopReason,
    /// Tokens expanded.
    pub tokens: usize,
}

/// Decompress `data`, stopping at the first token boundary at or past
/// `max_output_size` bytes.
pub fn decode(data: &[u8], max_output_size: usize) -> Result<Vec<u8>, DecodeError> {
    decode_detailed(data, max_output_size).map(|d| d.data)
}

/// Decompress `data` and report why decoding stopped.
///
/// No new token is started once the output holds `max_output_size` bytes.
/// The token that crosses the ceiling is still expanded completely.
pub fn decode_detailed(data: &[u8], max_output_size: usize) -> Result<Decoded, DecodeError> {
    let mut output = Vec::with_capacity(max_output_size.min(data.len().saturating_mul(2)));
    let mut iter = TokenIterator::new(data);
    let mut tokens = 0usize;

    let stop = loop {
        if output.len() >= max_output_size {
            break if iter.at_end() {
                StopReason::EndOfStream
            } else {
                StopReason::OutputLimit
            };
        }

        let Some(token) = iter.next() else {
            break iter.stop_reason().unwrap_or(StopReason::EndOfStream);
        };

        let token = token?;
        tokens += 1;
        match token {
            Token::Literal(b) => output.push(b),
            Token::Match { offset, length } => {
                let distance = offset as usize + 1;
                for _ in 0..length {
                    let b = output[output.len() - distance];
                    output.push(b);
                }
            }
        }
    };

    debug!(
        "decoded {} -> {} bytes ({} tokens, stopped: {stop})",
        data.len(),
        output.len(),
        tokens
    );
    Ok(Decoded {
        data: output,
        stop,
        tokens,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
