// Encode-side flag packer.
//
// Tokens are collected eight at a time. Each one contributes a bit to the
// group's flag byte (LSB first, 1 = literal, 0 = back-reference) and its
// payload to a scratch buffer. When the eighth flag is recorded the flag byte
// and the buffered payload go to the sink and the packer starts over. A
// partial group is written by `finish`, with its unused high bits left 0.

use log::trace;

use super::format::{FLAG_GROUP_TOKENS, MAX_GROUP_PAYLOAD};
use super::token::Token;

/// Accumulates flag bits and payload bytes for one group at a time.
pub struct FlagPacker {
    /// Flag bits recorded so far in this group.
    flags: u8,
    /// Tokens recorded so far in this group (`0..FLAG_GROUP_TOKENS`).
    count: usize,
    /// Payload of the current group.
    pending: [u8; MAX_GROUP_PAYLOAD],
    pending_len: usize,
    /// Number of groups written to the sink.
    groups: u64,
}

impl Default for FlagPacker {
    fn default() -> Self {
        Self::new()
    }
}

impl FlagPacker {
    pub fn new() -> Self {
        Self {
            flags: 0,
            count: 0,
            pending: [0; MAX_GROUP_PAYLOAD],
            pending_len: 0,
            groups: 0,
        }
    }

    /// Record one token's flag and payload, flushing the group to `sink` once
    /// it holds eight tokens.
    ///
    /// `payload` is one byte for a literal and two for a back-reference.
    pub fn record(&mut self, is_match: bool, payload: &[u8], sink: &mut Vec<u8>) {
        debug_assert_eq!(payload.len(), if is_match { 2 } else { 1 });

        if !is_match {
            self.flags |= 1 << self.count;
        }
        let end = self.pending_len + payload.len();
        self.pending[self.pending_len..end].copy_from_slice(payload);
        self.pending_len = end;
        self.count += 1;

        if self.count == FLAG_GROUP_TOKENS {
            self.flush(sink);
        }
    }

    /// Record a token.
    #[inline]
    pub fn push(&mut self, token: Token, sink: &mut Vec<u8>) {
        let mut payload = [0u8; 2];
        let n = token.write_payload(&mut payload);
        self.record(!token.is_literal(), &payload[..n], sink);
    }

    /// Write any partial group to `sink`.
    pub fn finish(&mut self, sink: &mut Vec<u8>) {
        if self.count > 0 {
            self.flush(sink);
        }
    }

    /// Groups written so far.
    pub fn groups_written(&self) -> u64 {
        self.groups
    }

    fn flush(&mut self, sink: &mut Vec<u8>) {
        trace!(
            "flag group {}: flags={:#010b} tokens={} payload={}",
            self.groups, self.flags, self.count, self.pending_len
        );
        sink.push(self.flags);
        sink.extend_from_slice(&self.pending[..self.pending_len]);
        self.flags = 0;
        self.count = 0;
        self.pending_len = 0;
        self.groups += 1;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_recorded_writes_nothing() {
        let mut p = FlagPacker::new();
        let mut out = Vec::new();
        p.finish(&mut out);
        assert!(out.is_empty());
        assert_eq!(p.groups_written(), 0);
    }

    #[test]
    fn eight_literals_flush_immediately() {
        let mut p = FlagPacker::new();
        let mut out = Vec::new();
        for b in b"ABCDEFG" {
            p.push(Token::Literal(*b), &mut out);
        }
        assert!(out.is_empty());
        assert_eq!(p.groups_written(), 0);

        p.push(Token::Literal(b'H'), &mut out);
        assert_eq!(out, b"\xFFABCDEFGH");
        assert_eq!(p.groups_written(), 1);

        // Group already flushed; finish adds nothing.
        p.finish(&mut out);
        assert_eq!(out.len(), 9);
        assert_eq!(p.groups_written(), 1);
    }

    #[test]
    fn match_bits_are_clear() {
        let mut p = FlagPacker::new();
        let mut out = Vec::new();
        p.push(Token::Literal(b'x'), &mut out);
        p.push(Token::from_payload(0, 4), &mut out);
        p.push(Token::Literal(b'y'), &mut out);
        p.finish(&mut out);
        assert_eq!(out, [0b0000_0101, b'x', 0, 4, b'y']);
    }

    #[test]
    fn full_group_of_matches() {
        let mut p = FlagPacker::new();
        let mut out = Vec::new();
        for i in 0..8u8 {
            p.record(true, &[i, 255 - i], &mut out);
        }
        assert_eq!(out.len(), 17);
        assert_eq!(out[0], 0);
        assert_eq!(&out[1..5], &[0, 255, 1, 254]);
    }

    #[test]
    fn second_group_starts_fresh() {
        let mut p = FlagPacker::new();
        let mut out = Vec::new();
        for b in b"ABCDEFGHI" {
            p.push(Token::Literal(*b), &mut out);
        }
        p.finish(&mut out);
        assert_eq!(out, b"\xFFABCDEFGH\x01I");
        assert_eq!(p.groups_written(), 2);
    }
}
