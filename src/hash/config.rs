// Hash index parameters.
//
// The bucket count only affects encoder speed and memory; it never shows up
// in the compressed stream.

use crate::codec::format::MIN_MATCH;

/// Number of hash buckets.
pub const HASH_SIZE: usize = 1024;

/// Left shift applied to the running key before each byte is mixed in.
pub const HASH_SHIFT: u32 = 5;

/// Bytes hashed per position (the shortest codable match).
pub const HASH_LOOK: usize = MIN_MATCH;
