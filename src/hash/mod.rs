// Hash index and match finding for the LZSS encoder.
//
// This module provides:
// - Bucket sizing and key parameters (`config`)
// - The per-call hash index of 3-byte prefixes (`table`)
// - Longest-match search inside the 256-byte window (`matching`)

pub mod config;
pub mod matching;
pub mod table;

pub use matching::{Match, MatchFinder};
pub use table::{HashIndex, hash_key};
