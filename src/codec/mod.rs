// LZSS stream format: tokens, flag groups, encoder and decoder.
//
// A stream is a sequence of flag groups: one flag byte whose bits (LSB first)
// describe up to eight tokens, followed by their payloads. A set bit is a
// literal byte; a clear bit is an offset byte and a length byte for a
// back-reference into the preceding 256 bytes of output.
//
// # Modules
//
// - `format`:  Wire constants (window size, length range) and size bounds
// - `token`:   Literal / back-reference token and its payload layout
// - `flags`:   Encode-side flag packer
// - `encoder`: Cursor walk over the input, token emission
// - `decoder`: Token parsing and output reconstruction

pub mod decoder;
pub mod encoder;
pub mod flags;
pub mod format;
pub mod token;

// Re-export key types for convenience.
pub use decoder::{DecodeError, Decoded, StopReason, TokenIterator, decode, decode_detailed};
pub use encoder::{EncodeError, Encoded, encode, encode_detailed};
pub use flags::FlagPacker;
pub use format::{MAX_CODED, MAX_UNENCODED, MIN_MATCH, WINDOW_SIZE};
pub use token::Token;
