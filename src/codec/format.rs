// Wire-format constants.
//
// These values are fixed by the compressed stream layout. Changing any of
// them produces streams that existing decoders cannot read.

/// Size of the sliding window. A back-reference reaches at most this many
/// bytes behind the cursor.
pub const WINDOW_SIZE: usize = 256;

/// Longest sequence that is always emitted as literals. A two-byte match
/// costs as much as two literal bytes, so only longer matches are coded.
pub const MAX_UNENCODED: usize = 2;

/// Shortest back-reference length that can appear in a stream.
pub const MIN_MATCH: usize = MAX_UNENCODED + 1;

/// Longest back-reference length (`MIN_MATCH + 255`).
pub const MAX_CODED: usize = MAX_UNENCODED + 256;

/// Number of tokens described by one flag byte.
pub const FLAG_GROUP_TOKENS: usize = 8;

/// Largest payload a single flag group can carry (8 back-references).
pub const MAX_GROUP_PAYLOAD: usize = FLAG_GROUP_TOKENS * 2;

/// Default output ceiling for the library decoder.
pub const DEFAULT_MAX_OUTPUT: usize = 4096;

/// Default output ceiling used by the command-line decompressor.
pub const CLI_DEFAULT_MAX_OUTPUT: usize = 65535;

/// Upper bound on the compressed size of `input_len` bytes.
///
/// The worst case is all literals: one payload byte per input byte plus one
/// flag byte per group of eight.
pub const fn max_compressed_len(input_len: usize) -> usize {
    input_len + input_len.div_ceil(FLAG_GROUP_TOKENS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_range_fits_one_byte() {
        assert_eq!(MAX_CODED - MIN_MATCH, u8::MAX as usize);
        assert_eq!(MIN_MATCH, 3);
        assert_eq!(MAX_CODED, 258);
    }

    #[test]
    fn window_offsets_fit_one_byte() {
        assert_eq!(WINDOW_SIZE - 1, u8::MAX as usize);
    }

    #[test]
    fn worst_case_bound() {
        assert_eq!(max_compressed_len(0), 0);
        assert_eq!(max_compressed_len(1), 2);
        assert_eq!(max_compressed_len(8), 9);
        assert_eq!(max_compressed_len(9), 11);
        assert_eq!(max_compressed_len(50), 57);
    }
}
