// LZSS engine: high-level compress/decompress over byte buffers.
//
// Ties the hash/matching modules and the stream format together behind the
// two calls most users need, plus the decoder's output ceiling as an option.

use crate::codec::decoder::{self, DecodeError, Decoded};
use crate::codec::encoder::{self, EncodeError};
use crate::codec::format::DEFAULT_MAX_OUTPUT;

// ---------------------------------------------------------------------------
// Decode options
// ---------------------------------------------------------------------------

/// Configuration for decompression.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// No token is started once this many bytes have been produced.
    pub max_output_size: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_output_size: DEFAULT_MAX_OUTPUT,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_output_size(max_output_size: usize) -> Self {
        Self { max_output_size }
    }
}

// ---------------------------------------------------------------------------
// High-level encode
// ---------------------------------------------------------------------------

/// Compress `input`.
///
/// Each call builds and drops its own hash index, so calls on different
/// threads never interfere.
pub fn compress(input: &[u8]) -> Result<Vec<u8>, EncodeError> {
    encoder::encode(input)
}

// ---------------------------------------------------------------------------
// High-level decode
// ---------------------------------------------------------------------------

/// Decompress `data` with the default output ceiling (4096 bytes).
///
/// The token that crosses the ceiling is expanded in full, so the result
/// can be slightly longer than the ceiling.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, DecodeError> {
    decompress_with_options(data, &DecodeOptions::default())
}

/// Decompress with custom options.
pub fn decompress_with_options(data: &[u8], opts: &DecodeOptions) -> Result<Vec<u8>, DecodeError> {
    decoder::decode(data, opts.max_output_size)
}

/// Decompress with custom options, reporting why decoding stopped.
pub fn decompress_detailed(data: &[u8], opts: &DecodeOptions) -> Result<Decoded, DecodeError> {
    decoder::decode_detailed(data, opts.max_output_size)
}

// ---------------------------------------------------------------------------
// Stats helpers
// ---------------------------------------------------------------------------

/// Compressed size as a percentage of the original size.
///
/// `None` for an empty original.
pub fn compression_ratio(original_len: u64, compressed_len: u64) -> Option<f64> {
    (original_len > 0).then(|| compressed_len as f64 * 100.0 / original_len as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decoder::StopReason;

    fn roundtrip(data: &[u8]) {
        let packed = compress(data).unwrap();
        let opts = DecodeOptions::with_max_output_size(data.len());
        let unpacked = decompress_with_options(&packed, &opts).unwrap();
        assert_eq!(unpacked, data);
    }

    #[test]
    fn roundtrip_small() {
        roundtrip(b"");
        roundtrip(b"a");
        roundtrip(b"hello hello hello hello");
        roundtrip(b"The quick brown fox jumps over the lazy dog. The quick brown fox.");
    }

    #[test]
    fn roundtrip_beyond_default_ceiling() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 97) as u8 ^ (i / 300) as u8).collect();
        roundtrip(&data);
    }

    #[test]
    fn default_ceiling_is_4096() {
        let data = vec![0x5Au8; 10_000];
        let packed = compress(&data).unwrap();
        let out = decompress(&packed).unwrap();
        // One literal, then 258-byte copies until 4096 is crossed.
        assert_eq!(out.len(), 1 + 258 * 16);
        assert!(out.iter().all(|&b| b == 0x5A));

        let d = decompress_detailed(&packed, &DecodeOptions::default()).unwrap();
        assert_eq!(d.stop, StopReason::OutputLimit);
    }

    #[test]
    fn ratio() {
        assert_eq!(compression_ratio(0, 0), None);
        assert_eq!(compression_ratio(200, 50), Some(25.0));
        assert_eq!(compression_ratio(8, 9), Some(112.5));
    }

    #[test]
    fn concurrent_compress_calls_are_independent() {
        let inputs: Vec<Vec<u8>> = (0..4u8)
            .map(|seed| (0..5000u32).map(|i| (i as u8).wrapping_mul(seed + 1) % 17).collect())
            .collect();
        let expected: Vec<Vec<u8>> = inputs.iter().map(|d| compress(d).unwrap()).collect();

        std::thread::scope(|s| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|d| s.spawn(move || compress(d).unwrap()))
                .collect();
            for (h, want) in handles.into_iter().zip(&expected) {
                assert_eq!(&h.join().unwrap(), want);
            }
        });
    }
}
