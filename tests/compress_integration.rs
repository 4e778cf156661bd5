use lzss::codec::{
    self, DecodeError, MAX_CODED, StopReason, Token, TokenIterator, WINDOW_SIZE, decode,
    decode_detailed, encode, encode_detailed,
};
use lzss::engine::{self, DecodeOptions};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

fn roundtrip(data: &[u8]) -> Vec<u8> {
    let packed = encode(data).unwrap();
    let unpacked = decode(&packed, data.len()).unwrap();
    assert_eq!(unpacked, data, "roundtrip mismatch for {} bytes", data.len());
    packed
}

fn tokens(stream: &[u8]) -> Vec<Token> {
    TokenIterator::new(stream).map(Result::unwrap).collect()
}

#[test]
fn empty_input() {
    assert!(encode(b"").unwrap().is_empty());
    assert!(decode(b"", 100).unwrap().is_empty());
    assert!(decode(b"", 0).unwrap().is_empty());
}

#[test]
fn single_byte_and_short_inputs() {
    assert_eq!(roundtrip(b"x"), [0x01, b'x']);
    assert_eq!(roundtrip(b"ab"), [0x03, b'a', b'b']);
    assert_eq!(roundtrip(b"AAAA"), [0x01, b'A', 0x00, 0x00]);
}

#[test]
fn incompressible_distinct_bytes() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut pool: Vec<u8> = (0..=255).collect();
    pool.shuffle(&mut rng);
    let data = &pool[..50];

    let packed = roundtrip(data);
    // 50 literals in 7 flag groups.
    assert_eq!(packed.len(), 57);
    assert!(packed.len() >= (50 * 9usize).div_ceil(8));
}

#[test]
fn random_bytes_roundtrip_and_bound() {
    let mut rng = StdRng::seed_from_u64(42);
    for len in [1usize, 7, 8, 9, 255, 256, 257, 1000, 5000] {
        let data: Vec<u8> = (0..len).map(|_| rng.random::<u8>()).collect();
        let packed = roundtrip(&data);
        assert!(packed.len() <= codec::format::max_compressed_len(len));
    }
}

#[test]
fn long_run_compresses_well() {
    let data = vec![b'A'; 1000];
    let packed = roundtrip(&data);
    assert_eq!(
        packed,
        [0x01, b'A', 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xDE]
    );
}

#[test]
fn window_boundary_distance_256_is_matchable() {
    let mut data = vec![253u8, 254, 255];
    data.extend(0..=252u8);
    data.extend([253u8, 254, 255]);
    assert_eq!(data.len(), WINDOW_SIZE + 3);

    let packed = roundtrip(&data);
    assert_eq!(
        tokens(&packed).last(),
        Some(&Token::Match {
            offset: 255,
            length: 3
        })
    );
}

#[test]
fn window_boundary_distance_257_is_not() {
    let mut data = vec![253u8, 254, 255];
    data.extend(std::iter::repeat_n(0u8, 254));
    data.extend([253u8, 254, 255]);

    let packed = roundtrip(&data);
    let toks = tokens(&packed);
    assert!(toks[toks.len() - 3..].iter().all(Token::is_literal));
}

#[test]
fn longest_match_is_258() {
    // Seed byte then 258 repeats: one literal and one full-length match.
    let data = vec![b'A'; 1 + MAX_CODED];
    let packed = roundtrip(&data);
    assert_eq!(packed, [0x01, b'A', 0x00, 0xFF]);

    // One more byte needs another token.
    let data = vec![b'A'; 2 + MAX_CODED];
    let packed = roundtrip(&data);
    assert_eq!(packed, [0x05, b'A', 0x00, 0xFF, b'A']);
}

#[test]
fn self_overlapping_copy() {
    let out = decode(&[0x01, b'A', 0x00, 0x05], 100).unwrap();
    assert_eq!(out, b"AAAAAAAAA");

    let out = decode(&[0x03, b'A', b'B', 0x01, 0x03], 100).unwrap();
    assert_eq!(out, b"ABABABAB");
}

#[test]
fn truncated_stream_keeps_prefix() {
    let packed = encode(b"ABABABAB").unwrap();
    assert_eq!(packed, [0x03, b'A', b'B', 0x01, 0x03]);

    let d = decode_detailed(&packed[..4], 100).unwrap();
    assert_eq!(d.data, b"AB");
    assert_eq!(d.stop, StopReason::Truncated);

    let d = decode_detailed(&packed[..3], 100).unwrap();
    assert_eq!(d.data, b"AB");
    assert_eq!(d.stop, StopReason::EndOfStream);
}

#[test]
fn output_ceiling_finishes_crossing_copy() {
    // Literal, then copies of 258, 258 and 83 bytes.
    let packed = encode(&[b'z'; 600]).unwrap();
    let d = decode_detailed(&packed, 100).unwrap();
    assert_eq!(d.data, vec![b'z'; 259]);
    assert_eq!(d.stop, StopReason::OutputLimit);
    assert_eq!(d.tokens, 2);

    let d = decode_detailed(&packed, 259).unwrap();
    assert_eq!(d.data.len(), 259);
    assert_eq!(d.stop, StopReason::OutputLimit);

    let d = decode_detailed(&packed, 260).unwrap();
    assert_eq!(d.data.len(), 517);

    let d = decode_detailed(&packed, 600).unwrap();
    assert_eq!(d.data.len(), 600);
    assert_eq!(d.stop, StopReason::EndOfStream);
}

#[test]
fn corrupt_back_reference_is_an_error() {
    let err = decode(&[0x00, 0x04, 0x00], 100).unwrap_err();
    assert_eq!(
        err,
        DecodeError::InvalidBackReference {
            position: 0,
            distance: 5
        }
    );
}

#[test]
fn detailed_counts_match_token_stream() {
    let text = b"It was the best of times, it was the worst of times, it was the age of wisdom";
    let enc = encode_detailed(text).unwrap();
    let toks = tokens(&enc.data);
    assert_eq!(toks.len(), enc.tokens());
    assert_eq!(toks.iter().filter(|t| t.is_literal()).count(), enc.literals);
    assert!(enc.matches > 0);

    let out_len: usize = toks.iter().map(Token::output_len).sum();
    assert_eq!(out_len, text.len());
}

#[test]
fn engine_default_ceiling() {
    let data: Vec<u8> = (0..10_000u32).map(|i| (i % 200) as u8).collect();
    let packed = engine::compress(&data).unwrap();
    let out = engine::decompress(&packed).unwrap();
    assert!(out.len() >= 4096 && out.len() < 4096 + MAX_CODED);
    assert!(data.starts_with(&out));

    let opts = DecodeOptions::with_max_output_size(data.len());
    assert_eq!(engine::decompress_with_options(&packed, &opts).unwrap(), data);
}

#[test]
fn mixed_text_roundtrips() {
    let mut rng = StdRng::seed_from_u64(7);
    let words = ["lorem", "ipsum", "dolor", "sit", "amet", " ", "\n", "consectetur"];
    let mut data = Vec::new();
    while data.len() < 20_000 {
        let w = words[rng.random_range(0..words.len())];
        data.extend_from_slice(w.as_bytes());
    }
    let packed = roundtrip(&data);
    assert!(packed.len() < data.len() * 3 / 4);
}
