#![no_main]
use libfuzzer_sys::fuzz_target;
use lzss::codec::{MAX_CODED, TokenIterator, decoder};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode or fail with an error, never panic, and
    // never start a token past the ceiling.
    let limit = data.first().map_or(0, |&b| b as usize * 64);
    if let Ok(d) = decoder::decode_detailed(data, limit) {
        assert!(d.data.len() < limit + MAX_CODED);
    }

    // The token walk must agree with full decoding on validity.
    let walk: Result<Vec<_>, _> = TokenIterator::new(data).collect();
    let full = decoder::decode(data, usize::MAX >> 1);
    assert_eq!(walk.is_ok(), full.is_ok());
});
