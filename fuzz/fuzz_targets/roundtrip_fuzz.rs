#![no_main]
use libfuzzer_sys::fuzz_target;
use lzss::codec::{decoder, encoder, format::max_compressed_len};

fuzz_target!(|data: &[u8]| {
    let packed = encoder::encode(data).unwrap();
    assert!(packed.len() <= max_compressed_len(data.len()));

    let decoded = decoder::decode(&packed, data.len()).unwrap();
    assert_eq!(decoded, data);
});
