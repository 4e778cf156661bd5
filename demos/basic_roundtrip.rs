use lzss::engine::{self, DecodeOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = b"It was the best of times, it was the worst of times, it was the age of wisdom";

    let packed = engine::compress(input)?;

    let opts = DecodeOptions::with_max_output_size(input.len());
    let restored = engine::decompress_with_options(&packed, &opts)?;
    assert_eq!(restored, input);

    println!(
        "compressed {} bytes -> {} bytes -> restored {} bytes ({:.1}%)",
        input.len(),
        packed.len(),
        restored.len(),
        engine::compression_ratio(input.len() as u64, packed.len() as u64).unwrap_or(0.0)
    );

    Ok(())
}
