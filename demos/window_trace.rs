use lzss::codec::{Token, TokenIterator, encoder};
use lzss::hash::{MatchFinder, hash_key};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = b"abcabcabcabc-xyz-abcabc-xyz";
    let finder = MatchFinder::new(input);
    println!(
        "indexed {} positions in {} buckets",
        finder.index().len(),
        finder.index().size()
    );

    // Match finder view: what the encoder sees at each position.
    for cursor in 0..input.len().saturating_sub(2) {
        let key = hash_key(input, cursor);
        let bucket = finder.index().bucket(key).len();
        match finder.find(cursor) {
            Some(m) => println!(
                "pos {cursor:>3} key {key:>4} ({bucket} in bucket): match at {} len {} (distance {})",
                m.position,
                m.length,
                cursor - m.position
            ),
            None => println!("pos {cursor:>3} key {key:>4} ({bucket} in bucket): no candidate"),
        }
    }

    // Token view of the resulting stream.
    let packed = encoder::encode(input)?;
    for token in TokenIterator::new(&packed) {
        match token? {
            Token::Literal(b) => println!("LIT  {:?}", b as char),
            Token::Match { offset, length } => {
                println!("COPY distance {} length {length}", offset as usize + 1)
            }
        }
    }

    Ok(())
}
