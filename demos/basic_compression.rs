use std::env;
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sample = match env::args().nth(1) {
        Some(path) => fs::read(path)?,
        None => b"Hello, world! This is a sample text for Huffman compression. \
                  The quick brown fox jumps over the lazy dog. \
                  Huffman encoding is a greedy algorithm that builds optimal prefix codes."
            .to_vec(),
    };

    let compressed = huffpack::compress(&sample)?;
    let ratio = compressed.len() as f64 / sample.len().max(1) as f64;
    println!(
        "compressed {} bytes to {} bytes ({:.1}% of original)",
        sample.len(),
        compressed.len(),
        ratio * 100.0
    );
    if compressed.len() >= sample.len() {
        println!("output is not smaller; a caller would store the raw bytes instead");
    }

    let restored = huffpack::decompress(&compressed)?;
    if restored != sample {
        return Err("decompressed data does not match".into());
    }
    println!("round trip ok");
    Ok(())
}
