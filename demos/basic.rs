//! Example of encoding and decoding UTF-64 text

use base64::engine::{general_purpose, GeneralPurpose};
use base64::Engine;
use utf64::{alphabet, DecodeConfig, Decoder, Encoder};

fn main() -> anyhow::Result<()> {
    println!("=== UTF-64 Example ===\n");

    let samples = ["hello", "Hello, world!", "{\"hello\":[\"world\",\"!\"]}", "こんにちは", "🇺🇸"];

    let encoder = Encoder::new();
    for text in samples {
        println!("{:<28} -> {}", text, encoder.encode(text));
    }

    // Decode with warnings for accepted but non-canonical units
    let decoder = Decoder::new().with_verbose(1);
    let decoded = decoder.decode("oneRtwoXfthree")?;
    println!("\nLenient decode: {:?}", decoded);

    let strict = Decoder::new().with_config(DecodeConfig::strict());
    match strict.decode("oneRtwoXfthree") {
        Ok(text) => println!("Strict decode: {:?}", text),
        Err(e) => println!("Strict decode failed: {}", e),
    }

    // Binary payloads can share the same symbol set via base64
    let engine = GeneralPurpose::new(alphabet::base64_alphabet(), general_purpose::NO_PAD);
    let payload = engine.encode([0xFF, 0xD8, 0xFF, 0xE0]);
    println!("\nBytes in the UTF-64 alphabet: {}", payload);
    assert!(payload.chars().all(|c| alphabet::index_of(c).is_some()));

    Ok(())
}
