//! Example demonstrating the hash codecs with tracing output.
//!
//! Run with: RUST_LOG=imagehash_core=trace cargo run -p imagehash-core --example dump_tracing

use std::io::Cursor;

use imagehash_core::{ExtendedHash, FixedHash, Kind, SimilarityConfig};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("imagehash_core=trace,info")),
        )
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();

    println!("=== Image Hash Codec Demo ===\n");

    let mut fixed = FixedHash::new(0, Kind::AHash);
    for i in (0..64).step_by(3) {
        fixed.left_shift_set(i);
    }
    println!("Fixed hash:    {}", fixed);

    let mut buf = Vec::new();
    if let Err(e) = fixed.dump(&mut buf) {
        eprintln!("Failed to dump fixed hash: {}", e);
        return;
    }
    println!("Binary form:   {} bytes ({})", buf.len(), hex::encode(&buf));

    match FixedHash::load(&mut Cursor::new(buf)) {
        Ok(loaded) => println!("Loaded back:   {}", loaded),
        Err(e) => eprintln!("Failed to load fixed hash: {}", e),
    }

    let mut extended = match ExtendedHash::with_dimensions(Kind::DHash, 16, 16) {
        Ok(hash) => hash,
        Err(e) => {
            eprintln!("Failed to create extended hash: {}", e);
            return;
        }
    };
    for i in (0..256).step_by(7) {
        extended.left_shift_set(i);
    }
    println!("\nExtended hash: {}", extended);

    let mut other = extended.clone();
    other.set_bit(0, false);
    other.set_bit(255, true);

    let config = SimilarityConfig::from_env();
    match extended.distance(&other) {
        Ok(distance) => println!(
            "Distance:      {} (similar: {})",
            distance,
            distance <= config.threshold_for_bits(extended.bits())
        ),
        Err(e) => eprintln!("Comparison failed: {}", e),
    }

    println!("\nRejected inputs:");
    for text in ["", "k:g", "a:zz"] {
        if let Err(e) = text.parse::<ExtendedHash>() {
            println!("  {:?} -> {}", text, e);
        }
    }
    if let Err(e) = ExtendedHash::load(&mut Cursor::new(Vec::new())) {
        println!("  empty stream -> {}", e);
    }
}
