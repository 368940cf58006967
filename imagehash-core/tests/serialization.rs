//! Serialization and compatibility tests over hashes of synthetic images.
//!
//! The pixel algorithms live outside this crate, so these tests plug in
//! small grayscale producers through the `FixedHasher` / `ExtendedHasher`
//! traits and check that whatever they produce survives the text and binary
//! codecs bit for bit.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};
use imagehash_core::{
    ExtendedHash, ExtendedHasher, FixedHash, FixedHasher, HashError, Kind, Result,
    SimilarityConfig,
};

/// Threshold for JPEG re-encoding of a high-contrast image.
const JPEG_THRESHOLD: u32 = 15;

/// Create a test image with recognizable patterns.
fn create_test_image(width: u32, height: u32, seed: u32) -> RgbImage {
    let mut img = ImageBuffer::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let r = ((x as f32 / width as f32) * 255.0) as u8;
        let g = ((y as f32 / height as f32) * 255.0) as u8;
        let b = (((x + y) as f32 / (width + height) as f32) * 200.0) as u8;

        let block = 16 + seed * 8;
        let pattern = if (x / block + y / block) % 2 == 0 { 60 } else { 0 };
        *pixel = Rgb([r.saturating_add(pattern), g, b]);
    }

    img
}

fn sample_images() -> Vec<DynamicImage> {
    (0..4)
        .map(|seed| DynamicImage::ImageRgb8(create_test_image(200 + seed * 37, 160, seed)))
        .collect()
}

/// Compress an image to JPEG with the specified quality (1-100).
fn compress_jpeg(img: &DynamicImage, quality: u8) -> DynamicImage {
    let mut buffer = Cursor::new(Vec::new());
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    img.write_with_encoder(encoder)
        .expect("JPEG encoding failed");
    image::load_from_memory(&buffer.into_inner()).expect("JPEG decoding failed")
}

fn luma_grid(img: &DynamicImage, width: u32, height: u32) -> Vec<u8> {
    img.resize_exact(width, height, FilterType::Triangle)
        .to_luma8()
        .into_raw()
}

// ============================================================================
// Test producers
// ============================================================================

fn ext_average_hash(img: &DynamicImage, width: u32, height: u32) -> Result<ExtendedHash> {
    let pixels = luma_grid(img, width, height);
    let mean = pixels.iter().map(|&p| u64::from(p)).sum::<u64>() / pixels.len() as u64;

    let mut hash = ExtendedHash::with_dimensions(Kind::AHash, width, height)?;
    for (i, &p) in pixels.iter().enumerate() {
        hash.set_bit(i, u64::from(p) > mean);
    }
    Ok(hash)
}

/// Median threshold, standing in for the DCT-based perception hash.
fn ext_perception_hash(img: &DynamicImage, width: u32, height: u32) -> Result<ExtendedHash> {
    let pixels = luma_grid(img, width, height);
    let mut sorted = pixels.clone();
    sorted.sort_unstable();
    let median = sorted[sorted.len() / 2];

    let mut hash = ExtendedHash::with_dimensions(Kind::PHash, width, height)?;
    for (i, &p) in pixels.iter().enumerate() {
        hash.set_bit(i, p > median);
    }
    Ok(hash)
}

fn ext_difference_hash(img: &DynamicImage, width: u32, height: u32) -> Result<ExtendedHash> {
    let pixels = luma_grid(img, width + 1, height);
    let row = (width + 1) as usize;

    let mut hash = ExtendedHash::with_dimensions(Kind::DHash, width, height)?;
    for y in 0..height as usize {
        for x in 0..width as usize {
            let left = pixels[y * row + x];
            let right = pixels[y * row + x + 1];
            hash.set_bit(y * width as usize + x, left < right);
        }
    }
    Ok(hash)
}

fn fixed_from<F>(ext: F) -> impl Fn(&DynamicImage) -> Result<FixedHash>
where
    F: Fn(&DynamicImage, u32, u32) -> Result<ExtendedHash>,
{
    move |img: &DynamicImage| FixedHash::try_from(&ext(img, 8, 8)?)
}

type ExtProducer = fn(&DynamicImage, u32, u32) -> Result<ExtendedHash>;

const EXT_PRODUCERS: [(&str, ExtProducer); 3] = [
    ("average", ext_average_hash),
    ("perception", ext_perception_hash),
    ("difference", ext_difference_hash),
];

fn fixed_producers() -> Vec<(&'static str, Box<dyn FixedHasher<DynamicImage>>)> {
    EXT_PRODUCERS
        .iter()
        .map(|&(name, ext)| {
            let producer: Box<dyn FixedHasher<DynamicImage>> = Box::new(fixed_from(ext));
            (name, producer)
        })
        .collect()
}

// ============================================================================
// Text codec
// ============================================================================

#[test]
fn test_fixed_text_roundtrip() {
    for (index, img) in sample_images().iter().enumerate() {
        for (name, producer) in fixed_producers() {
            let hash = FixedHasher::hash(producer.as_ref(), img).expect("Failed to hash image");

            let text = hash.to_string();
            // kind char + ':' + 16 hex digits
            assert_eq!(text.len(), 18, "{name} hash of image {index}: {text:?}");

            let restored: FixedHash = text.parse().expect("Failed to parse hash");
            assert_eq!(
                hash.distance(&restored).expect("Distance calculation failed"),
                0,
                "{name} hash of image {index} should survive the text form"
            );
        }
    }
}

#[test]
fn test_extended_text_roundtrip() {
    for img in sample_images() {
        for (name, producer) in EXT_PRODUCERS {
            for size in [8u32, 16] {
                let hash = ExtendedHasher::hash(&producer, &img, size, size)
                    .expect("Failed to hash image");

                let text = hash.to_string();
                assert_eq!(
                    text.len(),
                    (size * size / 4 + 2) as usize,
                    "{name} {size}x{size}: {text:?}"
                );

                let restored: ExtendedHash = text.parse().expect("Failed to parse hash");
                assert_eq!(
                    hash.distance(&restored).expect("Distance calculation failed"),
                    0
                );
            }
        }
    }
}

#[test]
fn test_text_decoders_reject_bad_input() {
    assert!(matches!("".parse::<FixedHash>(), Err(HashError::EmptyInput)));
    assert!(matches!(
        "".parse::<ExtendedHash>(),
        Err(HashError::EmptyInput)
    ));
    assert!(matches!(
        "k:g".parse::<ExtendedHash>(),
        Err(HashError::MalformedEncoding(_))
    ));
    assert!(matches!(
        "a:g".parse::<ExtendedHash>(),
        Err(HashError::MalformedEncoding(_))
    ));
}

// ============================================================================
// Binary codec
// ============================================================================

#[test]
fn test_fixed_dump_and_load() {
    for img in sample_images() {
        for (name, producer) in fixed_producers() {
            let hash = FixedHasher::hash(producer.as_ref(), &img).expect("Failed to hash image");

            let mut buf = Vec::new();
            hash.dump(&mut buf).expect("Failed to dump hash");
            let restored = FixedHash::load(&mut Cursor::new(buf)).expect("Failed to load hash");

            assert_eq!(hash.distance(&restored).unwrap(), 0, "{name}");
            assert_eq!(hash.bits(), 64);
            assert_eq!(restored.bits(), 64);
        }
    }
}

#[test]
fn test_extended_dump_and_load() {
    for img in sample_images() {
        for size in [8u32, 16] {
            for (name, producer) in EXT_PRODUCERS {
                let hash = producer(&img, size, size).expect("Failed to hash image");

                let mut buf = Vec::new();
                hash.dump(&mut buf).expect("Failed to dump hash");
                let restored =
                    ExtendedHash::load(&mut Cursor::new(buf)).expect("Failed to load hash");

                assert_eq!(hash.distance(&restored).unwrap(), 0, "{name}");
                assert_eq!(hash.bits(), (size * size) as usize);
                assert_eq!(restored.bits(), (size * size) as usize);
            }
        }
    }
}

#[test]
fn test_load_empty_stream() {
    let mut reader = Cursor::new(Vec::<u8>::new());
    assert!(matches!(
        FixedHash::load(&mut reader),
        Err(HashError::EmptyStream)
    ));
    assert!(matches!(
        ExtendedHash::load(&mut reader),
        Err(HashError::EmptyStream)
    ));
}

// ============================================================================
// Compatibility
// ============================================================================

#[test]
fn test_different_bit_size_hash() {
    let img = &sample_images()[0];

    let hash1 = ext_average_hash(img, 32, 32).unwrap();
    let hash2 = ext_difference_hash(img, 32, 32).unwrap();
    assert!(
        matches!(hash1.distance(&hash2), Err(HashError::KindMismatch { .. })),
        "Different kinds of hashes should not be comparable"
    );

    let hash3 = ext_average_hash(img, 31, 31).unwrap();
    assert!(
        matches!(hash1.distance(&hash3), Err(HashError::LengthMismatch { .. })),
        "Different bit lengths should not be comparable"
    );
}

#[test]
fn test_odd_length_dump_and_text() {
    let img = &sample_images()[1];
    let hash = ext_average_hash(img, 31, 31).unwrap();
    assert_eq!(hash.bits(), 961);
    assert!(hash.is_square());

    let mut buf = Vec::new();
    hash.dump(&mut buf).unwrap();
    assert_eq!(buf.len(), 1 + 4 + 121);
    let loaded = ExtendedHash::load(&mut Cursor::new(buf)).unwrap();
    assert_eq!(loaded, hash);

    let parsed = ExtendedHash::from_str_with_bits(&hash.to_string(), 961).unwrap();
    assert_eq!(hash.distance(&parsed).unwrap(), 0);
}

#[test]
fn test_jpeg_reencoding_stays_similar() {
    let original = &sample_images()[2];
    let compressed = compress_jpeg(original, 90);

    let producer = fixed_from(ext_average_hash);
    let hash1 = FixedHasher::hash(&producer, original).expect("Failed to hash original");
    let hash2 = FixedHasher::hash(&producer, &compressed).expect("Failed to hash compressed");

    let distance = hash1.distance(&hash2).expect("Distance calculation failed");
    println!("JPEG 90% quality - Hamming distance: {}", distance);

    assert!(
        hash1
            .is_similar(&hash2, &SimilarityConfig { max_distance: JPEG_THRESHOLD })
            .unwrap(),
        "JPEG 90% compression should preserve similarity (distance: {}, threshold: {})",
        distance,
        JPEG_THRESHOLD
    );
}
