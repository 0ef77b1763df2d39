#![no_main]
use libfuzzer_sys::fuzz_target;

use lzu8::{Compressor, Decompressor};

// Valid UTF-8 in, chunked through both sides of the codec, must come back
// byte for byte.
fuzz_target!(|text: &str| {
    let bytes = text.as_bytes();

    // Derive chunk sizes from the input so the corpus explores both
    // one-shot and many-small-parts schedules.
    let compress_chunk = 1 + bytes.len() % 251;
    let decompress_chunk = 1 + bytes.len() % 97;

    let mut compressor = Compressor::new();
    let mut compressed = Vec::new();
    for chunk in bytes.chunks(compress_chunk) {
        compressed.extend_from_slice(&compressor.compress_block(chunk));
    }

    let mut decompressor = Decompressor::new();
    let mut restored = Vec::new();
    for chunk in compressed.chunks(decompress_chunk.max(1)) {
        let piece = decompressor
            .decompress_block(chunk)
            .expect("valid stream must decompress");
        restored.extend_from_slice(&piece);
    }

    assert_eq!(restored, bytes, "round-trip mismatch");
});
