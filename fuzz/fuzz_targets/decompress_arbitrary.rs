#![no_main]
use libfuzzer_sys::fuzz_target;

use lzu8::Decompressor;

// Arbitrary bytes must never panic the decompressor, whole or chunked.
// Errors are fine; crashes are not.
fuzz_target!(|data: &[u8]| {
    let _ = Decompressor::new().decompress_block(data);
    let _ = Decompressor::new().decompress_block_to_string(data);

    let chunk = 1 + data.len() % 13;
    let mut decompressor = Decompressor::new();
    for piece in data.chunks(chunk) {
        if decompressor.decompress_block(piece).is_err() {
            break;
        }
    }
});
