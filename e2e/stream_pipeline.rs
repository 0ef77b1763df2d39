//! End-to-end pipeline: large generated text pushed through a
//! compress-side block size that disagrees with the decompress-side block
//! size, across every store kind and container encoding.

use lzu8::{
    decode_compressed_bytes, encode_compressed_bytes, lorem, CompressedEncoding, Compressor,
    Decompressor, MatchStoreKind,
};

fn pipeline(
    text: &str,
    kind: MatchStoreKind,
    compress_block: usize,
    decompress_block: usize,
) -> String {
    let mut compressor = Compressor::with_match_store(kind);
    let mut compressed = Vec::new();
    for chunk in text.as_bytes().chunks(compress_block) {
        compressed.extend_from_slice(&compressor.compress_block(chunk));
    }

    let mut decompressor = Decompressor::new();
    let mut restored = String::new();
    for chunk in compressed.chunks(decompress_block) {
        restored.push_str(&decompressor.decompress_block_to_string(chunk).unwrap());
    }
    restored
}

#[test]
fn mismatched_block_sizes_round_trip() {
    let text = lorem::text(500_000, 2024);
    for kind in [MatchStoreKind::Simple, MatchStoreKind::Packed] {
        assert_eq!(pipeline(&text, kind, 1024, 700), text, "{kind:?}");
    }
}

#[test]
fn tiny_blocks_against_huge_blocks() {
    let text = lorem::text(64_000, 5);
    assert_eq!(pipeline(&text, MatchStoreKind::Simple, 97, 1 << 20), text);
    assert_eq!(pipeline(&text, MatchStoreKind::Packed, 1 << 20, 89), text);
}

#[test]
fn every_container_carries_a_streamed_payload() {
    let text = lorem::text(120_000, 8);
    let mut compressor = Compressor::new();
    let mut compressed = Vec::new();
    for chunk in text.as_bytes().chunks(4096) {
        compressed.extend_from_slice(&compressor.compress_block(chunk));
    }

    for encoding in [
        CompressedEncoding::ByteArray,
        CompressedEncoding::Base64,
        CompressedEncoding::BinaryString,
        CompressedEncoding::StorageBinaryString,
    ] {
        let wrapped = encode_compressed_bytes(&compressed, encoding);
        let unwrapped = decode_compressed_bytes(&wrapped, encoding).unwrap();
        let mut decompressor = Decompressor::new();
        let mut restored = String::new();
        for chunk in unwrapped.chunks(3000) {
            restored.push_str(&decompressor.decompress_block_to_string(chunk).unwrap());
        }
        assert_eq!(restored, text, "{encoding:?}");
    }
}

#[test]
fn long_streams_stay_consistent_past_window_turnover() {
    // Half a megabyte forces the window to slide many times on both sides.
    let text = lorem::text(500_000, 31_337);
    assert_eq!(pipeline(&text, MatchStoreKind::Packed, 8 * 1024, 8 * 1024), text);
}

#[test]
fn corrupted_streams_error_instead_of_panicking() {
    let text = lorem::text(20_000, 77);
    let compressed = Compressor::new().compress_block(text.as_bytes());

    for flip in [0x01u8, 0x55, 0x80, 0xFF] {
        for index in (0..compressed.len()).step_by(97) {
            let mut mutated = compressed.clone();
            mutated[index] ^= flip;
            // Either outcome is acceptable; crashing is not.
            let _ = Decompressor::new().decompress_block(&mutated);
        }
    }
}
