//! lzu8 — a UTF-8-aware streaming LZ compressor.
//!
//! Compressed output interleaves verbatim UTF-8 bytes with short
//! back-reference tokens, so compressing already-plain text costs nothing
//! structural and the stream stays binary-safe to split at any byte
//! offset.  [`Compressor`] and [`Decompressor`] hold the streaming state;
//! the free functions below cover the one-shot case.
//!
//! ```
//! let compressed = lzu8::compress_str("to be or not to be, that is the question");
//! let restored = lzu8::decompress_to_string(&compressed).unwrap();
//! assert_eq!(restored, "to be or not to be, that is the question");
//! ```

pub mod block;
pub mod cli;
pub mod config;
pub mod encoding;
pub mod lorem;
pub mod timefn;

pub use block::{
    create_match_store, Compressor, CompressorOptions, DecompressError, Decompressor, MatchStore,
    MatchStoreKind, MAX_MATCH_DISTANCE, MAX_MATCH_LENGTH, MIN_MATCH_LENGTH,
    SHORT_POINTER_MAX_DISTANCE,
};
pub use encoding::{
    decode_compressed_bytes, encode_compressed_bytes, CompressedEncoding, EncodingError,
};

// ── One-shot helpers ─────────────────────────────────────────────────────────

/// Compress a complete byte buffer in one call.
///
/// The input must be valid UTF-8 for decompression to reproduce it
/// exactly; see [`Compressor::compress_block`].
pub fn compress(input: &[u8]) -> Vec<u8> {
    Compressor::new().compress_block(input)
}

/// Compress a complete string in one call.
pub fn compress_str(input: &str) -> Vec<u8> {
    compress(input.as_bytes())
}

/// Decompress a complete compressed buffer in one call.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>, DecompressError> {
    Decompressor::new().decompress_block(input)
}

/// Decompress a complete compressed buffer into a string in one call.
pub fn decompress_to_string(input: &[u8]) -> Result<String, DecompressError> {
    Decompressor::new().decompress_block_to_string(input)
}
