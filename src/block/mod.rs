//! Stream codec: wire format constants, match table, compressor and
//! decompressor.
//!
//! The wire format interleaves verbatim UTF-8 bytes with two- and
//! three-byte back-reference tokens.  Token lead bytes occupy `0xC0..=0xFF`
//! and are recognized by a single byte of lookahead, since in well-formed
//! UTF-8 a byte in that range is always followed by a continuation byte
//! (`0x80..=0xBF`) while a token lead never is.

pub mod compress;
pub mod decompress;
pub mod table;
pub mod types;
pub mod window;

pub use compress::{Compressor, CompressorOptions};
pub use decompress::{DecompressError, Decompressor};
pub use table::{create_match_store, MatchStore, MatchStoreKind};
pub use types::{
    MAX_MATCH_DISTANCE, MAX_MATCH_LENGTH, MIN_MATCH_LENGTH, SHORT_POINTER_MAX_DISTANCE,
};
