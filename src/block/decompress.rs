//! Streaming decompressor: token parsing, back-reference expansion, and
//! chunk-boundary repair.
//!
//! The caller may split the compressed stream at *any* byte offset.  Two
//! kinds of state bridge the splits:
//!
//! - a chunk ending inside a pointer token keeps the token's leading bytes
//!   as an input remainder, completed by the next call;
//! - produced output ending in a truncated multi-byte UTF-8 sequence is
//!   withheld and re-emitted once its continuation bytes arrive, so every
//!   returned chunk is whole-character clean and
//!   [`Decompressor::decompress_block_to_string`] never feeds a partial
//!   sequence to string decoding.
//!
//! Malformed tokens (length below the wire floor, zero distance, or a
//! distance reaching past the available output history) fail fast with
//! [`DecompressError::CorruptData`]; a merely truncated tail is never an
//! error.

use std::fmt;

use super::types::{
    utf8_sequence_length, LONG_POINTER_LEAD_MIN, MAX_MATCH_DISTANCE, MIN_MATCH_LENGTH,
    POINTER_LEAD_MIN, POINTER_LENGTH_MASK,
};
use super::window;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by stream decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressError {
    /// A structurally invalid token: length below the wire minimum, zero
    /// distance, or a distance exceeding the bytes available in the output
    /// window.  The stream cannot be trusted past this point.
    CorruptData,
    /// The fully decompressed bytes are not valid UTF-8 (string output only).
    InvalidUtf8,
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecompressError::CorruptData => write!(f, "corrupt compressed data"),
            DecompressError::InvalidUtf8 => write!(f, "decompressed data is not valid UTF-8"),
        }
    }
}

impl std::error::Error for DecompressError {}

// ─────────────────────────────────────────────────────────────────────────────
// Decompressor
// ─────────────────────────────────────────────────────────────────────────────

/// Streaming decompression context.
///
/// # Thread safety
/// `Send` but not `Sync` — one instance per stream, never called
/// concurrently.  Independent instances share nothing.
#[derive(Default)]
pub struct Decompressor {
    /// Trailing output history (at least `MAX_MATCH_DISTANCE` bytes once the
    /// stream is long enough), plus the bytes produced by the current call.
    window: Vec<u8>,
    /// Leading bytes of a pointer token whose tail has not arrived yet.
    input_remainder: Vec<u8>,
    /// Withheld output tail: a truncated multi-byte character awaiting its
    /// continuation bytes.
    output_remainder: Vec<u8>,
}

impl Decompressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decompress the next piece of the stream, returning the newly produced
    /// bytes.  Empty input yields empty output (carry-over state is kept).
    pub fn decompress_block(&mut self, input: &[u8]) -> Result<Vec<u8>, DecompressError> {
        // Complete any token split by the previous chunk boundary.
        let combined;
        let data: &[u8] = if self.input_remainder.is_empty() {
            input
        } else {
            let mut v = std::mem::take(&mut self.input_remainder);
            v.extend_from_slice(input);
            combined = v;
            &combined
        };

        let emitted_start = self.window.len();

        // Re-emit bytes withheld as a truncated character tail; they are
        // part of the logical output stream and must be visible to
        // back-references before any new token is expanded.
        if !self.output_remainder.is_empty() {
            let withheld = std::mem::take(&mut self.output_remainder);
            self.window.extend_from_slice(&withheld);
        }

        let mut i = 0;
        while i < data.len() {
            let byte = data[i];

            if byte >= POINTER_LEAD_MIN {
                // One byte of lookahead tells a pointer token apart from a
                // literal multi-byte character lead.
                let Some(&next) = data.get(i + 1) else {
                    self.input_remainder = data[i..].to_vec();
                    break;
                };
                if next < 0x80 {
                    let length = (byte & POINTER_LENGTH_MASK) as usize;
                    let (distance, token_size) = if byte < LONG_POINTER_LEAD_MIN {
                        (next as usize, 2)
                    } else {
                        let Some(&low) = data.get(i + 2) else {
                            self.input_remainder = data[i..].to_vec();
                            break;
                        };
                        (((next as usize) << 8) | low as usize, 3)
                    };

                    if length < MIN_MATCH_LENGTH
                        || distance == 0
                        || distance > self.window.len()
                    {
                        return Err(DecompressError::CorruptData);
                    }

                    // Byte-at-a-time copy: when `distance < length` the
                    // back-reference overlaps its own output and must
                    // replicate the repeating pattern.
                    for _ in 0..length {
                        let b = self.window[self.window.len() - distance];
                        self.window.push(b);
                    }
                    i += token_size;
                    continue;
                }
                // Literal lead byte of a real multi-byte character.
            }

            self.window.push(byte);
            i += 1;
        }

        self.withhold_truncated_tail(emitted_start);
        let produced = self.window[emitted_start..].to_vec();
        window::crop_to_tail(&mut self.window, MAX_MATCH_DISTANCE);
        Ok(produced)
    }

    /// Decompress the next piece and UTF-8-decode it.
    ///
    /// Whole-character chunking is guaranteed by the carry-over logic, so
    /// this fails only on genuinely invalid data.
    pub fn decompress_block_to_string(&mut self, input: &[u8]) -> Result<String, DecompressError> {
        let bytes = self.decompress_block(input)?;
        String::from_utf8(bytes).map_err(|_| DecompressError::InvalidUtf8)
    }

    /// True while a partially received pointer token or multi-byte
    /// character is waiting for more input.  A stream that ends in this
    /// state was truncated: the carried bytes can never be emitted.
    pub fn has_pending(&self) -> bool {
        !self.input_remainder.is_empty() || !self.output_remainder.is_empty()
    }

    /// If the bytes produced by this call end mid-character, move the
    /// truncated sequence out of the window into `output_remainder`.
    ///
    /// Only bytes emitted by the current call are eligible: previous calls
    /// never returned a partial character, so a lead byte further back is
    /// necessarily complete.
    fn withhold_truncated_tail(&mut self, emitted_start: usize) {
        let end = self.window.len();
        let lookback = (end - emitted_start).min(3);
        for back in 1..=lookback {
            let byte = self.window[end - back];
            if byte < 0x80 {
                return; // ASCII: the tail is whole
            }
            if byte >= POINTER_LEAD_MIN {
                if utf8_sequence_length(byte) > back {
                    self.output_remainder = self.window.split_off(end - back);
                }
                return;
            }
            // Continuation byte: keep scanning for its lead.
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_produces_empty_output() {
        let mut d = Decompressor::new();
        assert_eq!(d.decompress_block(b"").unwrap(), b"");
        assert_eq!(d.decompress_block_to_string(b"").unwrap(), "");
    }

    #[test]
    fn plain_ascii_passes_through() {
        let mut d = Decompressor::new();
        assert_eq!(d.decompress_block(b"hello, world").unwrap(), b"hello, world");
    }

    #[test]
    fn plain_multibyte_utf8_passes_through() {
        let text = "héllo wörld — 你好"; // leads always followed by >= 0x80
        let mut d = Decompressor::new();
        assert_eq!(d.decompress_block(text.as_bytes()).unwrap(), text.as_bytes());
    }

    #[test]
    fn short_pointer_expands() {
        // "abcd" + pointer(length 4, distance 4) => "abcdabcd"
        let mut d = Decompressor::new();
        let out = d.decompress_block(&[b'a', b'b', b'c', b'd', 0xC4, 0x04]).unwrap();
        assert_eq!(out, b"abcdabcd");
    }

    #[test]
    fn overlapping_pointer_replicates_the_pattern() {
        // "ab" + pointer(length 8, distance 2) => "ab" repeated five times.
        let mut d = Decompressor::new();
        let out = d.decompress_block(&[b'a', b'b', 0xC8, 0x02]).unwrap();
        assert_eq!(out, b"ababababab");
    }

    #[test]
    fn long_pointer_reaches_far_back() {
        let mut d = Decompressor::new();
        let mut input = vec![b'x'; 200];
        input[0] = b'Q';
        // length 4, distance 200 (3-byte form): copies "Qxxx".
        input.extend_from_slice(&[0xE4, 0x00, 200]);
        let out = d.decompress_block(&input).unwrap();
        assert_eq!(out.len(), 204);
        assert_eq!(&out[200..], b"Qxxx");
    }

    #[test]
    fn pointer_split_across_chunks_is_carried_over() {
        let mut d = Decompressor::new();
        let mut out = d.decompress_block(&[b'a', b'b', b'c', b'd', 0xC4]).unwrap();
        assert_eq!(out, b"abcd"); // token incomplete, nothing expanded yet
        out = d.decompress_block(&[0x04]).unwrap();
        assert_eq!(out, b"abcd"); // completed on the next call
    }

    #[test]
    fn three_byte_pointer_split_after_two_bytes() {
        let mut d = Decompressor::new();
        let prefix: Vec<u8> = (0..130).map(|i| (i % 64) + b'0').collect();
        let mut first = prefix.clone();
        first.extend_from_slice(&[0xE4, 0x00]); // missing the low distance byte
        let out = d.decompress_block(&first).unwrap();
        assert_eq!(out, prefix);
        let out = d.decompress_block(&[130]).unwrap();
        assert_eq!(out, &prefix[..4]);
    }

    #[test]
    fn truncated_character_is_withheld_until_completed() {
        let mut d = Decompressor::new();
        let bytes = "é".as_bytes(); // C3 A9
        let out = d.decompress_block(&bytes[..1]).unwrap();
        assert!(out.is_empty(), "partial character must be withheld");
        let out = d.decompress_block(&bytes[1..]).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn truncated_three_byte_character_is_withheld() {
        let mut d = Decompressor::new();
        let bytes = "你".as_bytes(); // E4 BD A0
        let out = d.decompress_block(&bytes[..2]).unwrap();
        assert!(out.is_empty());
        let out = d.decompress_block_to_string(&bytes[2..]).unwrap();
        assert_eq!(out, "你");
    }

    #[test]
    fn invalid_utf8_output_is_reported_as_invalid_not_corrupt() {
        // A lone continuation byte is a plain literal: it is not a
        // truncated character (nothing could ever complete it), so it is
        // emitted, and string decoding must then reject the result.
        let mut d = Decompressor::new();
        assert_eq!(
            d.decompress_block_to_string(&[b'a', 0x80, b'b']),
            Err(DecompressError::InvalidUtf8)
        );

        // The byte API accepts the same stream; the tokens are well-formed.
        let mut d = Decompressor::new();
        assert_eq!(d.decompress_block(&[b'a', 0x80, b'b']).unwrap(), [b'a', 0x80, b'b']);
    }

    #[test]
    fn corrupt_tokens_fail_fast() {
        // Length below the wire floor.
        assert_eq!(
            Decompressor::new().decompress_block(&[b'a', 0xC1, 0x01]),
            Err(DecompressError::CorruptData)
        );
        // Zero distance.
        assert_eq!(
            Decompressor::new().decompress_block(&[b'a', 0xC4, 0x00]),
            Err(DecompressError::CorruptData)
        );
        // Distance beyond the available output.
        assert_eq!(
            Decompressor::new().decompress_block(&[b'a', 0xC4, 0x02]),
            Err(DecompressError::CorruptData)
        );
        assert_eq!(
            Decompressor::new().decompress_block(&[0xE4, 0x7F, 0xFF]),
            Err(DecompressError::CorruptData)
        );
    }

    #[test]
    fn pending_state_tracks_carried_over_bytes() {
        let mut d = Decompressor::new();
        assert!(!d.has_pending());

        // Pointer token split after its lead byte.
        d.decompress_block(&[b'a', b'b', b'c', b'd', 0xC4]).unwrap();
        assert!(d.has_pending());
        d.decompress_block(&[0x04]).unwrap();
        assert!(!d.has_pending());

        // Withheld truncated character.
        let mut d = Decompressor::new();
        d.decompress_block(&"你".as_bytes()[..2]).unwrap();
        assert!(d.has_pending());
        d.decompress_block(&"你".as_bytes()[2..]).unwrap();
        assert!(!d.has_pending());
    }

    #[test]
    fn empty_call_mid_stream_preserves_carry_over() {
        let mut d = Decompressor::new();
        assert!(d.decompress_block(&[b'a', b'b', b'c', b'd', 0xC4]).unwrap() == b"abcd");
        assert_eq!(d.decompress_block(b"").unwrap(), b"");
        assert_eq!(d.decompress_block(&[0x04]).unwrap(), b"abcd");
    }
}
