//! Wire-format constants, prefix hashing, and byte-classification helpers.
//!
//! The compressed stream interleaves two token kinds:
//!
//! - **Literal** — any byte, emitted verbatim.
//! - **Pointer** — a back-reference `(distance, length)` encoded with a
//!   reserved lead byte:
//!
//!   ```text
//!   2-byte form (1 <= distance <= 127):      110LLLLL  0DDDDDDD
//!   3-byte form (128 <= distance <= 32767):  111LLLLL  0DDDDDDD  DDDDDDDD
//!   ```
//!
//! In valid UTF-8 a byte `>= 0xC0` is always followed by a continuation byte
//! (`0x80..=0xBF`).  A pointer token's second byte is always `< 0x80`, so a
//! single byte of lookahead disambiguates the two token kinds.  This is what
//! makes the stream self-synchronizing: no length header is needed, already
//! plain UTF-8 decodes to itself, and independently compressed chunks can be
//! concatenated freely.

// ─────────────────────────────────────────────────────────────────────────────
// Token field limits
// ─────────────────────────────────────────────────────────────────────────────

/// Shortest back-reference worth encoding (a 2-byte pointer must beat the
/// literals it replaces).  Also the prefix width fed to the hash.
pub const MIN_MATCH_LENGTH: usize = 4;

/// Longest encodable back-reference (5 length bits).
pub const MAX_MATCH_LENGTH: usize = 31;

/// Farthest encodable back-reference (15 distance bits).
pub const MAX_MATCH_DISTANCE: usize = 32_767;

/// Largest distance representable by the 2-byte pointer form.
pub const SHORT_POINTER_MAX_DISTANCE: usize = 127;

/// Smallest byte value that can open a pointer token (`0b1100_0000`).
pub const POINTER_LEAD_MIN: u8 = 0xC0;

/// First lead value of the 3-byte pointer form (`0b1110_0000`).
pub const LONG_POINTER_LEAD_MIN: u8 = 0xE0;

/// Mask extracting the 5 length bits from a pointer lead byte.
pub const POINTER_LENGTH_MASK: u8 = 0x1F;

// ─────────────────────────────────────────────────────────────────────────────
// Match-store sizing
// ─────────────────────────────────────────────────────────────────────────────

/// Default number of hash buckets.  Must be a power of two so the hash can be
/// reduced with a shift.
pub const DEFAULT_BUCKET_COUNT: usize = 1 << 16;

/// Upper bound on entries per bucket.  When a bucket reaches this length the
/// oldest [`BUCKET_EVICTION_COUNT`] entries are dropped before the next
/// insert, so eviction cost is amortized across many inserts.
pub const MAX_BUCKET_CAPACITY: usize = 64;

/// Number of oldest entries evicted from a full bucket.
pub const BUCKET_EVICTION_COUNT: usize = MAX_BUCKET_CAPACITY / 2;

// ─────────────────────────────────────────────────────────────────────────────
// Prefix hashing
// ─────────────────────────────────────────────────────────────────────────────

/// Knuth's multiplicative hash constant (2^32 / golden ratio).
const PRIME32: u32 = 2_654_435_761;

/// Bucket index for the 4-byte prefix starting at `pos`.
///
/// `hash_shift` is `32 - log2(bucket_count)`; the caller guarantees at least
/// [`MIN_MATCH_LENGTH`] readable bytes at `pos`.
#[inline(always)]
pub fn prefix_bucket_index(window: &[u8], pos: usize, hash_shift: u32) -> usize {
    let word = u32::from_le_bytes([
        window[pos],
        window[pos + 1],
        window[pos + 2],
        window[pos + 3],
    ]);
    (word.wrapping_mul(PRIME32) >> hash_shift) as usize
}

// ─────────────────────────────────────────────────────────────────────────────
// UTF-8 byte classification
// ─────────────────────────────────────────────────────────────────────────────

/// Total sequence length implied by a UTF-8 lead byte.
///
/// Returns 1 for ASCII and for values that cannot lead a sequence
/// (continuation bytes and the invalid `0xF8..=0xFF` range), so callers never
/// withhold bytes that no later input could complete.
#[inline(always)]
pub fn utf8_sequence_length(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}
