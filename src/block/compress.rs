//! Streaming compressor: sliding input window, match search, token emission.
//!
//! A [`Compressor`] compresses a logical byte stream in arbitrary-sized
//! pieces: each [`Compressor::compress_block`] call returns the compressed
//! form of exactly the bytes it was given, with back-references allowed to
//! reach up to [`MAX_MATCH_DISTANCE`] bytes into *previous* calls' input.
//! There is no cross-call framing — the only state carried between calls is
//! the input window and the match store, so a block boundary never splits a
//! token.  The emitted chunks, concatenated in order, form one valid stream.

use super::table::{create_match_store, MatchStore, MatchStoreKind};
use super::types::{
    prefix_bucket_index, DEFAULT_BUCKET_COUNT, LONG_POINTER_LEAD_MIN, MAX_MATCH_DISTANCE,
    MAX_MATCH_LENGTH, MIN_MATCH_LENGTH, POINTER_LEAD_MIN, SHORT_POINTER_MAX_DISTANCE,
};
use super::window;

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Construction-time tuning for a [`Compressor`].  Fixed for the instance's
/// lifetime; none of these change the wire format's validity, only which
/// tokens get emitted.
#[derive(Clone, Copy, Debug)]
pub struct CompressorOptions {
    /// Which [`MatchStore`] implementation backs the hash table.  Purely a
    /// footprint/performance choice — output bytes are identical either way.
    pub match_store: MatchStoreKind,
    /// Hash-table bucket count; rounded up to a power of two.
    pub bucket_count: usize,
    /// Shortest match worth a pointer token (wire floor: 4).
    pub min_match_length: usize,
    /// Longest emitted match (wire ceiling: 31).
    pub max_match_length: usize,
    /// Farthest emitted back-reference (wire ceiling: 32767); also the
    /// retained window size.
    pub max_match_distance: usize,
}

impl Default for CompressorOptions {
    fn default() -> Self {
        Self {
            match_store: MatchStoreKind::Simple,
            bucket_count: DEFAULT_BUCKET_COUNT,
            min_match_length: MIN_MATCH_LENGTH,
            max_match_length: MAX_MATCH_LENGTH,
            max_match_distance: MAX_MATCH_DISTANCE,
        }
    }
}

impl CompressorOptions {
    /// Clamp every field to the ranges the wire format can express.
    fn normalized(mut self) -> Self {
        self.bucket_count = self.bucket_count.clamp(2, 1 << 28).next_power_of_two();
        self.min_match_length = self.min_match_length.max(MIN_MATCH_LENGTH);
        self.max_match_length = self
            .max_match_length
            .clamp(self.min_match_length, MAX_MATCH_LENGTH);
        self.max_match_distance = self.max_match_distance.clamp(1, MAX_MATCH_DISTANCE);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Compressor
// ─────────────────────────────────────────────────────────────────────────────

/// Streaming compression context.
///
/// # Thread safety
/// `Compressor` is `Send` but not `Sync`: calls mutate the window and the
/// match store, so a single instance must never be invoked concurrently.
/// Independent instances share nothing.
pub struct Compressor {
    opts: CompressorOptions,
    /// `32 - log2(bucket_count)`, precomputed for the hot loop.
    hash_shift: u32,
    /// Trailing `max_match_distance` bytes of already-processed input,
    /// followed by the block currently being compressed.
    window: Vec<u8>,
    /// Logical stream offset of `window[0]`.
    window_base: u64,
    store: Box<dyn MatchStore>,
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor {
    /// Compressor with default options (simple match store).
    pub fn new() -> Self {
        Self::with_options(CompressorOptions::default())
    }

    /// Compressor backed by the given match-store implementation.
    pub fn with_match_store(kind: MatchStoreKind) -> Self {
        Self::with_options(CompressorOptions {
            match_store: kind,
            ..CompressorOptions::default()
        })
    }

    pub fn with_options(opts: CompressorOptions) -> Self {
        let opts = opts.normalized();
        Self {
            hash_shift: 32 - (opts.bucket_count as u32).trailing_zeros(),
            window: Vec::new(),
            window_base: 0,
            store: create_match_store(opts.match_store, opts.bucket_count),
            opts,
        }
    }

    /// The backing match store (used by equivalence tests and statistics).
    pub fn match_store(&self) -> &dyn MatchStore {
        &*self.store
    }

    /// Compress the next piece of the stream.
    ///
    /// Returns the compressed bytes for exactly `input`; an empty input
    /// yields an empty output.  Decodable only by feeding every emitted
    /// chunk, in order, to one [`Decompressor`](super::decompress::Decompressor).
    pub fn compress_block(&mut self, input: &[u8]) -> Vec<u8> {
        if input.is_empty() {
            return Vec::new();
        }
        let (dropped, start) =
            window::crop_and_append(&mut self.window, self.opts.max_match_distance, input);
        self.window_base += dropped as u64;
        self.compress_appended(start)
    }

    /// Compress the next piece of a text stream (UTF-8 transcoded first).
    pub fn compress_block_str(&mut self, input: &str) -> Vec<u8> {
        self.compress_block(input.as_bytes())
    }

    /// Core loop over `window[start..]` (the newly appended block).
    fn compress_appended(&mut self, start: usize) -> Vec<u8> {
        let read_end = self.window.len();
        let mut out = Vec::with_capacity(read_end - start + 4);

        // End of the most recent match, as a window position.  Positions
        // inside a matched span emit nothing but are still hashed, so later
        // data can match into the span.
        let mut latest_match_end = 0usize;

        for pos in start..read_end {
            let within_match = pos < latest_match_end;

            // The last few positions cannot start a match (or a hash).
            if pos + self.opts.min_match_length > read_end {
                if !within_match {
                    out.push(self.window[pos]);
                }
                continue;
            }

            let bucket_index = prefix_bucket_index(&self.window, pos, self.hash_shift);

            if !within_match {
                match self.find_longest_match(pos, bucket_index) {
                    Some((distance, length)) => {
                        write_pointer(&mut out, length, distance);
                        latest_match_end = pos + length;
                    }
                    None => out.push(self.window[pos]),
                }
            }

            self.store.insert(bucket_index, self.window_base + pos as u64);
        }

        out
    }

    /// Probe the bucket newest-first for the longest verified match at `pos`.
    ///
    /// Returns `(distance, length)` with `length >= min_match_length`, or
    /// `None`.  Ties keep the most recent candidate (smallest distance): it
    /// is cheaper to encode and closer in the decoder's window.
    fn find_longest_match(&self, pos: usize, bucket_index: usize) -> Option<(usize, usize)> {
        let window = &self.window;
        let abs_pos = self.window_base + pos as u64;
        let max_len = self.opts.max_match_length.min(window.len() - pos);

        let mut best_len = 0usize;
        let mut best_dist = 0usize;

        for &candidate in self.store.bucket(bucket_index).iter().rev() {
            debug_assert!(candidate < abs_pos);
            let distance = (abs_pos - candidate) as usize;
            // Entries are ordered by insertion; every older one is farther.
            if distance > self.opts.max_match_distance {
                break;
            }
            debug_assert!(candidate >= self.window_base);
            let cand_pos = pos - distance;

            // Hash collisions are possible: verify actual bytes, extending
            // as far as the token can express.
            let mut len = 0;
            while len < max_len && window[cand_pos + len] == window[pos + len] {
                len += 1;
            }

            if len > best_len {
                best_len = len;
                best_dist = distance;
                if len == max_len {
                    break;
                }
            }
        }

        (best_len >= self.opts.min_match_length).then_some((best_dist, best_len))
    }
}

/// Append the encoded pointer token for `(distance, length)`.
fn write_pointer(out: &mut Vec<u8>, length: usize, distance: usize) {
    debug_assert!((MIN_MATCH_LENGTH..=MAX_MATCH_LENGTH).contains(&length));
    debug_assert!((1..=MAX_MATCH_DISTANCE).contains(&distance));
    if distance <= SHORT_POINTER_MAX_DISTANCE {
        out.push(POINTER_LEAD_MIN | length as u8);
        out.push(distance as u8);
    } else {
        out.push(LONG_POINTER_LEAD_MIN | length as u8);
        out.push((distance >> 8) as u8);
        out.push((distance & 0xFF) as u8);
    }
}
