//! Bucketed match stores: candidate offsets keyed by 4-byte-prefix hash.
//!
//! The compressor records, for every hashed input position, the absolute
//! stream offset at which that position's 4-byte prefix occurred, and later
//! asks for all recorded offsets of a bucket to probe as match candidates.
//!
//! Two interchangeable implementations are provided behind [`MatchStore`]:
//!
//! - [`SimpleMatchStore`] — one growable vector per bucket.  Easy to reason
//!   about; one allocation per active bucket.
//! - [`PackedMatchStore`] — one flat storage array shared by all buckets,
//!   with per-bucket `(start, len)` locators.  Inserts append at a moving
//!   write cursor, relocating a bucket's segment when it cannot grow in
//!   place; exhausted storage is either compacted or doubled.
//!
//! Both must be observably identical — same bucket contents and order, same
//! statistics, and therefore byte-identical compressor output.  Which one a
//! compressor uses is purely a footprint/performance choice.

use super::types::{BUCKET_EVICTION_COUNT, MAX_BUCKET_CAPACITY};

// ─────────────────────────────────────────────────────────────────────────────
// Capability surface
// ─────────────────────────────────────────────────────────────────────────────

/// Storage for match-candidate offsets, bucketed by prefix hash.
pub trait MatchStore: Send {
    /// Record `offset` (an absolute stream offset) in the given bucket.
    ///
    /// When the bucket already holds [`MAX_BUCKET_CAPACITY`] entries, its
    /// oldest [`BUCKET_EVICTION_COUNT`] entries are dropped first; recent
    /// offsets make better (cheaper, closer) matches.
    fn insert(&mut self, bucket_index: usize, offset: u64);

    /// Borrow the bucket's live entries, oldest first.
    ///
    /// Returns an empty slice for an unused bucket.  Callers walk the slice
    /// in reverse to probe newest-first; no allocation takes place.
    fn bucket(&self, bucket_index: usize) -> &[u64];

    /// Number of buckets that have received at least one insert.
    fn used_bucket_count(&self) -> usize;

    /// Number of live (non-evicted) entries across all buckets.
    fn total_element_count(&self) -> usize;
}

/// Selects the [`MatchStore`] implementation backing a compressor.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum MatchStoreKind {
    /// Per-bucket vectors ([`SimpleMatchStore`]).
    #[default]
    Simple,
    /// Flat shared storage with bucket locators ([`PackedMatchStore`]).
    Packed,
}

/// Construct the store selected by `kind`.
pub fn create_match_store(kind: MatchStoreKind, bucket_count: usize) -> Box<dyn MatchStore> {
    match kind {
        MatchStoreKind::Simple => Box::new(SimpleMatchStore::new(bucket_count)),
        MatchStoreKind::Packed => Box::new(PackedMatchStore::new(bucket_count)),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Simple variant
// ─────────────────────────────────────────────────────────────────────────────

/// One growable vector per bucket.
pub struct SimpleMatchStore {
    buckets: Vec<Vec<u64>>,
    live_count: usize,
    used_buckets: usize,
}

impl SimpleMatchStore {
    pub fn new(bucket_count: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); bucket_count],
            live_count: 0,
            used_buckets: 0,
        }
    }
}

impl MatchStore for SimpleMatchStore {
    fn insert(&mut self, bucket_index: usize, offset: u64) {
        let bucket = &mut self.buckets[bucket_index];
        if bucket.is_empty() {
            self.used_buckets += 1;
        } else if bucket.len() == MAX_BUCKET_CAPACITY {
            bucket.drain(..BUCKET_EVICTION_COUNT);
            self.live_count -= BUCKET_EVICTION_COUNT;
        }
        bucket.push(offset);
        self.live_count += 1;
    }

    fn bucket(&self, bucket_index: usize) -> &[u64] {
        &self.buckets[bucket_index]
    }

    fn used_bucket_count(&self) -> usize {
        self.used_buckets
    }

    fn total_element_count(&self) -> usize {
        self.live_count
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Packed variant
// ─────────────────────────────────────────────────────────────────────────────

/// Position of one bucket's live segment inside the shared storage array.
#[derive(Clone, Copy, Default)]
struct BucketLocator {
    start: usize,
    len: usize,
}

/// All buckets share one flat storage array; each bucket owns a contiguous
/// segment of it described by its locator.  Evicted and relocated entries
/// leave dead slots behind; [`PackedMatchStore::compact`] reclaims them once
/// they outnumber the live entries.
pub struct PackedMatchStore {
    locators: Vec<BucketLocator>,
    storage: Vec<u64>,
    /// Storage below this index is in use (live segments plus dead slots).
    write_index: usize,
    live_count: usize,
    used_buckets: usize,
}

impl PackedMatchStore {
    pub fn new(bucket_count: usize) -> Self {
        Self {
            locators: vec![BucketLocator::default(); bucket_count],
            storage: vec![0; bucket_count.max(1024)],
            write_index: 0,
            live_count: 0,
            used_buckets: 0,
        }
    }

    /// Make room for `extra` more entries at the write cursor, compacting
    /// when dead slots outnumber live entries and growing otherwise.
    fn ensure_tail_capacity(&mut self, extra: usize) {
        if self.write_index + extra <= self.storage.len() {
            return;
        }
        let dead = self.write_index - self.live_count;
        if dead > self.live_count {
            self.compact();
        }
        if self.write_index + extra > self.storage.len() {
            let new_len = (self.storage.len() * 2).max(self.write_index + extra);
            self.storage.resize(new_len, 0);
        }
    }

    /// Rewrite storage keeping only live segments, updating every locator.
    /// Segment-internal order (oldest first) is preserved.
    fn compact(&mut self) {
        let mut compacted = vec![0u64; self.storage.len()];
        let mut cursor = 0;
        for locator in self.locators.iter_mut() {
            if locator.len == 0 {
                continue;
            }
            compacted[cursor..cursor + locator.len]
                .copy_from_slice(&self.storage[locator.start..locator.start + locator.len]);
            locator.start = cursor;
            cursor += locator.len;
        }
        self.storage = compacted;
        self.write_index = cursor;
        debug_assert_eq!(self.write_index, self.live_count);
    }
}

impl MatchStore for PackedMatchStore {
    fn insert(&mut self, bucket_index: usize, offset: u64) {
        let mut locator = self.locators[bucket_index];

        if locator.len == 0 {
            self.ensure_tail_capacity(1);
            self.storage[self.write_index] = offset;
            self.locators[bucket_index] = BucketLocator {
                start: self.write_index,
                len: 1,
            };
            self.write_index += 1;
            self.used_buckets += 1;
            self.live_count += 1;
            return;
        }

        if locator.len == MAX_BUCKET_CAPACITY {
            // Amortized FIFO eviction: abandon the oldest slots in place.
            locator.start += BUCKET_EVICTION_COUNT;
            locator.len -= BUCKET_EVICTION_COUNT;
            self.live_count -= BUCKET_EVICTION_COUNT;
            self.locators[bucket_index] = locator;
        }

        let at_tail = locator.start + locator.len == self.write_index;
        if !at_tail || self.write_index == self.storage.len() {
            // The segment cannot grow where it is: move it to the cursor.
            self.ensure_tail_capacity(locator.len + 1);
            // Compaction may have moved the segment; re-read its locator.
            locator = self.locators[bucket_index];
            self.storage
                .copy_within(locator.start..locator.start + locator.len, self.write_index);
            locator.start = self.write_index;
            self.write_index += locator.len;
        }

        self.storage[self.write_index] = offset;
        self.write_index += 1;
        locator.len += 1;
        self.locators[bucket_index] = locator;
        self.live_count += 1;
    }

    fn bucket(&self, bucket_index: usize) -> &[u64] {
        let locator = self.locators[bucket_index];
        &self.storage[locator.start..locator.start + locator.len]
    }

    fn used_bucket_count(&self) -> usize {
        self.used_buckets
    }

    fn total_element_count(&self) -> usize {
        self.live_count
    }
}
