//! Compile-time CLI defaults.

/// How many input bytes each streaming call processes by default.
/// Large enough to amortize per-call window maintenance, small enough to
/// keep peak memory flat on arbitrarily large files.
pub const DEFAULT_BLOCK_SIZE: usize = 64 * 1024;

/// Extension appended to compressed files (`report.txt` → `report.txt.lzu8`).
pub const COMPRESSED_EXTENSION: &str = "lzu8";

/// Smallest accepted `--block-size`; below this the window bookkeeping
/// dominates and throughput collapses.
pub const MIN_BLOCK_SIZE: usize = 256;
