//! Monotonic timing for verbose CLI reporting.
//!
//! `std::time::Instant` is monotonic and thread-safe everywhere Rust runs,
//! so a thin wrapper is all the CLI needs.

use std::time::Instant;

/// Monotonic stopwatch.  The absolute value is meaningless; only spans
/// between measurements are.
#[derive(Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Stopwatch { start: Instant::now() }
    }

    /// Nanoseconds elapsed since `start`.
    pub fn elapsed_ns(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }

    /// Seconds elapsed since `start`, for throughput arithmetic.
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Stopwatch::start()
    }
}

/// Format a byte rate as a human-readable `MB/s` figure.
pub fn throughput(bytes: usize, secs: f64) -> String {
    if secs <= 0.0 {
        return "inf MB/s".to_string();
    }
    format!("{:.1} MB/s", bytes as f64 / secs / (1024.0 * 1024.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotonic() {
        let sw = Stopwatch::start();
        let a = sw.elapsed_ns();
        let b = sw.elapsed_ns();
        assert!(b >= a);
    }

    #[test]
    fn throughput_formats_megabytes_per_second() {
        assert_eq!(throughput(2 * 1024 * 1024, 1.0), "2.0 MB/s");
        assert_eq!(throughput(1024, 0.0), "inf MB/s");
    }
}
