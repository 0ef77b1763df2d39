//! Sliding-window buffer helpers shared by the compressor and decompressor.
//!
//! Both sides keep a bounded trailing history of the byte stream: the
//! compressor over its input, the decompressor over its output.  Physical
//! buffer positions are paired with a logical stream offset by the callers,
//! so cropping the front of the buffer never invalidates stored absolute
//! offsets — callers add the returned drop count to their base offset.

/// Crop `buf` so that at most the trailing `keep` bytes remain.
///
/// Returns the number of bytes removed from the front (0 when the buffer is
/// already small enough).
pub fn crop_to_tail(buf: &mut Vec<u8>, keep: usize) -> usize {
    if buf.len() <= keep {
        return 0;
    }
    let dropped = buf.len() - keep;
    buf.drain(..dropped);
    dropped
}

/// Crop `buf` to its trailing `keep` bytes, then append `bytes`.
///
/// Returns `(dropped, start)` where `dropped` is the number of bytes removed
/// from the front and `start` is the index at which the appended bytes begin.
pub fn crop_and_append(buf: &mut Vec<u8>, keep: usize, bytes: &[u8]) -> (usize, usize) {
    let dropped = crop_to_tail(buf, keep);
    let start = buf.len();
    buf.extend_from_slice(bytes);
    (dropped, start)
}
