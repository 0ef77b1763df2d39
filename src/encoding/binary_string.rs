//! Binary string packing: arbitrary bytes as 15 bits per BMP code unit.
//!
//! Packs the input bit stream MSB-first into code units valued
//! `0..=0x7FFF`, pads the final unit with zero bits, and appends a
//! terminator unit `0x8000 | (byte_count & 1)`.  The decoder always
//! recovers either the original byte count or one extra zero pad byte;
//! the parity bit in the terminator tells the two apart.
//!
//! Concatenating encoded strings yields a decodable string: the decoder
//! treats each terminator as a segment boundary and resets its bit
//! accumulator.
//!
//! The storage variant shifts every unit up by `0x800`, keeping the output
//! clear of NUL, C0/C1 controls, and other low code points that embedded
//! key-value stores tend to mangle.  All produced values stay below the
//! surrogate range.

use super::EncodingError;

const UNIT_BITS: u32 = 15;
const TERMINATOR_BASE: u32 = 0x8000;

/// Code unit offset for the storage variant.
const STORAGE_OFFSET: u32 = 0x800;

pub fn encode(bytes: &[u8]) -> String {
    encode_with_offset(bytes, 0)
}

pub fn decode(text: &str) -> Result<Vec<u8>, EncodingError> {
    decode_with_offset(text, 0)
}

pub fn encode_storage(bytes: &[u8]) -> String {
    encode_with_offset(bytes, STORAGE_OFFSET)
}

pub fn decode_storage(text: &str) -> Result<Vec<u8>, EncodingError> {
    decode_with_offset(text, STORAGE_OFFSET)
}

fn encode_with_offset(bytes: &[u8], offset: u32) -> String {
    let unit_count = (bytes.len() * 8).div_ceil(UNIT_BITS as usize) + 1;
    let mut out = String::with_capacity(unit_count * 3);
    let mut accumulator: u32 = 0;
    let mut bits = 0u32;
    for &byte in bytes {
        accumulator = accumulator << 8 | u32::from(byte);
        bits += 8;
        if bits >= UNIT_BITS {
            bits -= UNIT_BITS;
            out.push(unit_char((accumulator >> bits) & 0x7FFF, offset));
        }
    }
    if bits > 0 {
        // Pad the final unit with trailing zero bits.
        out.push(unit_char((accumulator << (UNIT_BITS - bits)) & 0x7FFF, offset));
    }
    out.push(unit_char(TERMINATOR_BASE | (bytes.len() as u32 & 1), offset));
    out
}

fn decode_with_offset(text: &str, offset: u32) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(text.len() * 2);
    let mut segment_start = 0usize;
    let mut accumulator: u32 = 0;
    let mut bits = 0u32;
    let mut terminated = true;
    for ch in text.chars() {
        let unit = (ch as u32)
            .checked_sub(offset)
            .ok_or(EncodingError::InvalidBinaryString)?;
        if unit > TERMINATOR_BASE | 1 {
            return Err(EncodingError::InvalidBinaryString);
        }
        if unit >= TERMINATOR_BASE {
            // Segment boundary: drop the pad byte if the parity bit says the
            // segment decoded one byte long.  The pop must stay within the
            // current segment; an empty segment with a mismatched parity bit
            // has no pad byte to drop and cannot come from any encoding.
            let parity = (unit & 1) as usize;
            if (out.len() - segment_start) % 2 != parity {
                if out.len() == segment_start {
                    return Err(EncodingError::InvalidBinaryString);
                }
                out.pop();
            }
            segment_start = out.len();
            accumulator = 0;
            bits = 0;
            terminated = true;
            continue;
        }
        terminated = false;
        accumulator = accumulator << UNIT_BITS | unit;
        bits += UNIT_BITS;
        while bits >= 8 {
            bits -= 8;
            out.push((accumulator >> bits) as u8);
        }
    }
    if !terminated {
        return Err(EncodingError::InvalidBinaryString);
    }
    Ok(out)
}

#[inline]
fn unit_char(unit: u32, offset: u32) -> char {
    // SAFETY: unit <= 0x8001 and offset <= 0x800, so the sum is at most
    // 0x8801, below the surrogate range and well within char::MAX.
    unsafe { char::from_u32_unchecked(unit + offset) }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_a_lone_terminator() {
        let encoded = encode(b"");
        assert_eq!(encoded.chars().count(), 1);
        assert_eq!(decode(&encoded).unwrap(), b"");
    }

    #[test]
    fn round_trips_even_and_odd_lengths() {
        for len in 0..64usize {
            let bytes: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
            let encoded = encode(&bytes);
            assert_eq!(decode(&encoded).unwrap(), bytes, "length {len}");
        }
    }

    #[test]
    fn round_trips_all_byte_values() {
        let bytes: Vec<u8> = (0u16..=255).map(|b| b as u8).collect();
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn concatenated_encodings_decode_as_concatenated_bytes() {
        let a = b"hello".to_vec();
        let b = b" binary world".to_vec();
        let joined = format!("{}{}", encode(&a), encode(&b));
        let mut expected = a;
        expected.extend_from_slice(&b);
        assert_eq!(decode(&joined).unwrap(), expected);
    }

    #[test]
    fn unterminated_input_is_rejected() {
        let encoded = encode(b"some payload");
        let truncated: String = encoded.chars().take(encoded.chars().count() - 1).collect();
        assert_eq!(decode(&truncated), Err(EncodingError::InvalidBinaryString));
    }

    #[test]
    fn stray_terminator_cannot_eat_into_a_previous_segment() {
        // An odd-parity terminator right after a complete segment claims a
        // pad byte the empty segment never produced; accepting it would
        // silently drop the previous segment's last byte.
        let mut text = encode(b"ab");
        text.push('\u{8001}');
        assert_eq!(decode(&text), Err(EncodingError::InvalidBinaryString));

        // An even-parity empty segment is exactly `encode(b"")` and stays
        // legal in concatenations.
        let mut text = encode(b"ab");
        text.push('\u{8000}');
        assert_eq!(decode(&text).unwrap(), b"ab");
    }

    #[test]
    fn out_of_range_units_are_rejected() {
        assert_eq!(decode("\u{8802}"), Err(EncodingError::InvalidBinaryString));
        assert_eq!(decode("\u{10000}"), Err(EncodingError::InvalidBinaryString));
    }

    #[test]
    fn storage_variant_avoids_low_code_points() {
        let bytes = vec![0u8; 32];
        let encoded = encode_storage(&bytes);
        assert!(encoded.chars().all(|c| c as u32 >= STORAGE_OFFSET));
        assert_eq!(decode_storage(&encoded).unwrap(), bytes);
    }

    #[test]
    fn storage_variant_rejects_plain_encoding() {
        let encoded = encode(b"abcdef"); // contains units below the offset
        assert!(decode_storage(&encoded).is_err());
    }
}
