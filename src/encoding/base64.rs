//! Base64 (RFC 4648, standard alphabet, `=` padding).
//!
//! Used to move compressed bytes through text-only channels.  Encoding is
//! straight 3-byte-to-4-character grouping; decoding runs a 6-bit
//! accumulator and rejects any character outside the alphabet.

use super::EncodingError;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const PAD: u8 = b'=';

/// Reverse lookup: alphabet index, or 0xFF for characters outside it.
const fn build_reverse_table() -> [u8; 256] {
    let mut table = [0xFFu8; 256];
    let mut i = 0;
    while i < 64 {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

const REVERSE: [u8; 256] = build_reverse_table();

pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    let mut chunks = bytes.chunks_exact(3);
    for chunk in &mut chunks {
        let group = u32::from(chunk[0]) << 16 | u32::from(chunk[1]) << 8 | u32::from(chunk[2]);
        out.push(ALPHABET[(group >> 18 & 0x3F) as usize] as char);
        out.push(ALPHABET[(group >> 12 & 0x3F) as usize] as char);
        out.push(ALPHABET[(group >> 6 & 0x3F) as usize] as char);
        out.push(ALPHABET[(group & 0x3F) as usize] as char);
    }
    match chunks.remainder() {
        [a] => {
            out.push(ALPHABET[(a >> 2) as usize] as char);
            out.push(ALPHABET[((a & 0x03) << 4) as usize] as char);
            out.push(PAD as char);
            out.push(PAD as char);
        }
        [a, b] => {
            out.push(ALPHABET[(a >> 2) as usize] as char);
            out.push(ALPHABET[((a & 0x03) << 4 | b >> 4) as usize] as char);
            out.push(ALPHABET[((b & 0x0F) << 2) as usize] as char);
            out.push(PAD as char);
        }
        _ => {}
    }
    out
}

pub fn decode(text: &str) -> Result<Vec<u8>, EncodingError> {
    let input = text.as_bytes();
    // Trailing padding carries no bits.
    let trimmed = input
        .iter()
        .rposition(|&b| b != PAD)
        .map_or(&input[..0], |last| &input[..=last]);

    let mut out = Vec::with_capacity(trimmed.len() * 3 / 4 + 2);
    let mut accumulator: u32 = 0;
    let mut bits = 0u32;
    for &b in trimmed {
        let value = REVERSE[b as usize];
        if value == 0xFF {
            return Err(EncodingError::InvalidBase64);
        }
        accumulator = accumulator << 6 | u32::from(value);
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            out.push((accumulator >> bits) as u8);
        }
    }
    // A whole dangling character (6 leftover bits) cannot come from any
    // valid encoding; up to 5 leftover bits are the final group's padding.
    if bits >= 6 {
        return Err(EncodingError::InvalidBase64);
    }
    Ok(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4648 §10 test vectors.
    #[test]
    fn rfc_vectors_encode() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "Zg==");
        assert_eq!(encode(b"fo"), "Zm8=");
        assert_eq!(encode(b"foo"), "Zm9v");
        assert_eq!(encode(b"foob"), "Zm9vYg==");
        assert_eq!(encode(b"fooba"), "Zm9vYmE=");
        assert_eq!(encode(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn rfc_vectors_decode() {
        assert_eq!(decode("").unwrap(), b"");
        assert_eq!(decode("Zg==").unwrap(), b"f");
        assert_eq!(decode("Zm8=").unwrap(), b"fo");
        assert_eq!(decode("Zm9vYmFy").unwrap(), b"foobar");
    }

    #[test]
    fn decode_accepts_missing_padding() {
        assert_eq!(decode("Zg").unwrap(), b"f");
        assert_eq!(decode("Zm9vYg").unwrap(), b"foob");
    }

    #[test]
    fn decode_rejects_foreign_characters() {
        assert_eq!(decode("Zm9v!A=="), Err(EncodingError::InvalidBase64));
        assert_eq!(decode("Zm 9v"), Err(EncodingError::InvalidBase64));
    }

    #[test]
    fn decode_rejects_dangling_character() {
        // length ≡ 1 (mod 4) leaves six undecodable bits
        assert_eq!(decode("Z"), Err(EncodingError::InvalidBase64));
        assert_eq!(decode("Zm9vZ"), Err(EncodingError::InvalidBase64));
    }

    #[test]
    fn round_trips_binary_data() {
        let bytes: Vec<u8> = (0u16..=255).map(|b| b as u8).collect();
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }
}
