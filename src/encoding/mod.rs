//! Text-safe containers for compressed bytes.
//!
//! Raw compressed output is binary.  When it has to travel through a
//! channel that only carries text (JSON payloads, web storage, URLs built
//! by hand), it is wrapped in one of the encodings here and unwrapped on
//! the other side before decompression.

use std::fmt;

pub mod base64;
pub mod binary_string;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    /// Input contains characters outside the Base64 alphabet, or has an
    /// undecodable length.
    InvalidBase64,
    /// Input contains code units outside the packing range, or ends
    /// without a terminator.
    InvalidBinaryString,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidBase64 => write!(f, "invalid base64 input"),
            EncodingError::InvalidBinaryString => write!(f, "invalid binary string input"),
        }
    }
}

impl std::error::Error for EncodingError {}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding selection
// ─────────────────────────────────────────────────────────────────────────────

/// Container format for compressed bytes in transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressedEncoding {
    /// Raw bytes, no wrapping.
    #[default]
    ByteArray,
    /// RFC 4648 Base64 text.
    Base64,
    /// 15-bits-per-code-unit packed text.
    BinaryString,
    /// Binary string shifted clear of low code points, for embedded
    /// key-value stores.
    StorageBinaryString,
}

/// Wrap compressed bytes for the chosen channel.  Text encodings return
/// their UTF-8 byte representation.
pub fn encode_compressed_bytes(bytes: &[u8], encoding: CompressedEncoding) -> Vec<u8> {
    match encoding {
        CompressedEncoding::ByteArray => bytes.to_vec(),
        CompressedEncoding::Base64 => base64::encode(bytes).into_bytes(),
        CompressedEncoding::BinaryString => binary_string::encode(bytes).into_bytes(),
        CompressedEncoding::StorageBinaryString => {
            binary_string::encode_storage(bytes).into_bytes()
        }
    }
}

/// Unwrap compressed bytes received through the chosen channel.
pub fn decode_compressed_bytes(
    data: &[u8],
    encoding: CompressedEncoding,
) -> Result<Vec<u8>, EncodingError> {
    match encoding {
        CompressedEncoding::ByteArray => Ok(data.to_vec()),
        CompressedEncoding::Base64 => {
            let text = std::str::from_utf8(data).map_err(|_| EncodingError::InvalidBase64)?;
            base64::decode(text)
        }
        CompressedEncoding::BinaryString => {
            let text =
                std::str::from_utf8(data).map_err(|_| EncodingError::InvalidBinaryString)?;
            binary_string::decode(text)
        }
        CompressedEncoding::StorageBinaryString => {
            let text =
                std::str::from_utf8(data).map_err(|_| EncodingError::InvalidBinaryString)?;
            binary_string::decode_storage(text)
        }
    }
}
