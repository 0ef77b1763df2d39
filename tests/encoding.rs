//! Text-container encodings over real compressed payloads.

mod support;

use lzu8::encoding::{base64, binary_string};
use lzu8::{
    compress_str, decode_compressed_bytes, decompress_to_string, encode_compressed_bytes,
    CompressedEncoding, EncodingError,
};

#[test]
fn compressed_payloads_survive_every_container() {
    for text in support::all_sample_texts() {
        let compressed = compress_str(text);
        for encoding in [
            CompressedEncoding::ByteArray,
            CompressedEncoding::Base64,
            CompressedEncoding::BinaryString,
            CompressedEncoding::StorageBinaryString,
        ] {
            let wrapped = encode_compressed_bytes(&compressed, encoding);
            let unwrapped = decode_compressed_bytes(&wrapped, encoding).unwrap();
            assert_eq!(unwrapped, compressed, "{encoding:?}");
            assert_eq!(decompress_to_string(&unwrapped).unwrap(), text, "{encoding:?}");
        }
    }
}

#[test]
fn base64_matches_the_rfc_vectors() {
    assert_eq!(base64::encode(b"foobar"), "Zm9vYmFy");
    assert_eq!(base64::encode(b"foob"), "Zm9vYg==");
    assert_eq!(base64::decode("Zm9vYmE=").unwrap(), b"fooba");
}

#[test]
fn base64_output_is_plain_ascii() {
    let compressed = compress_str(support::CHINESE);
    let wrapped = encode_compressed_bytes(&compressed, CompressedEncoding::Base64);
    assert!(wrapped.iter().all(u8::is_ascii));
}

#[test]
fn binary_string_segments_concatenate() {
    let a = compress_str(support::ENGLISH);
    let b = compress_str(support::MIXED);
    let joined = format!("{}{}", binary_string::encode(&a), binary_string::encode(&b));
    let decoded = binary_string::decode(&joined).unwrap();
    let mut expected = a;
    expected.extend_from_slice(&b);
    assert_eq!(decoded, expected);
}

#[test]
fn storage_binary_string_avoids_control_characters() {
    let compressed = compress_str(support::HINDI);
    let wrapped = encode_compressed_bytes(&compressed, CompressedEncoding::StorageBinaryString);
    let text = String::from_utf8(wrapped).unwrap();
    assert!(text.chars().all(|c| c as u32 >= 0x800));
}

#[test]
fn corrupt_containers_are_reported_not_panicked() {
    assert_eq!(
        decode_compressed_bytes(b"not*base64*at*all!", CompressedEncoding::Base64),
        Err(EncodingError::InvalidBase64)
    );
    assert_eq!(
        decode_compressed_bytes("plain ascii".as_bytes(), CompressedEncoding::BinaryString),
        Err(EncodingError::InvalidBinaryString)
    );
    assert_eq!(
        decode_compressed_bytes(&[0xFF, 0x00], CompressedEncoding::StorageBinaryString),
        Err(EncodingError::InvalidBinaryString)
    );
}

#[test]
fn empty_payload_survives_every_container() {
    for encoding in [
        CompressedEncoding::ByteArray,
        CompressedEncoding::Base64,
        CompressedEncoding::BinaryString,
        CompressedEncoding::StorageBinaryString,
    ] {
        let wrapped = encode_compressed_bytes(&[], encoding);
        assert_eq!(decode_compressed_bytes(&wrapped, encoding).unwrap(), Vec::<u8>::new());
    }
}
