#![no_main]
use libfuzzer_sys::fuzz_target;

use lzu8::encoding::{base64, binary_string};

// Every wrapper must round-trip arbitrary payloads, and every decoder must
// survive arbitrary text without panicking.
fuzz_target!(|data: &[u8]| {
    assert_eq!(base64::decode(&base64::encode(data)).unwrap(), data);
    assert_eq!(binary_string::decode(&binary_string::encode(data)).unwrap(), data);
    assert_eq!(
        binary_string::decode_storage(&binary_string::encode_storage(data)).unwrap(),
        data
    );

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = base64::decode(text);
        let _ = binary_string::decode(text);
        let _ = binary_string::decode_storage(text);
    }
});
