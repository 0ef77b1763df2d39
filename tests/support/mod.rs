//! Shared fixtures for the integration tests.
#![allow(dead_code)] // each test binary uses a different subset

/// Latin text with heavy phrase repetition.
pub const ENGLISH: &str = "I am sailing home. I am sailing home again. \
    I am sailing home across the sea, across the sea, across the quiet sea. \
    The wind that carries me home is the wind that carried me out.";

/// Chinese text, three-byte sequences throughout.
pub const CHINESE: &str = "子曰:学而时习之,不亦说乎?有朋自远方来,不亦乐乎?\
    人不知而不愠,不亦君子乎?子曰:温故而知新,可以为师矣。\
    子曰:学而不思则罔,思而不学则殆。学而时习之,不亦说乎?";

/// Hindi text, three-byte Devanagari sequences with combining marks.
pub const HINDI: &str = "सत्यमेव जयते नानृतं सत्येन पन्था विततो देवयानः। \
    सत्यमेव जयते नानृतं। येनाक्रमन्त्यृषयो ह्याप्तकामा यत्र तत् सत्यस्य परमं निधानम्।";

/// Mixed scripts and emoji, two- to four-byte sequences side by side.
pub const MIXED: &str = "Grüße aus München! こんにちは世界 — numbers 12345, \
    emoji 🌍🌍🌍 and more Grüße aus München! こんにちは世界 again. \
    Ça va? Ça va bien, merci. Ça va très bien. 🌍";

pub fn all_sample_texts() -> Vec<&'static str> {
    vec![ENGLISH, CHINESE, HINDI, MIXED]
}

/// Split `bytes` into `parts` pieces of near-equal size (byte boundaries,
/// not character boundaries).
pub fn split_into(bytes: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let step = bytes.len().div_ceil(parts).max(1);
    bytes.chunks(step).collect()
}
