//! Deterministic mixed-script text generator for tests and benchmarks.
//!
//! Produces natural-looking prose with a fixed seed: Latin filler words,
//! occasional accented and CJK words so multi-byte sequences appear
//! throughout, and enough word repetition for back-references to find
//! matches.  Output is always valid UTF-8.

// ─────────────────────────────────────────────────────────────────────────────
// Word pools
// ─────────────────────────────────────────────────────────────────────────────

static ASCII_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit",
    "sed", "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et",
    "dolore", "magna", "aliqua", "enim", "ad", "minim", "veniam", "quis",
    "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip", "ex", "ea",
    "commodo", "consequat", "duis", "aute", "irure", "in", "reprehenderit",
    "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur",
];

/// Accented Latin and CJK words, sprinkled in to keep two- and three-byte
/// sequences present in generated text.
static WIDE_WORDS: &[&str] = &[
    "café", "naïve", "über", "señor", "crème", "fjörd", "élan", "résumé",
    "数据", "压缩", "算法", "文字", "流式", "编码", "历史", "匹配",
];

// ─────────────────────────────────────────────────────────────────────────────
// Generator
// ─────────────────────────────────────────────────────────────────────────────

/// Small xorshift PRNG; deterministic for a given seed, no external crates.
struct Rng(u32);

impl Rng {
    fn new(seed: u32) -> Self {
        // Zero would get stuck; mix the seed into a non-zero state.
        Rng(seed.wrapping_mul(2_654_435_761) | 1)
    }

    #[inline]
    fn next(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }

    #[inline]
    fn below(&mut self, bound: u32) -> u32 {
        ((self.next() as u64 * bound as u64) >> 32) as u32
    }
}

/// Generate roughly `target_len` bytes of seeded prose.  The result may
/// overshoot by one word plus punctuation.
pub fn text(target_len: usize, seed: u32) -> String {
    let mut rng = Rng::new(seed);
    let mut out = String::with_capacity(target_len + 32);
    let mut words_in_sentence = 0u32;
    let mut sentence_len = 6 + rng.below(9);

    while out.len() < target_len {
        let word = if rng.below(8) == 0 {
            WIDE_WORDS[rng.below(WIDE_WORDS.len() as u32) as usize]
        } else {
            ASCII_WORDS[rng.below(ASCII_WORDS.len() as u32) as usize]
        };

        if words_in_sentence == 0 {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        } else {
            out.push_str(word);
        }

        words_in_sentence += 1;
        if words_in_sentence >= sentence_len {
            out.push_str(if rng.below(12) == 0 { "? " } else { ". " });
            words_in_sentence = 0;
            sentence_len = 6 + rng.below(9);
            if rng.below(5) == 0 {
                out.push('\n');
            }
        } else {
            out.push_str(if rng.below(10) == 0 { ", " } else { " " });
        }
    }
    out.push('.');
    out
}
