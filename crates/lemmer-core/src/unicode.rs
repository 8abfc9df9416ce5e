//! Character-level helpers for Kazakh Latin and Cyrillic text.

use std::borrow::Cow;
use std::sync::LazyLock;

use icu_normalizer::ComposingNormalizerBorrowed;

static NFC: LazyLock<ComposingNormalizerBorrowed<'static>> =
    LazyLock::new(ComposingNormalizerBorrowed::new_nfc);

/// Cyrillic capital О followed by a combining acute accent. NFC has no
/// precomposed form for it, but it shows up as a homoglyph of Latin Ó.
const CYRILLIC_O_ACUTE: &str = "\u{041E}\u{0301}";
const LATIN_O_ACUTE: &str = "\u{00D3}";

/// NFC-normalize `text` and rewrite every Cyrillic `О́` to Latin `Ó`.
pub fn normalize(text: &str) -> Cow<'_, str> {
    let composed = NFC.normalize(text);
    if composed.contains(CYRILLIC_O_ACUTE) {
        Cow::Owned(composed.replace(CYRILLIC_O_ACUTE, LATIN_O_ACUTE))
    } else {
        composed
    }
}

/// Single-character uppercase mapping. Characters whose uppercase form
/// expands to several characters (ß → SS) map to themselves.
pub fn simple_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Single-character lowercase mapping with Kazakh dotted/dotless I:
/// `I` → `ı` and `İ` → `i`.
pub fn fold_lower(c: char) -> char {
    match c {
        'I' => 'ı',
        'İ' => 'i',
        _ => {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        }
    }
}

/// Uppercase only the first character of `s`.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Byte offset of the position `units` UTF-16 code units into `s`.
///
/// Returns `None` when `units` exceeds the string or splits a surrogate pair.
pub fn utf16_to_byte_offset(s: &str, units: usize) -> Option<usize> {
    let mut counted = 0;
    for (byte, c) in s.char_indices() {
        if counted == units {
            return Some(byte);
        }
        counted += c.len_utf16();
        if counted > units {
            return None;
        }
    }
    (counted == units).then_some(s.len())
}

pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}
