use std::iter;
use std::sync::{Arc, OnceLock};

use tracing::{debug, debug_span};

use crate::trie::CompactTrie;
use crate::unicode::{self, capitalize_first, fold_lower};

use super::fixlist::{compile_fixlist, parse_fixlist_toml, FixlistConfigError, DEFAULT_FIXLIST_TOML};
use super::tables::{self, Sound};

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Shortest fixlist match applied when it does not span the whole word.
const MIN_PARTIAL_FIXLIST_MATCH: usize = 4;

/// A letter with no mapping met in strict mode.
struct Rejected;

/// Kazakh Latin → Cyrillic detransliterator.
///
/// Holds the compiled fixlist; the letter tables are static. Immutable after
/// construction, so one instance can be shared across threads.
#[derive(Debug)]
pub struct KazDetransliterator {
    fixlist: CompactTrie<String>,
}

impl KazDetransliterator {
    pub fn new(fixlist: CompactTrie<String>) -> Self {
        Self { fixlist }
    }

    /// Build from fixlist TOML text (see [`parse_fixlist_toml`]).
    pub fn from_fixlist_toml(toml_str: &str) -> Result<Self, FixlistConfigError> {
        let entries = parse_fixlist_toml(toml_str)?;
        let fixlist = compile_fixlist(&entries)?;
        debug!(entries = entries.len(), "fixlist compiled");
        Ok(Self::new(fixlist))
    }

    /// Set a custom fixlist TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), FixlistConfigError> {
        // Validate eagerly
        compile_fixlist(&parse_fixlist_toml(&toml_content)?)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| FixlistConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static KazDetransliterator {
        Self::instance().as_ref()
    }

    /// The global singleton as a shareable handle.
    pub fn shared() -> Arc<KazDetransliterator> {
        Arc::clone(Self::instance())
    }

    fn instance() -> &'static Arc<KazDetransliterator> {
        static INSTANCE: OnceLock<Arc<KazDetransliterator>> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_FIXLIST_TOML);
            Arc::new(Self::from_fixlist_toml(toml_str).expect("fixlist TOML must be valid"))
        })
    }

    pub fn fixlist(&self) -> &CompactTrie<String> {
        &self.fixlist
    }

    /// Convert Kazakh Latin text to Cyrillic.
    ///
    /// Latin word runs are rewritten; everything else passes through, with
    /// `C`, `W` and `X` mapped to their usual Cyrillic renderings. With
    /// `convert_all_chars = false` any letter that has no mapping rejects the
    /// whole text and `None` is returned.
    pub fn convert(&self, text: &str, convert_all_chars: bool) -> Option<String> {
        let _span = debug_span!("detransliterate", len = text.len(), convert_all_chars).entered();

        let normalized = unicode::normalize(text);
        let mut out = String::with_capacity(normalized.len() * 2);
        let mut word: Vec<char> = Vec::new();

        // A trailing `None` closes the last run.
        for c in normalized.chars().map(Some).chain(iter::once(None)) {
            if let Some(c) = c {
                if tables::is_latin_letter(c) {
                    word.push(c);
                    continue;
                }
            }
            if !word.is_empty() {
                if self.convert_word(&word, convert_all_chars, &mut out).is_err() {
                    debug!(rejected = true);
                    return None;
                }
                word.clear();
            }
            let Some(c) = c else { break };
            if push_unmapped(c, convert_all_chars, &mut out).is_err() {
                debug!(rejected = true);
                return None;
            }
        }

        debug!(rejected = false, out_len = out.len());
        Some(out)
    }

    fn convert_word(
        &self,
        word: &[char],
        convert_all_chars: bool,
        out: &mut String,
    ) -> Result<(), Rejected> {
        let lower: Vec<char> = word.iter().map(|&c| fold_lower(c)).collect();
        let mut pos = 0;

        if let Some((len, replacement)) = self.fixlist_match(&lower) {
            let source: String = word[..len].iter().collect();
            out.push_str(&convert_case(&source, &replacement));
            pos = len;
        }

        // Each input position owns the output it writes. The sound only
        // moves on when the position just before wrote its own output, so it
        // holds across the second letter of a digraph and starts out
        // `Unknown` after a fixlist prefix.
        let mut prev = Sound::Unknown;
        let mut last_slot: Option<usize> = None;

        while pos < word.len() {
            if let Some(c) = last_slot.and_then(|slot| out[slot..].chars().next_back()) {
                prev = tables::classify(c);
            }
            let slot = out.len();

            if pos + 1 < word.len() {
                let pair: String = lower[pos..pos + 2].iter().collect();
                if let Some(variant) = tables::digraph(&pair) {
                    let source: String = word[pos..pos + 2].iter().collect();
                    out.push_str(&convert_case(&source, variant.select(prev)));
                    last_slot = None;
                    pos += 2;
                    continue;
                }
            }

            let c = word[pos];
            match tables::single(c) {
                Some(variant) => out.push_str(variant.select(prev)),
                None => push_unmapped(c, convert_all_chars, out)?,
            }
            last_slot = Some(slot);
            pos += 1;
        }
        Ok(())
    }

    /// Longest fixlist entry that is a prefix of the lowercased word, as
    /// `(chars, replacement)`. Short matches count only when they cover the
    /// whole word.
    fn fixlist_match(&self, lower: &[char]) -> Option<(usize, String)> {
        if lower.len() < 2 {
            return None;
        }
        let key: String = lower.iter().collect();
        let (units, replacement) = self.fixlist.find_longest_prefix_str(&key)?;
        let byte = unicode::utf16_to_byte_offset(&key, units)?;
        let len = key[..byte].chars().count();
        (len >= MIN_PARTIAL_FIXLIST_MATCH || len == lower.len()).then_some((len, replacement))
    }
}

fn push_unmapped(c: char, convert_all_chars: bool, out: &mut String) -> Result<(), Rejected> {
    if !convert_all_chars && c.is_alphabetic() {
        return Err(Rejected);
    }
    match tables::irregular(c) {
        Some(target) => out.push_str(target),
        None => out.push(c),
    }
    Ok(())
}

/// Carry the casing pattern of `source` over to `target`.
///
/// An all-uppercase source yields an all-uppercase target. Otherwise a source
/// starting with an uppercase alphabet letter yields a capitalized target, and
/// anything else a lowercase one.
pub fn convert_case(source: &str, target: &str) -> String {
    if source.is_empty() {
        return String::new();
    }
    if source.to_uppercase() == source {
        return target.to_uppercase();
    }
    match source.chars().next() {
        Some(first) if tables::is_latin_uppercase(first) => capitalize_first(target),
        _ => target.to_lowercase(),
    }
}

/// Convert with the global detransliterator.
pub fn convert_latin_to_cyrillic(text: &str, convert_all_chars: bool) -> Option<String> {
    KazDetransliterator::global().convert(text, convert_all_chars)
}
