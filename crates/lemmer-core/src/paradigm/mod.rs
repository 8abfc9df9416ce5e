//! Automorphology paradigm listing.
//!
//! A dictionary maps each known word to a packed [`ParadigmKey`]; the key
//! selects a stem inside the word and a paradigm in the shared
//! [`SuffixTable`], which expands into the word's inflected forms.

mod codec;
mod dictionary;
mod suffixes;

pub use codec::{ParadigmKey, PARADIGM_BITS, PREFIX_BITS, STEM_BITS};
pub use dictionary::{DictError, ParadigmDictionary};
pub use suffixes::{SuffixTable, PREFIX_SUFFIX_DELIMITER};

use serde::Serialize;

use crate::unicode::utf16_to_byte_offset;

/// One inflected form. `prefix_len` and `suffix_len` count UTF-16 code
/// units from the start and from the end of `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParadigmWord {
    pub text: String,
    pub prefix_len: usize,
    pub suffix_len: usize,
}

impl ParadigmWord {
    pub fn new(text: String, prefix_len: usize, suffix_len: usize) -> Self {
        Self {
            text,
            prefix_len,
            suffix_len,
        }
    }

    /// `(prefix, stem, suffix)` slices of `text`, or `None` when the lengths
    /// overlap or split a character.
    pub fn split(&self) -> Option<(&str, &str, &str)> {
        let total = crate::unicode::utf16_len(&self.text);
        let stem_end_units = total.checked_sub(self.suffix_len)?;
        if self.prefix_len > stem_end_units {
            return None;
        }
        let stem_start = utf16_to_byte_offset(&self.text, self.prefix_len)?;
        let stem_end = utf16_to_byte_offset(&self.text, stem_end_units)?;
        Some((
            &self.text[..stem_start],
            &self.text[stem_start..stem_end],
            &self.text[stem_end..],
        ))
    }
}

/// Headword first, then the generated forms in table order.
pub type Paradigm = Vec<ParadigmWord>;

/// Paradigm of a word with no dictionary entry.
pub fn single_word_paradigm(word: &str) -> Paradigm {
    vec![ParadigmWord::new(word.to_string(), 0, 0)]
}
