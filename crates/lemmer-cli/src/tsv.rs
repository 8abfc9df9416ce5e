//! Tab-separated packing input for `compile-trie`.
//!
//! One entry per line: `word<TAB>prefix_len<TAB>stem_len<TAB>paradigm`.
//! Blank lines and lines starting with `#` are skipped.

use kaz_lemmer::paradigm::ParadigmKey;
use kaz_lemmer::trie::CompactTrieBuilder;

#[derive(Debug, thiserror::Error)]
pub enum TsvError {
    #[error("line {line}: expected 4 tab-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: invalid {field}: {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: empty word")]
    EmptyWord { line: usize },
}

pub fn parse_paradigm_tsv(text: &str) -> Result<Vec<(String, ParadigmKey)>, TsvError> {
    let mut entries = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        if raw.trim().is_empty() || raw.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = raw.split('\t').collect();
        let [word, prefix, stem, paradigm] = fields[..] else {
            return Err(TsvError::FieldCount {
                line,
                found: fields.len(),
            });
        };
        if word.is_empty() {
            return Err(TsvError::EmptyWord { line });
        }

        macro_rules! number {
            ($value:expr, $field:literal) => {
                $value.trim().parse().map_err(|_| TsvError::InvalidNumber {
                    line,
                    field: $field,
                    value: $value.to_string(),
                })?
            };
        }
        let key = ParadigmKey::new(
            number!(prefix, "prefix length"),
            number!(stem, "stem length"),
            number!(paradigm, "paradigm index"),
        );
        entries.push((word.to_string(), key));
    }
    Ok(entries)
}

/// Packed-value trie builder over parsed entries. Later duplicates win.
pub fn build_paradigm_trie(entries: &[(String, ParadigmKey)]) -> CompactTrieBuilder<u64> {
    entries
        .iter()
        .map(|(word, key)| (word, key.pack()))
        .collect()
}
