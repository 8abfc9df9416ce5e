use std::collections::BTreeMap;

use serde::Deserialize;

use crate::trie::{CompactTrie, CompactTrieBuilder, TrieError};
use crate::unicode::fold_lower;

use super::tables::is_latin_letter;

pub const DEFAULT_FIXLIST_TOML: &str = include_str!("default_fixlist.toml");

#[derive(Deserialize)]
struct FixlistConfig {
    fixlist: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FixlistConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[fixlist] table is empty")]
    Empty,
    #[error("key is not lowercase Kazakh Latin: {0}")]
    InvalidKey(String),
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("failed to compile fixlist: {0}")]
    Compile(#[from] TrieError),
    #[error("fixlist already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a sorted `BTreeMap<latin, cyrillic>`.
pub fn parse_fixlist_toml(toml_str: &str) -> Result<BTreeMap<String, String>, FixlistConfigError> {
    let config: FixlistConfig =
        toml::from_str(toml_str).map_err(|e| FixlistConfigError::Parse(e.to_string()))?;

    if config.fixlist.is_empty() {
        return Err(FixlistConfigError::Empty);
    }

    for (key, value) in &config.fixlist {
        // Single letters never reach the fixlist.
        let valid = key.chars().count() >= 2
            && key.chars().all(|c| is_latin_letter(c) && fold_lower(c) == c);
        if !valid {
            return Err(FixlistConfigError::InvalidKey(key.clone()));
        }
        if value.is_empty() {
            return Err(FixlistConfigError::EmptyValue(key.clone()));
        }
    }

    Ok(config.fixlist)
}

/// Compile parsed entries into the trie the detransliterator queries.
pub fn compile_fixlist(
    entries: &BTreeMap<String, String>,
) -> Result<CompactTrie<String>, FixlistConfigError> {
    let trie = entries
        .iter()
        .map(|(latin, cyrillic)| (latin, cyrillic.clone()))
        .collect::<CompactTrieBuilder<String>>()
        .build()?;
    Ok(trie)
}

/// Returns the embedded default fixlist TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_FIXLIST_TOML
}
