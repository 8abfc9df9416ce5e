//! Kazakh detransliteration and automorphology paradigm listing.
//!
//! - [`trie`]: immutable serialized prefix tree over UTF-16 code units
//! - [`translit`]: Latin → Cyrillic official-style detransliteration
//! - [`paradigm`]: packed paradigm values and form expansion
//! - [`settings`]: TOML configuration with embedded defaults

pub mod paradigm;
pub mod settings;
pub mod translit;
pub mod trie;
pub mod unicode;
