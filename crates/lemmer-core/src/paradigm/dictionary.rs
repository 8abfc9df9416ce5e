use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::sync::OnceLock;

use sha2::{Digest, Sha256};
use tracing::{debug, debug_span};

use crate::settings::{settings, DictionarySettings};
use crate::trie::{CompactTrie, TrieError};

use super::{single_word_paradigm, Paradigm, ParadigmKey, SuffixTable};

#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("trie error: {0}")]
    Trie(#[from] TrieError),
    #[error("format error: {0}")]
    Format(String),
    #[error("corrupt dictionary entry {word:?}: {reason}")]
    CorruptDictionary { word: String, reason: String },
}

/// Word → paradigm lister backed by a packed-value trie and shared form tables.
pub struct ParadigmDictionary {
    words: CompactTrie<u64>,
    table: SuffixTable,
    fingerprint: OnceLock<String>,
}

impl ParadigmDictionary {
    pub fn from_parts(words: CompactTrie<u64>, table: SuffixTable) -> Self {
        Self {
            words,
            table,
            fingerprint: OnceLock::new(),
        }
    }

    /// Load from a serialized word trie, the suffix text stream and the
    /// paradigm boundary stream.
    pub fn from_streams<W, S, P>(mut words: W, suffixes: S, paradigms: P) -> Result<Self, DictError>
    where
        W: Read,
        S: io::BufRead,
        P: Read,
    {
        let mut trie_bytes = Vec::new();
        words.read_to_end(&mut trie_bytes)?;
        let words = CompactTrie::from_bytes(trie_bytes)?;
        let table = SuffixTable::read(suffixes, paradigms)?;
        debug!(
            words = words.len(),
            forms = table.len(),
            boundaries = table.boundaries().len(),
            "dictionary loaded from streams"
        );
        Ok(Self::from_parts(words, table))
    }

    /// Open a dictionary directory using the global settings.
    pub fn open(dir: &Path) -> Result<Self, DictError> {
        Self::open_with(dir, &settings().dictionary)
    }

    pub fn open_with(dir: &Path, config: &DictionarySettings) -> Result<Self, DictError> {
        let _span = debug_span!("open_dictionary", dir = %dir.display()).entered();

        let trie_path = dir.join(&config.trie_file);
        let words = if config.mmap {
            CompactTrie::open(&trie_path)?
        } else {
            CompactTrie::read(&trie_path)?
        };
        let suffixes = BufReader::new(File::open(dir.join(&config.suffixes_file))?);
        let paradigms = BufReader::new(File::open(dir.join(&config.paradigms_file))?);
        let table = SuffixTable::read(suffixes, paradigms)?;
        debug!(
            words = words.len(),
            forms = table.len(),
            boundaries = table.boundaries().len(),
            mmap = config.mmap,
            "dictionary loaded"
        );

        let dict = Self::from_parts(words, table);
        if config.eager_validation {
            dict.validate()?;
        }
        Ok(dict)
    }

    /// Number of words in the trie.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &CompactTrie<u64> {
        &self.words
    }

    pub fn suffix_table(&self) -> &SuffixTable {
        &self.table
    }

    pub fn is_word(&self, word: &str) -> bool {
        self.words.contains_str(word)
    }

    pub fn lookup(&self, word: &str) -> Option<ParadigmKey> {
        self.words.find_exact_str(word).map(ParadigmKey::unpack)
    }

    /// All forms of `word`. A word missing from the dictionary is its own
    /// and only form.
    pub fn forms(&self, word: &str) -> Result<Paradigm, DictError> {
        match self.lookup(word) {
            Some(key) => self.table.expand(word, key),
            None => Ok(single_word_paradigm(word)),
        }
    }

    /// Expand every word once, failing on the first corrupt entry.
    pub fn validate(&self) -> Result<(), DictError> {
        let _span = debug_span!("validate_dictionary", words = self.words.len()).entered();
        for (units, value) in self.words.iter() {
            let word = String::from_utf16(&units).map_err(|_| DictError::CorruptDictionary {
                word: String::from_utf16_lossy(&units),
                reason: "key is not valid UTF-16".to_string(),
            })?;
            self.table.expand(&word, ParadigmKey::unpack(value))?;
        }
        debug!("dictionary valid");
        Ok(())
    }

    /// Hex SHA-256 of the serialized word trie, computed on first call.
    pub fn fingerprint(&self) -> &str {
        self.fingerprint.get_or_init(|| {
            let digest = hex::encode(Sha256::digest(self.words.as_bytes()));
            debug!(fingerprint = %digest, "fingerprint computed");
            digest
        })
    }
}

impl fmt::Debug for ParadigmDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParadigmDictionary")
            .field("words", &self.words.len())
            .field("forms", &self.table.len())
            .field("boundaries", &self.table.boundaries().len())
            .finish()
    }
}
