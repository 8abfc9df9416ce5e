use std::path::Path;
use std::sync::Arc;

use lemmer_core::paradigm::{single_word_paradigm, DictError, Paradigm, ParadigmDictionary};

/// How a word was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recognition {
    /// Present in the automorphology dictionary.
    Known,
    /// Not in any dictionary.
    Foundling,
}

/// Strategy for listing the forms of a word.
#[derive(Debug, Clone)]
pub enum Morphology {
    /// Dictionary-backed paradigm lister.
    Automorphology(Arc<ParadigmDictionary>),
    /// Every word is its own and only form.
    SingleForm,
}

impl Morphology {
    /// Open a dictionary directory as [`Morphology::Automorphology`].
    pub fn open(dir: &Path) -> Result<Self, DictError> {
        Ok(Self::Automorphology(Arc::new(ParadigmDictionary::open(dir)?)))
    }

    pub fn is_word(&self, word: &str) -> bool {
        match self {
            Self::Automorphology(dict) => dict.is_word(word),
            Self::SingleForm => false,
        }
    }

    pub fn recognize(&self, word: &str) -> Recognition {
        if self.is_word(word) {
            Recognition::Known
        } else {
            Recognition::Foundling
        }
    }

    pub fn forms(&self, word: &str) -> Result<Paradigm, DictError> {
        match self {
            Self::Automorphology(dict) => dict.forms(word),
            Self::SingleForm => Ok(single_word_paradigm(word)),
        }
    }

    /// Content hash of the backing dictionary, if any.
    pub fn fingerprint(&self) -> Option<&str> {
        match self {
            Self::Automorphology(dict) => Some(dict.fingerprint()),
            Self::SingleForm => None,
        }
    }
}
