use std::path::Path;
use std::sync::Arc;

use tracing::debug_span;

use lemmer_core::paradigm::{DictError, Paradigm};
use lemmer_core::settings::settings;
use lemmer_core::translit::KazDetransliterator;

use crate::morphology::{Morphology, Recognition};

/// Result of [`Engine::forms_for_latin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatinForms {
    pub cyrillic: String,
    pub recognition: Recognition,
    pub paradigm: Paradigm,
}

/// Detransliteration and paradigm listing behind one shared handle.
///
/// Immutable once built; wrap in an `Arc` to share across threads.
#[derive(Debug, Clone)]
pub struct Engine {
    detranslit: Arc<KazDetransliterator>,
    morphology: Morphology,
    convert_all_chars: bool,
}

impl Engine {
    /// `convert_all_chars` is the mode used by [`Engine::detransliterate`].
    pub fn new(
        detranslit: Arc<KazDetransliterator>,
        morphology: Morphology,
        convert_all_chars: bool,
    ) -> Self {
        Self {
            detranslit,
            morphology,
            convert_all_chars,
        }
    }

    /// Global detransliterator plus the dictionary in `dict_dir`, with the
    /// mode from `[detranslit]` settings.
    pub fn open(dict_dir: &Path) -> Result<Self, DictError> {
        Ok(Self::new(
            KazDetransliterator::shared(),
            Morphology::open(dict_dir)?,
            settings().detranslit.convert_all_chars,
        ))
    }

    /// Global detransliterator with no dictionary, with the mode from
    /// `[detranslit]` settings.
    pub fn without_dictionary() -> Self {
        Self::new(
            KazDetransliterator::shared(),
            Morphology::SingleForm,
            settings().detranslit.convert_all_chars,
        )
    }

    pub fn with_convert_all_chars(mut self, convert_all_chars: bool) -> Self {
        self.convert_all_chars = convert_all_chars;
        self
    }

    pub fn detransliterator(&self) -> &KazDetransliterator {
        &self.detranslit
    }

    pub fn morphology(&self) -> &Morphology {
        &self.morphology
    }

    /// Detransliterate in the engine's default mode.
    pub fn detransliterate(&self, text: &str) -> Option<String> {
        self.detranslit.convert(text, self.convert_all_chars)
    }

    pub fn detransliterate_with(&self, text: &str, convert_all_chars: bool) -> Option<String> {
        self.detranslit.convert(text, convert_all_chars)
    }

    pub fn recognize(&self, word: &str) -> Recognition {
        self.morphology.recognize(word)
    }

    pub fn forms(&self, word: &str) -> Result<Paradigm, DictError> {
        self.morphology.forms(word)
    }

    /// Strictly detransliterate a Latin word, then list its forms.
    ///
    /// `Ok(None)` when the word contains letters the detransliterator
    /// cannot map.
    pub fn forms_for_latin(&self, word: &str) -> Result<Option<LatinForms>, DictError> {
        let _span = debug_span!("forms_for_latin", len = word.len()).entered();
        let Some(cyrillic) = self.detranslit.convert(word, false) else {
            return Ok(None);
        };
        let recognition = self.morphology.recognize(&cyrillic);
        let paradigm = self.morphology.forms(&cyrillic)?;
        Ok(Some(LatinForms {
            cyrillic,
            recognition,
            paradigm,
        }))
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.morphology.fingerprint()
    }
}
