//! Kazakh official Latin → Cyrillic letter tables.
//!
//! Single-character and irregular maps are keyed by the literal character
//! (case included). Digraph keys are lowercase. The Latin alphabet set holds
//! uppercase letters only; membership for tokenization goes through
//! [`simple_upper`].

use phf::{phf_map, phf_set};

use crate::unicode::simple_upper;

/// When the `special` target of a [`LetterMapVariant`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    None,
    AfterConsonant,
    AfterVowel,
}

/// Class of the previously produced Cyrillic character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Vowel,
    Consonant,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterMapVariant {
    pub default: &'static str,
    pub special: &'static str,
    pub condition: Condition,
}

impl LetterMapVariant {
    pub const fn plain(target: &'static str) -> Self {
        Self {
            default: target,
            special: target,
            condition: Condition::None,
        }
    }

    pub const fn conditioned(
        default: &'static str,
        special: &'static str,
        condition: Condition,
    ) -> Self {
        Self {
            default,
            special,
            condition,
        }
    }

    /// Target for a letter preceded by `prev`.
    pub fn select(&self, prev: Sound) -> &'static str {
        match (self.condition, prev) {
            (Condition::AfterConsonant, Sound::Consonant) | (Condition::AfterVowel, Sound::Vowel) => {
                self.special
            }
            _ => self.default,
        }
    }
}

use LetterMapVariant as V;

static SINGLE_CHAR_MAP: phf::Map<char, LetterMapVariant> = phf_map! {
    'I' => V::conditioned("И", "Й", Condition::AfterVowel),
    'ı' => V::conditioned("и", "й", Condition::AfterVowel),
    'Á' => V::plain("Ә"), 'á' => V::plain("ә"),
    'Ó' => V::plain("Ө"), 'ó' => V::plain("ө"),
    'Ú' => V::plain("Ү"), 'ú' => V::plain("ү"),
    'Ń' => V::plain("Ң"), 'ń' => V::plain("ң"),
    'Ǵ' => V::plain("Ғ"), 'ǵ' => V::plain("ғ"),
    'Ý' => V::plain("У"), 'ý' => V::plain("у"),
    'A' => V::plain("А"), 'a' => V::plain("а"),
    'B' => V::plain("Б"), 'b' => V::plain("б"),
    'S' => V::plain("С"), 's' => V::plain("с"),
    'D' => V::plain("Д"), 'd' => V::plain("д"),
    'E' => V::plain("Е"), 'e' => V::plain("е"),
    'F' => V::plain("Ф"), 'f' => V::plain("ф"),
    'G' => V::plain("Г"), 'g' => V::plain("г"),
    'H' => V::plain("Х"), 'h' => V::plain("х"),
    'İ' => V::plain("І"), 'i' => V::plain("і"),
    'K' => V::plain("К"), 'k' => V::plain("к"),
    'L' => V::plain("Л"), 'l' => V::plain("л"),
    'M' => V::plain("М"), 'm' => V::plain("м"),
    'N' => V::plain("Н"), 'n' => V::plain("н"),
    'O' => V::plain("О"), 'o' => V::plain("о"),
    'P' => V::plain("П"), 'p' => V::plain("п"),
    'Q' => V::plain("Қ"), 'q' => V::plain("қ"),
    'R' => V::plain("Р"), 'r' => V::plain("р"),
    'T' => V::plain("Т"), 't' => V::plain("т"),
    'U' => V::plain("Ұ"), 'u' => V::plain("ұ"),
    'V' => V::plain("В"), 'v' => V::plain("в"),
    'Y' => V::plain("Ы"), 'y' => V::plain("ы"),
    'Z' => V::plain("З"), 'z' => V::plain("з"),
    'J' => V::plain("Ж"), 'j' => V::plain("ж"),
};

static DIGRAPH_MAP: phf::Map<&'static str, LetterMapVariant> = phf_map! {
    "ıý" => V::conditioned("ю", "ию", Condition::AfterConsonant),
    "ıa" => V::conditioned("я", "ия", Condition::AfterConsonant),
    "sh" => V::plain("ш"),
    "ch" => V::plain("ч"),
};

/// Borrowed letters with no place in the alphabet proper.
static IRREGULAR_MAP: phf::Map<char, &'static str> = phf_map! {
    'C' => "К",
    'c' => "к",
    'W' => "В",
    'w' => "в",
    'X' => "Кс",
    'x' => "кс",
};

/// Letters that make up a Latin word run. The hyphen joins compounds.
static LATIN_ALPHABET: phf::Set<char> = phf_set! {
    'A', 'Á', 'B', 'C', 'D', 'E', 'F', 'G', 'Ǵ', 'H', 'İ', 'I', 'J', 'K', 'L', 'M',
    'N', 'Ń', 'O', 'Ó', 'P', 'Q', 'R', 'S', 'T', 'U', 'Ú', 'V', 'Y', 'Ý', 'Z', '-',
};

static CYRILLIC_VOWELS: phf::Set<char> = phf_set! {
    'А', 'Ә', 'Ə', 'Е', 'И', 'О', 'Ө', 'Ɵ', 'Ұ', 'Ү', 'У', 'Ы', 'І', 'Э',
};

pub fn single(c: char) -> Option<&'static LetterMapVariant> {
    SINGLE_CHAR_MAP.get(&c)
}

/// Look up a lowercase two-character key.
pub fn digraph(pair: &str) -> Option<&'static LetterMapVariant> {
    DIGRAPH_MAP.get(pair)
}

pub fn irregular(c: char) -> Option<&'static str> {
    IRREGULAR_MAP.get(&c).copied()
}

/// Whether `c` (in either case) continues a Latin word run.
pub fn is_latin_letter(c: char) -> bool {
    LATIN_ALPHABET.contains(&simple_upper(c))
}

/// Literal membership, without case folding.
pub fn is_latin_uppercase(c: char) -> bool {
    LATIN_ALPHABET.contains(&c)
}

/// Classify a produced Cyrillic character.
pub fn classify(c: char) -> Sound {
    if CYRILLIC_VOWELS.contains(&simple_upper(c)) {
        Sound::Vowel
    } else {
        Sound::Consonant
    }
}
