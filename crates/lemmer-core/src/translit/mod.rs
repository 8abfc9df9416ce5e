//! Kazakh official Latin → Cyrillic detransliteration.
//!
//! Input is NFC-normalized, split into Latin word runs, and each run is
//! rewritten by a fixlist override followed by digraph and single-letter
//! tables with vowel/consonant conditioning.

mod detranslit;
pub mod fixlist;
pub mod tables;
#[cfg(test)]
mod tests;

pub use detranslit::{convert_case, convert_latin_to_cyrillic, KazDetransliterator};
pub use fixlist::FixlistConfigError;
