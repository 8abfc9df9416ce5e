use std::io::{self, BufRead, Read};
use std::ops::Range;

use crate::unicode::{utf16_len, utf16_to_byte_offset};

use super::{DictError, Paradigm, ParadigmKey, ParadigmWord};

/// Separates a suffix from its prefix on one line of the suffix stream.
pub const PREFIX_SUFFIX_DELIMITER: char = '$';

/// Form tables shared by every word of a dictionary.
///
/// `boundaries` is read twice per expansion: `boundaries[p]..boundaries[p + 1]`
/// is the slot range of paradigm `p`, and `boundaries[slot]` is the index of
/// the form (suffix and prefix) in that slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixTable {
    suffixes: Vec<String>,
    prefixes: Vec<String>,
    boundaries: Vec<u32>,
}

impl SuffixTable {
    pub fn from_parts(
        suffixes: Vec<String>,
        prefixes: Vec<String>,
        boundaries: Vec<u32>,
    ) -> Result<Self, DictError> {
        if suffixes.len() != prefixes.len() {
            return Err(DictError::Format(format!(
                "{} suffixes but {} prefixes",
                suffixes.len(),
                prefixes.len()
            )));
        }
        Ok(Self {
            suffixes,
            prefixes,
            boundaries,
        })
    }

    /// Read the line-oriented suffix stream and the little-endian `u32`
    /// paradigm stream.
    pub fn read<S: BufRead, P: Read>(suffixes: S, paradigms: P) -> Result<Self, DictError> {
        let (suffixes, prefixes) = read_suffixes(suffixes)?;
        let boundaries = read_boundaries(paradigms)?;
        Self::from_parts(suffixes, prefixes, boundaries)
    }

    /// Number of forms.
    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn boundaries(&self) -> &[u32] {
        &self.boundaries
    }

    /// `(prefix, suffix)` of form `index`.
    pub fn form(&self, index: usize) -> Option<(&str, &str)> {
        Some((self.prefixes.get(index)?, self.suffixes.get(index)?))
    }

    fn slots(&self, paradigm: u32) -> Result<Range<usize>, String> {
        let p = paradigm as usize;
        match (self.boundaries.get(p), p.checked_add(1).and_then(|n| self.boundaries.get(n))) {
            (Some(&start), Some(&end)) if start <= end => Ok(start as usize..end as usize),
            (Some(&start), Some(&end)) => Err(format!(
                "paradigm {paradigm} has a decreasing slot range {start}..{end}"
            )),
            _ => Err(format!(
                "paradigm {paradigm} out of range ({} boundaries)",
                self.boundaries.len()
            )),
        }
    }

    fn slot_form(&self, slot: usize) -> Result<(&str, &str), String> {
        let index = *self
            .boundaries
            .get(slot)
            .ok_or_else(|| format!("slot {slot} out of range ({} boundaries)", self.boundaries.len()))?;
        self.form(index as usize)
            .ok_or_else(|| format!("form {index} out of range ({} forms)", self.len()))
    }

    /// Expand `word` with its decoded trie value into a full paradigm.
    ///
    /// The headword comes first, followed by one form per slot of the
    /// paradigm. Any index outside the tables, or a stem span outside the
    /// word, is reported as [`DictError::CorruptDictionary`].
    pub fn expand(&self, word: &str, key: ParadigmKey) -> Result<Paradigm, DictError> {
        let corrupt = |reason: String| DictError::CorruptDictionary {
            word: word.to_string(),
            reason,
        };

        let prefix_len = key.prefix_len as usize;
        let stem_len = key.stem_len as usize;
        let word_len = utf16_len(word);
        let span = utf16_to_byte_offset(word, prefix_len)
            .zip(utf16_to_byte_offset(word, prefix_len + stem_len));
        let Some((stem_start, stem_end)) = span else {
            return Err(corrupt(format!(
                "stem {prefix_len}+{stem_len} does not fit a word of {word_len} units"
            )));
        };
        let stem = &word[stem_start..stem_end];

        let slots = self.slots(key.paradigm).map_err(corrupt)?;
        let mut paradigm = Vec::with_capacity(slots.len() + 1);
        paradigm.push(ParadigmWord::new(
            word.to_string(),
            prefix_len,
            word_len - stem_len - prefix_len,
        ));
        for slot in slots {
            let (prefix, suffix) = self.slot_form(slot).map_err(corrupt)?;
            paradigm.push(ParadigmWord::new(
                format!("{prefix}{stem}{suffix}"),
                utf16_len(prefix),
                utf16_len(suffix),
            ));
        }
        Ok(paradigm)
    }
}

fn read_suffixes<R: BufRead>(reader: R) -> Result<(Vec<String>, Vec<String>), DictError> {
    let mut suffixes = Vec::new();
    let mut prefixes = Vec::new();
    // `lines()` strips both `\n` and `\r\n`.
    for line in reader.lines() {
        let line = line.map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => DictError::Format(format!(
                "suffix line {} is not valid UTF-8",
                suffixes.len() + 1
            )),
            _ => DictError::Io(e),
        })?;
        match line.split_once(PREFIX_SUFFIX_DELIMITER) {
            Some((suffix, prefix)) => {
                suffixes.push(suffix.to_string());
                prefixes.push(prefix.to_string());
            }
            None => {
                suffixes.push(line);
                prefixes.push(String::new());
            }
        }
    }
    Ok((suffixes, prefixes))
}

fn read_boundaries<R: Read>(mut reader: R) -> Result<Vec<u32>, DictError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    if data.len() % 4 != 0 {
        return Err(DictError::Format(format!(
            "paradigm stream length {} is not a multiple of 4",
            data.len()
        )));
    }
    Ok(data
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
