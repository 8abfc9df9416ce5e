//! Packed paradigm values.
//!
//! Layout, most significant first: prefix length (16 bits) | stem length
//! (16 bits) | paradigm index (32 bits). Lengths count UTF-16 code units.

pub const PREFIX_BITS: u32 = 16;
pub const STEM_BITS: u32 = 16;
pub const PARADIGM_BITS: u32 = 32;

const STEM_SHIFT: u32 = PARADIGM_BITS;
const PREFIX_SHIFT: u32 = PARADIGM_BITS + STEM_BITS;

/// Decoded form of a packed trie value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParadigmKey {
    pub prefix_len: u16,
    pub stem_len: u16,
    pub paradigm: u32,
}

impl ParadigmKey {
    pub const fn new(prefix_len: u16, stem_len: u16, paradigm: u32) -> Self {
        Self {
            prefix_len,
            stem_len,
            paradigm,
        }
    }

    /// Every `u64` decodes; whether the result fits a dictionary is checked
    /// on expansion.
    pub const fn unpack(value: u64) -> Self {
        Self {
            prefix_len: (value >> PREFIX_SHIFT) as u16,
            stem_len: (value >> STEM_SHIFT) as u16,
            paradigm: value as u32,
        }
    }

    pub const fn pack(self) -> u64 {
        ((self.prefix_len as u64) << PREFIX_SHIFT)
            | ((self.stem_len as u64) << STEM_SHIFT)
            | self.paradigm as u64
    }
}

impl From<u64> for ParadigmKey {
    fn from(value: u64) -> Self {
        Self::unpack(value)
    }
}

impl From<ParadigmKey> for u64 {
    fn from(key: ParadigmKey) -> Self {
        key.pack()
    }
}
