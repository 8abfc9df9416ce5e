//! Compact trie: an immutable prefix tree serialized into one byte buffer.
//!
//! Keys are sequences of UTF-16 code units; values are `u64` (packed
//! paradigm values) or `String` (fixlist replacements). The buffer is
//! validated once at construction, after which lookups walk it in place
//! and cannot fail. Absence is `None`.

mod builder;
mod format;
#[cfg(test)]
mod tests;

pub use builder::CompactTrieBuilder;

use std::cmp::Ordering;
use std::fmt;
use std::fs::File;
use std::io;
use std::marker::PhantomData;
use std::path::Path;

use memmap2::Mmap;

use format::{Layout, NO_VALUE};

#[derive(Debug, thiserror::Error)]
pub enum TrieError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short or length mismatch)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected KZCT)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("value kind mismatch: expected {expected}, found {found}")]
    ValueKindMismatch { expected: u8, found: u8 },

    #[error("body checksum mismatch")]
    ChecksumMismatch,

    #[error("corrupt trie: {0}")]
    Corrupt(String),
}

/// A value type that can be stored in a [`CompactTrie`].
pub trait TrieValue: Sized {
    /// Tag written into the header so a blob is never read as the wrong type.
    const KIND: u8;

    fn encode(&self, out: &mut Vec<u8>);

    /// Returns `None` when `bytes` is not a valid encoding.
    fn decode(bytes: &[u8]) -> Option<Self>;
}

impl TrieValue for u64 {
    const KIND: u8 = 1;

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        bytes.try_into().ok().map(u64::from_le_bytes)
    }
}

impl TrieValue for String {
    const KIND: u8 = 2;

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        std::str::from_utf8(bytes).ok().map(str::to_owned)
    }
}

/// Backing storage: owned, embedded in the binary, or memory-mapped.
enum TrieBytes {
    Owned(Vec<u8>),
    Static(&'static [u8]),
    Mapped(Mmap),
}

impl TrieBytes {
    fn as_slice(&self) -> &[u8] {
        match self {
            TrieBytes::Owned(data) => data,
            TrieBytes::Static(data) => data,
            TrieBytes::Mapped(mmap) => mmap,
        }
    }
}

pub struct CompactTrie<V: TrieValue> {
    bytes: TrieBytes,
    layout: Layout,
    _value: PhantomData<fn() -> V>,
}

impl<V: TrieValue> CompactTrie<V> {
    /// Take ownership of a serialized trie.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, TrieError> {
        Self::new(TrieBytes::Owned(data))
    }

    /// Borrow a serialized trie compiled into the binary.
    pub fn from_static(data: &'static [u8]) -> Result<Self, TrieError> {
        Self::new(TrieBytes::Static(data))
    }

    /// Open a serialized trie file without copying it onto the heap.
    pub fn open(path: &Path) -> Result<Self, TrieError> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mapping is immutable.
        // The Mmap lives as long as the trie that reads from it.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::new(TrieBytes::Mapped(mmap))
    }

    /// Read a serialized trie file into memory.
    pub fn read(path: &Path) -> Result<Self, TrieError> {
        Self::from_bytes(std::fs::read(path)?)
    }

    fn new(bytes: TrieBytes) -> Result<Self, TrieError> {
        let data = bytes.as_slice();
        let layout = format::parse(data, V::KIND)?;
        for index in 0..layout.value_count {
            if V::decode(layout.value_bytes(data, index)).is_none() {
                return Err(TrieError::Corrupt(format!(
                    "value {index} is not a valid encoding"
                )));
            }
        }
        Ok(Self {
            bytes,
            layout,
            _value: PhantomData,
        })
    }

    #[inline]
    fn data(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Follow the edge labelled `unit` out of `node`.
    fn child(&self, node: usize, unit: u16) -> Option<usize> {
        let data = self.data();
        let edges = self.layout.node(data, node).edges();
        let (mut lo, mut hi) = (edges.start, edges.end);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let (label, target) = self.layout.edge(data, mid);
            match label.cmp(&unit) {
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
                Ordering::Equal => return Some(target as usize),
            }
        }
        None
    }

    fn walk(&self, key: &[u16]) -> Option<usize> {
        key.iter()
            .try_fold(0usize, |node, &unit| self.child(node, unit))
    }

    fn has_value(&self, node: usize) -> bool {
        self.layout.node(self.data(), node).value != NO_VALUE
    }

    fn value_at(&self, node: usize) -> Option<V> {
        let data = self.data();
        let index = self.layout.node(data, node).value;
        if index == NO_VALUE {
            return None;
        }
        V::decode(self.layout.value_bytes(data, index as usize))
    }

    /// Value stored under exactly `key`.
    pub fn find_exact(&self, key: &[u16]) -> Option<V> {
        self.walk(key).and_then(|node| self.value_at(node))
    }

    pub fn contains(&self, key: &[u16]) -> bool {
        self.walk(key).is_some_and(|node| self.has_value(node))
    }

    /// Longest stored key that is a prefix of `key`, as `(length, value)`.
    ///
    /// The empty key counts only if it is stored.
    pub fn find_longest_prefix(&self, key: &[u16]) -> Option<(usize, V)> {
        let mut node = 0;
        let mut best = self.has_value(0).then_some((0, 0));
        for (depth, &unit) in key.iter().enumerate() {
            match self.child(node, unit) {
                Some(next) => node = next,
                None => break,
            }
            if self.has_value(node) {
                best = Some((depth + 1, node));
            }
        }
        let (len, node) = best?;
        self.value_at(node).map(|value| (len, value))
    }

    /// [`find_exact`](Self::find_exact) for a UTF-8 key.
    pub fn find_exact_str(&self, key: &str) -> Option<V> {
        let units: Vec<u16> = key.encode_utf16().collect();
        self.find_exact(&units)
    }

    pub fn contains_str(&self, key: &str) -> bool {
        let units: Vec<u16> = key.encode_utf16().collect();
        self.contains(&units)
    }

    /// [`find_longest_prefix`](Self::find_longest_prefix) for a UTF-8 key.
    /// The matched length is in UTF-16 code units.
    pub fn find_longest_prefix_str(&self, key: &str) -> Option<(usize, V)> {
        let units: Vec<u16> = key.encode_utf16().collect();
        self.find_longest_prefix(&units)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.layout.key_count
    }

    pub fn is_empty(&self) -> bool {
        self.layout.key_count == 0
    }

    /// The serialized form, exactly as loaded.
    pub fn as_bytes(&self) -> &[u8] {
        self.data()
    }

    /// All `(key, value)` pairs in key order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            trie: self,
            stack: vec![(0, 0, None)],
            key: Vec::new(),
        }
    }
}

impl<V: TrieValue> fmt::Debug for CompactTrie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompactTrie")
            .field("keys", &self.layout.key_count)
            .field("nodes", &self.layout.node_count)
            .field("bytes", &self.data().len())
            .finish()
    }
}

/// Depth-first iterator over a [`CompactTrie`].
pub struct Iter<'a, V: TrieValue> {
    trie: &'a CompactTrie<V>,
    /// Pending `(node, parent key length, edge label)`.
    stack: Vec<(usize, usize, Option<u16>)>,
    key: Vec<u16>,
}

impl<V: TrieValue> Iterator for Iter<'_, V> {
    type Item = (Vec<u16>, V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, depth, label)) = self.stack.pop() {
            self.key.truncate(depth);
            if let Some(label) = label {
                self.key.push(label);
            }
            let data = self.trie.data();
            let record = self.trie.layout.node(data, node);
            // Reverse so the smallest label is popped first.
            for edge in record.edges().rev() {
                let (label, target) = self.trie.layout.edge(data, edge);
                self.stack.push((target as usize, self.key.len(), Some(label)));
            }
            if let Some(value) = self.trie.value_at(node) {
                return Some((self.key.clone(), value));
            }
        }
        None
    }
}
