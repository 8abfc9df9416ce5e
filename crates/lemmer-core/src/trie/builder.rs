use std::collections::BTreeMap;

use super::format::{EDGE_SIZE, HEADER_SIZE, MAGIC, NODE_SIZE, NO_VALUE, OFFSET_SIZE, VERSION};
use super::{CompactTrie, TrieError, TrieValue};

#[derive(Default)]
struct BuildNode {
    children: BTreeMap<u16, usize>,
    value: Option<u32>,
}

/// Collects `(key, value)` pairs and serializes them into the KZCT format.
///
/// Inserting an existing key replaces its value.
pub struct CompactTrieBuilder<V: TrieValue> {
    entries: BTreeMap<Vec<u16>, V>,
}

impl<V: TrieValue> Default for CompactTrieBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: TrieValue> CompactTrieBuilder<V> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: &[u16], value: V) -> Option<V> {
        self.entries.insert(key.to_vec(), value)
    }

    pub fn insert_str(&mut self, key: &str, value: V) -> Option<V> {
        self.entries.insert(key.encode_utf16().collect(), value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TrieError> {
        let mut nodes = vec![BuildNode::default()];
        let mut values: Vec<&V> = Vec::with_capacity(self.entries.len());

        for (key, value) in &self.entries {
            let mut current = 0;
            for &unit in key {
                let existing = nodes[current].children.get(&unit).copied();
                current = match existing {
                    Some(next) => next,
                    None => {
                        let next = nodes.len();
                        nodes.push(BuildNode::default());
                        nodes[current].children.insert(unit, next);
                        next
                    }
                };
            }
            nodes[current].value = Some(to_u32(values.len(), "value count")?);
            values.push(value);
        }

        let mut node_bytes = Vec::with_capacity(nodes.len() * NODE_SIZE);
        let mut edge_bytes = Vec::new();
        let mut edge_count = 0u32;
        for node in &nodes {
            node_bytes.extend_from_slice(&edge_count.to_le_bytes());
            node_bytes.extend_from_slice(&to_u32(node.children.len(), "edge count")?.to_le_bytes());
            node_bytes.extend_from_slice(&node.value.unwrap_or(NO_VALUE).to_le_bytes());
            for (&label, &target) in &node.children {
                edge_bytes.extend_from_slice(&label.to_le_bytes());
                edge_bytes.extend_from_slice(&[0u8; 2]);
                edge_bytes.extend_from_slice(&to_u32(target, "node count")?.to_le_bytes());
                edge_count += 1;
            }
        }
        debug_assert_eq!(edge_bytes.len(), edge_count as usize * EDGE_SIZE);

        let mut pool = Vec::new();
        let mut offset_bytes = Vec::with_capacity((values.len() + 1) * OFFSET_SIZE);
        offset_bytes.extend_from_slice(&0u32.to_le_bytes());
        for value in &values {
            value.encode(&mut pool);
            offset_bytes.extend_from_slice(&to_u32(pool.len(), "value pool")?.to_le_bytes());
        }

        let mut body =
            Vec::with_capacity(node_bytes.len() + edge_bytes.len() + offset_bytes.len() + pool.len());
        body.extend_from_slice(&node_bytes);
        body.extend_from_slice(&edge_bytes);
        body.extend_from_slice(&offset_bytes);
        body.extend_from_slice(&pool);

        let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.push(V::KIND);
        buf.extend_from_slice(&[0u8; 2]); // reserved
        buf.extend_from_slice(&to_u32(nodes.len(), "node count")?.to_le_bytes());
        buf.extend_from_slice(&edge_count.to_le_bytes());
        buf.extend_from_slice(&to_u32(values.len(), "value count")?.to_le_bytes());
        buf.extend_from_slice(&to_u32(pool.len(), "value pool")?.to_le_bytes());
        buf.extend_from_slice(&crc32fast::hash(&body).to_le_bytes());
        buf.extend_from_slice(&body);

        Ok(buf)
    }

    /// Serialize and load the result as an owned trie.
    pub fn build(&self) -> Result<CompactTrie<V>, TrieError> {
        CompactTrie::from_bytes(self.to_bytes()?)
    }
}

impl<K: AsRef<str>, V: TrieValue> FromIterator<(K, V)> for CompactTrieBuilder<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut builder = Self::new();
        for (key, value) in iter {
            builder.insert_str(key.as_ref(), value);
        }
        builder
    }
}

fn to_u32(n: usize, what: &str) -> Result<u32, TrieError> {
    u32::try_from(n).map_err(|_| TrieError::Corrupt(format!("{what} exceeds u32::MAX")))
}
