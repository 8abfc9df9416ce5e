//! KZCT binary layout: header parsing and structural validation.
//!
//! ```text
//! header (28 bytes, little-endian)
//!   magic "KZCT" | version u8 | value kind u8 | reserved u16
//!   node_count u32 | edge_count u32 | value_count u32 | pool_len u32 | crc32 u32
//! body
//!   nodes   node_count × { first_edge u32, edge_len u32, value u32 }
//!   edges   edge_count × { label u16, reserved u16, target u32 }
//!   offsets (value_count + 1) × u32
//!   pool    pool_len bytes
//! ```
//!
//! Node 0 is the root. Each node's edges are contiguous and sorted by label.

use super::TrieError;

pub(super) const MAGIC: &[u8; 4] = b"KZCT";
pub(super) const VERSION: u8 = 1;
/// magic(4) + version(1) + kind(1) + reserved(2) + 5 × u32 = 28
pub(super) const HEADER_SIZE: usize = 4 + 1 + 1 + 2 + 4 * 5;
pub(super) const NODE_SIZE: usize = 12;
pub(super) const EDGE_SIZE: usize = 8;
pub(super) const OFFSET_SIZE: usize = 4;
/// Value slot of a node that terminates no key.
pub(super) const NO_VALUE: u32 = u32::MAX;

#[inline]
fn read_u16(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

#[inline]
fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Node {
    pub first_edge: u32,
    pub edge_len: u32,
    pub value: u32,
}

impl Node {
    pub fn edges(&self) -> std::ops::Range<usize> {
        let first = self.first_edge as usize;
        first..first + self.edge_len as usize
    }
}

/// Section offsets resolved once by [`parse`]. Every accessor relies on
/// the bounds established there.
#[derive(Debug, Clone, Copy)]
pub(super) struct Layout {
    pub node_count: usize,
    pub value_count: usize,
    pub key_count: usize,
    nodes: usize,
    edges: usize,
    offsets: usize,
    pool: usize,
}

impl Layout {
    pub fn node(&self, data: &[u8], index: usize) -> Node {
        let at = self.nodes + index * NODE_SIZE;
        Node {
            first_edge: read_u32(data, at),
            edge_len: read_u32(data, at + 4),
            value: read_u32(data, at + 8),
        }
    }

    /// Returns `(label, target)` of an edge record.
    pub fn edge(&self, data: &[u8], index: usize) -> (u16, u32) {
        let at = self.edges + index * EDGE_SIZE;
        (read_u16(data, at), read_u32(data, at + 4))
    }

    pub fn value_bytes<'a>(&self, data: &'a [u8], index: usize) -> &'a [u8] {
        let start = read_u32(data, self.offsets + index * OFFSET_SIZE) as usize;
        let end = read_u32(data, self.offsets + (index + 1) * OFFSET_SIZE) as usize;
        &data[self.pool + start..self.pool + end]
    }
}

fn section(count: usize, width: usize) -> Result<usize, TrieError> {
    count.checked_mul(width).ok_or(TrieError::InvalidHeader)
}

/// Parse the header and check every structural invariant of the body.
pub(super) fn parse(data: &[u8], expected_kind: u8) -> Result<Layout, TrieError> {
    if data.len() < 5 {
        return Err(TrieError::InvalidHeader);
    }
    if &data[..4] != MAGIC {
        return Err(TrieError::InvalidMagic);
    }
    if data[4] != VERSION {
        return Err(TrieError::UnsupportedVersion(data[4]));
    }
    if data.len() < HEADER_SIZE {
        return Err(TrieError::InvalidHeader);
    }
    if data[5] != expected_kind {
        return Err(TrieError::ValueKindMismatch {
            expected: expected_kind,
            found: data[5],
        });
    }

    let node_count = read_u32(data, 8) as usize;
    let edge_count = read_u32(data, 12) as usize;
    let value_count = read_u32(data, 16) as usize;
    let pool_len = read_u32(data, 20) as usize;
    let crc = read_u32(data, 24);

    let nodes = HEADER_SIZE;
    let edges = nodes + section(node_count, NODE_SIZE)?;
    let offsets = edges + section(edge_count, EDGE_SIZE)?;
    let pool = offsets + section(value_count + 1, OFFSET_SIZE)?;
    let expected = pool
        .checked_add(pool_len)
        .ok_or(TrieError::InvalidHeader)?;
    if data.len() != expected {
        return Err(TrieError::InvalidHeader);
    }
    if crc32fast::hash(&data[HEADER_SIZE..]) != crc {
        return Err(TrieError::ChecksumMismatch);
    }
    if node_count == 0 {
        return Err(TrieError::Corrupt("missing root node".into()));
    }

    let mut layout = Layout {
        node_count,
        value_count,
        key_count: 0,
        nodes,
        edges,
        offsets,
        pool,
    };

    for index in 0..node_count {
        let node = layout.node(data, index);
        let end = u64::from(node.first_edge) + u64::from(node.edge_len);
        if end > edge_count as u64 {
            return Err(TrieError::Corrupt(format!(
                "node {index}: edge range {}..{end} exceeds {edge_count} edges",
                node.first_edge
            )));
        }
        let mut prev_label: Option<u16> = None;
        for edge in node.edges() {
            let (label, target) = layout.edge(data, edge);
            if prev_label.is_some_and(|prev| prev >= label) {
                return Err(TrieError::Corrupt(format!(
                    "node {index}: edge labels not strictly ascending"
                )));
            }
            prev_label = Some(label);
            let target = target as usize;
            // Children always follow their parent, so walks cannot cycle.
            if target <= index || target >= node_count {
                return Err(TrieError::Corrupt(format!(
                    "node {index}: edge target {target} out of range"
                )));
            }
        }
        if node.value != NO_VALUE {
            if node.value as usize >= value_count {
                return Err(TrieError::Corrupt(format!(
                    "node {index}: value index {} out of range",
                    node.value
                )));
            }
            layout.key_count += 1;
        }
    }

    let mut prev_offset = 0usize;
    for index in 0..=value_count {
        let offset = read_u32(data, offsets + index * OFFSET_SIZE) as usize;
        if offset < prev_offset || offset > pool_len {
            return Err(TrieError::Corrupt(format!(
                "value offset {index} out of order"
            )));
        }
        prev_offset = offset;
    }
    if prev_offset != pool_len {
        return Err(TrieError::Corrupt(
            "value offsets do not cover the pool".into(),
        ));
    }

    Ok(layout)
}

/// Recompute the body checksum after patching bytes in place.
#[cfg(test)]
pub(super) fn reseal(data: &mut [u8]) {
    let crc = crc32fast::hash(&data[HEADER_SIZE..]);
    data[24..28].copy_from_slice(&crc.to_le_bytes());
}
