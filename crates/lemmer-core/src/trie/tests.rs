use std::io::Write;

use super::format::{reseal, HEADER_SIZE, NODE_SIZE};
use super::{CompactTrie, CompactTrieBuilder, TrieError};

fn units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

fn abc_trie() -> CompactTrie<u64> {
    [("a", 1u64), ("ab", 2), ("abc", 3), ("b", 4)]
        .into_iter()
        .collect::<CompactTrieBuilder<u64>>()
        .build()
        .unwrap()
}

#[test]
fn exact_match() {
    let trie = abc_trie();
    assert_eq!(trie.find_exact(&units("a")), Some(1));
    assert_eq!(trie.find_exact(&units("ab")), Some(2));
    assert_eq!(trie.find_exact(&units("abc")), Some(3));
    assert_eq!(trie.find_exact(&units("b")), Some(4));
    assert_eq!(trie.find_exact(&units("abcd")), None);
    assert_eq!(trie.find_exact(&units("")), None);
    assert!(trie.contains(&units("ab")));
    assert!(!trie.contains(&units("ba")));
}

#[test]
fn longest_prefix_prefers_longest() {
    let trie = abc_trie();
    assert_eq!(trie.find_longest_prefix(&units("abcd")), Some((3, 3)));
    assert_eq!(trie.find_longest_prefix(&units("abx")), Some((2, 2)));
    assert_eq!(trie.find_longest_prefix(&units("a")), Some((1, 1)));
    assert_eq!(trie.find_longest_prefix(&units("x")), None);
    assert_eq!(trie.find_longest_prefix(&units("")), None);
}

#[test]
fn longest_prefix_skips_valueless_interior_nodes() {
    let trie = [("abcd", 7u64)]
        .into_iter()
        .collect::<CompactTrieBuilder<u64>>()
        .build()
        .unwrap();
    assert_eq!(trie.find_longest_prefix(&units("abc")), None);
    assert_eq!(trie.find_longest_prefix(&units("abcde")), Some((4, 7)));
}

#[test]
fn empty_key_is_a_stored_prefix() {
    let trie = [("", 9u64), ("q", 1)]
        .into_iter()
        .collect::<CompactTrieBuilder<u64>>()
        .build()
        .unwrap();
    assert_eq!(trie.find_longest_prefix(&units("zz")), Some((0, 9)));
    assert_eq!(trie.find_longest_prefix(&units("qq")), Some((1, 1)));
}

#[test]
fn string_values_and_non_ascii_keys() {
    let mut builder = CompactTrieBuilder::<String>::new();
    builder.insert_str("sentr", "центр".to_string());
    builder.insert_str("ıýn", "июнь".to_string());
    let trie = builder.build().unwrap();

    assert_eq!(trie.find_exact_str("ıýn").as_deref(), Some("июнь"));
    assert_eq!(
        trie.find_longest_prefix_str("sentrge"),
        Some((5, "центр".to_string()))
    );
    assert!(trie.contains_str("sentr"));
    assert_eq!(trie.len(), 2);
}

#[test]
fn reinserting_a_key_replaces_its_value() {
    let mut builder = CompactTrieBuilder::<u64>::new();
    assert_eq!(builder.insert_str("k", 1), None);
    assert_eq!(builder.insert_str("k", 2), Some(1));
    let trie = builder.build().unwrap();
    assert_eq!(trie.find_exact_str("k"), Some(2));
    assert_eq!(trie.len(), 1);
}

#[test]
fn empty_trie() {
    let trie = CompactTrieBuilder::<u64>::new().build().unwrap();
    assert!(trie.is_empty());
    assert_eq!(trie.find_exact(&units("a")), None);
    assert_eq!(trie.find_longest_prefix(&units("a")), None);
    assert_eq!(trie.iter().count(), 0);
}

#[test]
fn iter_yields_keys_in_order() {
    let trie = abc_trie();
    let keys: Vec<(String, u64)> = trie
        .iter()
        .map(|(k, v)| (String::from_utf16(&k).unwrap(), v))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("a".to_string(), 1),
            ("ab".to_string(), 2),
            ("abc".to_string(), 3),
            ("b".to_string(), 4),
        ]
    );
}

#[test]
fn serialized_bytes_roundtrip_through_from_bytes() {
    let bytes = abc_trie().as_bytes().to_vec();
    let reloaded = CompactTrie::<u64>::from_bytes(bytes).unwrap();
    assert_eq!(reloaded.find_exact(&units("abc")), Some(3));
}

#[test]
fn open_memory_mapped_file() {
    let bytes = abc_trie().as_bytes().to_vec();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();

    let mapped = CompactTrie::<u64>::open(file.path()).unwrap();
    assert_eq!(mapped.find_longest_prefix(&units("abz")), Some((2, 2)));
    let read = CompactTrie::<u64>::read(file.path()).unwrap();
    assert_eq!(read.as_bytes(), mapped.as_bytes());
}

#[test]
fn reject_truncated() {
    let bytes = abc_trie().as_bytes().to_vec();
    let err = CompactTrie::<u64>::from_bytes(bytes[..3].to_vec()).unwrap_err();
    assert!(matches!(err, TrieError::InvalidHeader));

    let err = CompactTrie::<u64>::from_bytes(bytes[..bytes.len() - 1].to_vec()).unwrap_err();
    assert!(matches!(err, TrieError::InvalidHeader));
}

#[test]
fn reject_bad_magic_and_version() {
    let mut bytes = abc_trie().as_bytes().to_vec();
    bytes[0] = b'X';
    assert!(matches!(
        CompactTrie::<u64>::from_bytes(bytes).unwrap_err(),
        TrieError::InvalidMagic
    ));

    let mut bytes = abc_trie().as_bytes().to_vec();
    bytes[4] = 99;
    assert!(matches!(
        CompactTrie::<u64>::from_bytes(bytes).unwrap_err(),
        TrieError::UnsupportedVersion(99)
    ));
}

#[test]
fn reject_wrong_value_kind() {
    let bytes = abc_trie().as_bytes().to_vec();
    let err = CompactTrie::<String>::from_bytes(bytes).unwrap_err();
    assert!(matches!(
        err,
        TrieError::ValueKindMismatch {
            expected: 2,
            found: 1
        }
    ));
}

#[test]
fn reject_checksum_mismatch() {
    let mut bytes = abc_trie().as_bytes().to_vec();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    assert!(matches!(
        CompactTrie::<u64>::from_bytes(bytes).unwrap_err(),
        TrieError::ChecksumMismatch
    ));
}

#[test]
fn reject_backward_edge() {
    let mut bytes = abc_trie().as_bytes().to_vec();
    let node_count = u32::from_le_bytes(bytes[8..12].try_into().unwrap()) as usize;
    // First edge record: point its target back at the root.
    let edge_target = HEADER_SIZE + node_count * NODE_SIZE + 4;
    bytes[edge_target..edge_target + 4].copy_from_slice(&0u32.to_le_bytes());
    reseal(&mut bytes);
    assert!(matches!(
        CompactTrie::<u64>::from_bytes(bytes).unwrap_err(),
        TrieError::Corrupt(_)
    ));
}

#[test]
fn reject_out_of_range_value_index() {
    let mut bytes = abc_trie().as_bytes().to_vec();
    // Root node value slot.
    let root_value = HEADER_SIZE + 8;
    bytes[root_value..root_value + 4].copy_from_slice(&1000u32.to_le_bytes());
    reseal(&mut bytes);
    assert!(matches!(
        CompactTrie::<u64>::from_bytes(bytes).unwrap_err(),
        TrieError::Corrupt(_)
    ));
}

#[test]
fn reject_undecodable_string_value() {
    let mut builder = CompactTrieBuilder::<String>::new();
    builder.insert_str("a", "ok".to_string());
    let mut bytes = builder.to_bytes().unwrap();
    let last = bytes.len() - 1;
    bytes[last] = 0xFF; // invalid UTF-8
    reseal(&mut bytes);
    assert!(matches!(
        CompactTrie::<String>::from_bytes(bytes).unwrap_err(),
        TrieError::Corrupt(_)
    ));
}

#[test]
fn from_static_borrows_embedded_bytes() {
    let bytes: &'static [u8] = Box::leak(abc_trie().as_bytes().to_vec().into_boxed_slice());
    let trie = CompactTrie::<u64>::from_static(bytes).unwrap();
    assert_eq!(trie.find_exact(&units("b")), Some(4));
}
