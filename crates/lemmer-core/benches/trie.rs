use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lemmer_core::trie::{CompactTrie, CompactTrieBuilder};

const STEMS: &[&str] = &[
    "қала", "дала", "бала", "ана", "ата", "тау", "су", "жер", "күн", "ай", "жыл", "адам",
];
const SUFFIXES: &[&str] = &["", "лар", "лардың", "ға", "да", "дан", "мен", "ның", "ы"];

fn bench_trie() -> CompactTrie<u64> {
    let mut builder = CompactTrieBuilder::<u64>::new();
    for (i, stem) in STEMS.iter().enumerate() {
        for (j, suffix) in SUFFIXES.iter().enumerate() {
            builder.insert_str(&format!("{stem}{suffix}"), (i * SUFFIXES.len() + j) as u64);
        }
    }
    builder.build().expect("bench trie builds")
}

static QUERIES: &[(&str, &str)] = &[
    ("short", "су"),
    ("hit", "қалалардың"),
    ("miss", "қаламгерлердің"),
];

fn bench_exact(c: &mut Criterion) {
    let trie = bench_trie();
    let mut group = c.benchmark_group("trie/exact");
    for &(label, query) in QUERIES {
        let units: Vec<u16> = query.encode_utf16().collect();
        group.bench_with_input(BenchmarkId::new(label, units.len()), &units, |b, units| {
            b.iter(|| trie.find_exact(units));
        });
    }
    group.finish();
}

fn bench_longest_prefix(c: &mut Criterion) {
    let trie = bench_trie();
    let mut group = c.benchmark_group("trie/longest_prefix");
    for &(label, query) in QUERIES {
        let units: Vec<u16> = query.encode_utf16().collect();
        group.bench_with_input(BenchmarkId::new(label, units.len()), &units, |b, units| {
            b.iter(|| trie.find_longest_prefix(units));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_exact, bench_longest_prefix);
criterion_main!(benches);
