use std::fs;
use std::path::Path;
use std::process;
use std::sync::Arc;

use serde::Serialize;

use kaz_lemmer::paradigm::{ParadigmDictionary, ParadigmKey, ParadigmWord};
use kaz_lemmer::settings::settings;
use kaz_lemmer::translit::KazDetransliterator;
use kaz_lemmer::trie::{CompactTrie, TrieError};
use kaz_lemmer::{Engine, Morphology, Recognition};

use crate::tsv;

#[derive(Serialize)]
struct FormsReport<'a> {
    word: &'a str,
    known: bool,
    fingerprint: &'a str,
    forms: &'a [ParadigmWord],
}

fn open_engine(dict_dir: &str) -> Engine {
    let dict = die!(
        ParadigmDictionary::open(Path::new(dict_dir)),
        "Error opening dictionary {dict_dir}: {}"
    );
    Engine::new(
        KazDetransliterator::shared(),
        Morphology::Automorphology(Arc::new(dict)),
        settings().detranslit.convert_all_chars,
    )
}

/// List all forms of `word`. With `latin`, the word is detransliterated
/// strictly first.
pub fn forms(dict_dir: &str, word: &str, latin: bool, json: bool) {
    let engine = open_engine(dict_dir);

    let (word, recognition, paradigm) = if latin {
        let found = die!(engine.forms_for_latin(word), "Error: {}");
        let Some(found) = found else {
            eprintln!("Error: {word} has letters with no Cyrillic mapping");
            process::exit(1);
        };
        (found.cyrillic, found.recognition, found.paradigm)
    } else {
        let paradigm = die!(engine.forms(word), "Error: {}");
        (word.to_string(), engine.recognize(word), paradigm)
    };

    if json {
        let report = FormsReport {
            word: &word,
            known: recognition == Recognition::Known,
            fingerprint: engine.fingerprint().unwrap_or_default(),
            forms: &paradigm,
        };
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&report), "Error encoding JSON: {}")
        );
        return;
    }

    println!("{word} ({recognition:?})");
    for form in &paradigm {
        match form.split() {
            Some((prefix, stem, suffix)) => println!("  {prefix}[{stem}]{suffix}"),
            None => println!("  {}", form.text),
        }
    }
}

pub fn lookup(trie_file: &str, word: &str) {
    let trie = die!(
        CompactTrie::<u64>::open(Path::new(trie_file)),
        "Error opening trie: {}"
    );
    match trie.find_exact_str(word).map(ParadigmKey::unpack) {
        Some(key) => println!(
            "{word}: prefix_len={} stem_len={} paradigm={}",
            key.prefix_len, key.stem_len, key.paradigm
        ),
        None => println!("{word}: not found"),
    }
    if let Some((len, value)) = trie.find_longest_prefix_str(word) {
        let key = ParadigmKey::unpack(value);
        println!(
            "longest prefix: {len} units, paradigm={} stem_len={}",
            key.paradigm, key.stem_len
        );
    }
}

pub fn fingerprint(dict_dir: &str) {
    let dict = die!(
        ParadigmDictionary::open(Path::new(dict_dir)),
        "Error opening dictionary {dict_dir}: {}"
    );
    println!("{}", dict.fingerprint());
}

/// Print the header facts of a trie file of either value kind.
pub fn info(trie_file: &str) {
    let path = Path::new(trie_file);
    let (kind, keys, bytes) = match CompactTrie::<u64>::open(path) {
        Ok(trie) => ("u64", trie.len(), trie.as_bytes().len()),
        Err(TrieError::ValueKindMismatch { .. }) => {
            let trie = die!(CompactTrie::<String>::open(path), "Error opening trie: {}");
            ("string", trie.len(), trie.as_bytes().len())
        }
        Err(e) => {
            eprintln!("Error opening trie: {e}");
            process::exit(1);
        }
    };
    println!("File:   {trie_file}");
    println!("Values: {kind}");
    println!("Keys:   {keys}");
    println!("Size:   {bytes} bytes");
}

pub fn compile_trie(input_tsv: &str, output_file: &str) {
    let text = die!(
        fs::read_to_string(input_tsv),
        "Error reading {input_tsv}: {}"
    );
    let entries = die!(tsv::parse_paradigm_tsv(&text), "Error: {}");
    let builder = tsv::build_paradigm_trie(&entries);
    let bytes = die!(builder.to_bytes(), "Error building trie: {}");
    die!(
        fs::write(output_file, &bytes),
        "Error writing {output_file}: {}"
    );
    eprintln!(
        "Wrote {output_file} ({} keys, {} bytes)",
        builder.len(),
        bytes.len()
    );
}
