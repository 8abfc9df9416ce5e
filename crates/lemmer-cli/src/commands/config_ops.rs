use std::fs;

use kaz_lemmer::settings;
use kaz_lemmer::translit::fixlist;

pub fn fixlist_export() {
    print!("{}", fixlist::default_toml());
}

pub fn fixlist_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let entries = die!(fixlist::parse_fixlist_toml(&content), "Error: {}");
    die!(fixlist::compile_fixlist(&entries), "Error: {}");
    println!("OK: {} entries", entries.len());
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: detranslit.convert_all_chars={}, dictionary.eager_validation={}, dictionary.mmap={}",
        s.detranslit.convert_all_chars, s.dictionary.eager_validation, s.dictionary.mmap
    );
}
