use std::io::{self, BufRead};
use std::process;

use kaz_lemmer::settings::settings;
use kaz_lemmer::translit::KazDetransliterator;

/// Detransliterate `text`, or every line of stdin when `text` is absent.
pub fn detranslit(text: Option<&str>, strict: bool) {
    let convert_all_chars = !strict && settings().detranslit.convert_all_chars;
    let detranslit = KazDetransliterator::global();
    let mut rejected = 0usize;

    let mut convert_line = |line: &str| match detranslit.convert(line, convert_all_chars) {
        Some(cyrillic) => println!("{cyrillic}"),
        None => {
            rejected += 1;
            eprintln!("Rejected (unmapped letters): {line}");
        }
    };

    match text {
        Some(text) => convert_line(text),
        None => {
            for line in io::stdin().lock().lines() {
                let line = die!(line, "Error reading stdin: {}");
                convert_line(&line);
            }
        }
    }

    if rejected > 0 {
        process::exit(1);
    }
}
