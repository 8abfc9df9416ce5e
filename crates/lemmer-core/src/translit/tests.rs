use proptest::prelude::*;

use super::{convert_case, KazDetransliterator};

fn relaxed(text: &str) -> String {
    KazDetransliterator::global()
        .convert(text, true)
        .expect("relaxed mode never rejects")
}

fn strict(text: &str) -> Option<String> {
    KazDetransliterator::global().convert(text, false)
}

#[test]
fn single_letters() {
    assert_eq!(relaxed("Qazaqstan"), "Қазақстан");
    assert_eq!(relaxed("shyǵys"), "шығыс");
    assert_eq!(relaxed("Aıgúl"), "Айгүл");
    assert_eq!(relaxed("ańyz"), "аңыз");
}

#[test]
fn digraph_case_patterns() {
    assert_eq!(relaxed("sh"), "ш");
    assert_eq!(relaxed("SH"), "Ш");
    assert_eq!(relaxed("Sh"), "Ш");
    assert_eq!(relaxed("sH"), "ш");
    assert_eq!(relaxed("Shyǵys"), "Шығыс");
    assert_eq!(relaxed("SHYǴYS"), "ШЫҒЫС");
}

#[test]
fn ia_after_consonant_takes_special_form() {
    assert_eq!(relaxed("Kompanıa"), "Компания");
    assert_eq!(relaxed("Azııa"), "Азия");
}

#[test]
fn ia_at_word_start_or_after_vowel_takes_default() {
    assert_eq!(relaxed("ıaǵnı"), "яғни");
    assert_eq!(relaxed("taıaq"), "таяқ");
    assert_eq!(relaxed("kúıý"), "күю");
    assert_eq!(relaxed("IAǴNI"), "ЯҒНИ");
}

#[test]
fn i_after_vowel_becomes_short_i() {
    assert_eq!(relaxed("aı"), "ай");
    assert_eq!(relaxed("tı"), "ти");
    assert_eq!(relaxed("ı"), "и");
}

#[test]
fn digraph_keeps_sound_from_before_it() {
    // `sh` writes one letter for two positions; `ı` still sees the `а`.
    assert_eq!(relaxed("ashı"), "ашй");
    assert_eq!(relaxed("ashıa"), "ашя");
    assert_eq!(relaxed("Kompanıa"), "Компания");
    // Without a vowel before the digraph the sound stays unknown.
    assert_eq!(relaxed("shı"), "ши");
    assert_eq!(relaxed("shıa"), "шя");
}

#[test]
fn sound_after_digraph_output_moves_on() {
    // The letter after the one following a digraph sees that letter.
    assert_eq!(relaxed("shaı"), "шай");
    assert_eq!(relaxed("shtıa"), "штия");
}

#[test]
fn fixlist_prefix_starts_with_unknown_sound() {
    assert_eq!(relaxed("sentrıa"), "центря");
    assert_eq!(relaxed("SENTRIA"), "ЦЕНТРЯ");
    // The first letter after the prefix does set the sound again.
    assert_eq!(relaxed("sentraı"), "центрай");
}

#[test]
fn conditioning_resets_at_word_boundary() {
    // The space closes the run, so `ı` starts a fresh word.
    assert_eq!(relaxed("a ı"), "а и");
}

#[test]
fn fixlist_overrides_whole_word() {
    assert_eq!(relaxed("bıýro"), "бюро");
    assert_eq!(relaxed("kompúter"), "компьютер");
    assert_eq!(relaxed("ıýn"), "июнь");
    assert_eq!(relaxed("Ekonomıka"), "Экономика");
}

#[test]
fn fixlist_prefix_keeps_suffix_conversion() {
    assert_eq!(relaxed("Sentrge"), "Центрге");
    assert_eq!(relaxed("sentıabrde"), "сентябрьде");
}

#[test]
fn fixlist_short_partial_match_is_ignored() {
    // "ıýn" matches only as a three-letter prefix of a longer word.
    assert_eq!(relaxed("ıýnde"), "юнде");
}

#[test]
fn fixlist_uppercase_word() {
    assert_eq!(relaxed("SENTR"), "ЦЕНТР");
    assert_eq!(relaxed("BIÝRO"), "БЮРО");
}

#[test]
fn non_latin_text_passes_through() {
    assert_eq!(relaxed("Sálem, álem! 2024"), "Сәлем, әлем! 2024");
    assert_eq!(relaxed("Qazaq тілі"), "Қазақ тілі");
    assert_eq!(relaxed(""), "");
}

#[test]
fn irregular_letters_outside_alphabet() {
    assert_eq!(relaxed("Taxı"), "Такси");
    assert_eq!(relaxed("Wı-Fı"), "Ви-Фи");
}

#[test]
fn irregular_letters_inside_word() {
    assert_eq!(relaxed("Coca"), "Кока");
}

#[test]
fn strict_mode_accepts_fully_mapped_text() {
    assert_eq!(strict("Qazaqstan, 2024!").as_deref(), Some("Қазақстан, 2024!"));
    assert_eq!(strict("").as_deref(), Some(""));
}

#[test]
fn strict_mode_rejects_unmapped_letters() {
    assert_eq!(strict("Coca"), None);
    assert_eq!(strict("Taxı"), None);
    assert_eq!(strict("Qazaq тілі"), None);
}

#[test]
fn unmapped_latin_run_letter() {
    // U+017F uppercases to S, so it joins the run but has no mapping.
    assert_eq!(strict("aſa"), None);
    assert_eq!(relaxed("aſa"), "аſа");
}

#[test]
fn input_is_nfc_normalized() {
    assert_eq!(relaxed("A\u{0301}l"), "Әл");
    assert_eq!(relaxed("\u{041E}\u{0301}z"), "Өз");
}

#[test]
fn hyphen_joins_compound() {
    assert_eq!(relaxed("qyz-kelin"), "қыз-келін");
}

#[test]
fn custom_fixlist_instance() {
    let detranslit = KazDetransliterator::from_fixlist_toml(
        r#"
[fixlist]
"qala" = "город"
"#,
    )
    .unwrap();
    assert_eq!(detranslit.convert("Qalada", true).as_deref(), Some("Городда"));
    assert_eq!(detranslit.convert("sentr", true).as_deref(), Some("сентр"));
}

#[test]
fn convert_case_rules() {
    assert_eq!(convert_case("", "ш"), "");
    assert_eq!(convert_case("SH", "ш"), "Ш");
    assert_eq!(convert_case("Sh", "ш"), "Ш");
    assert_eq!(convert_case("sh", "ш"), "ш");
    assert_eq!(convert_case("sH", "ш"), "ш");
    assert_eq!(convert_case("Sentr", "центр"), "Центр");
}

#[test]
fn concurrent_conversion_agrees() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| relaxed("Qazaqstan Respýblıkasy")))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "Қазақстан Республикасы");
    }
}

/// Kazakh uppercase: `ı` → `I`, `i` → `İ`.
fn kaz_upper(word: &str) -> String {
    word.chars()
        .map(|c| match c {
            'ı' => 'I',
            'i' => 'İ',
            _ => crate::unicode::simple_upper(c),
        })
        .collect()
}

proptest! {
    #[test]
    fn uppercase_word_converts_to_uppercase(
        word in "[aábdefgǵhiıjklmnńoópqrstuúvyýz-]{1,12}"
    ) {
        let lower = relaxed(&word);
        let upper = relaxed(&kaz_upper(&word));
        prop_assert_eq!(upper, lower.to_uppercase());
    }

    #[test]
    fn relaxed_mode_never_rejects(text in "\\PC{0,24}") {
        prop_assert!(KazDetransliterator::global().convert(&text, true).is_some());
    }
}
