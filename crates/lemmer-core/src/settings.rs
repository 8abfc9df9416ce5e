//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub detranslit: DetranslitSettings,
    pub dictionary: DictionarySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetranslitSettings {
    pub convert_all_chars: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionarySettings {
    pub eager_validation: bool,
    pub mmap: bool,
    pub trie_file: String,
    pub suffixes_file: String,
    pub paradigms_file: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_file_name {
        ($section:ident . $field:ident) => {
            let value = &s.$section.$field;
            if value.is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
            if value.contains(|c: char| c == '/' || c == '\\') {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be a bare file name".to_string(),
                });
            }
        };
    }

    check_file_name!(dictionary.trie_file);
    check_file_name!(dictionary.suffixes_file);
    check_file_name!(dictionary.paradigms_file);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert!(s.detranslit.convert_all_chars);
        assert!(!s.dictionary.eager_validation);
        assert!(s.dictionary.mmap);
        assert_eq!(s.dictionary.trie_file, "trie");
        assert_eq!(s.dictionary.suffixes_file, "suffixes");
        assert_eq!(s.dictionary.paradigms_file, "paradigms");
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[detranslit]
convert_all_chars = false

[dictionary]
eager_validation = true
mmap = false
trie_file = "kk.trie"
suffixes_file = "kk.suffixes"
paradigms_file = "kk.paradigms"
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert!(!s.detranslit.convert_all_chars);
        assert!(s.dictionary.eager_validation);
        assert_eq!(s.dictionary.trie_file, "kk.trie");
    }

    #[test]
    fn error_empty_file_name() {
        let toml = r#"
[detranslit]
convert_all_chars = true

[dictionary]
eager_validation = false
mmap = true
trie_file = "trie"
suffixes_file = ""
paradigms_file = "paradigms"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("dictionary.suffixes_file"));
    }

    #[test]
    fn error_path_in_file_name() {
        let toml = r#"
[detranslit]
convert_all_chars = true

[dictionary]
eager_validation = false
mmap = true
trie_file = "../trie"
suffixes_file = "suffixes"
paradigms_file = "paradigms"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("dictionary.trie_file"));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[detranslit]
convert_all_chars = true
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
