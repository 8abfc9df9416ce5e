fn main() {
    // Validate embedded TOML files at compile time.
    validate_toml(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
    );
    validate_toml(
        "src/translit/default_fixlist.toml",
        include_str!("src/translit/default_fixlist.toml"),
    );
}

fn validate_toml(path: &str, content: &str) {
    println!("cargo:rerun-if-changed={path}");
    match content.parse::<toml::Value>() {
        Ok(value) => {
            if path.ends_with("default_fixlist.toml")
                && value.get("fixlist").and_then(|t| t.as_table()).is_none()
            {
                panic!("{path} has no [fixlist] table");
            }
        }
        Err(_) => panic!("{path} contains invalid TOML"),
    }
}
