use std::path::PathBuf;

use clap::{Parser, Subcommand};

use lemmer_cli::commands::{config_ops, dict_ops, translit_ops};

#[derive(Parser)]
#[command(name = "kaztool", about = "Kazakh detransliteration and paradigm tool")]
struct Cli {
    /// Write a JSON trace log into this directory (requires --features trace)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert Kazakh Latin text to Cyrillic
    Detranslit {
        /// Reject text containing letters with no Cyrillic mapping
        #[arg(long)]
        strict: bool,
        /// Text to convert (reads stdin lines when absent)
        text: Option<String>,
    },
    /// List the forms of a word
    Forms {
        /// Dictionary directory (trie, suffixes, paradigms)
        dict_dir: String,
        /// Word to expand
        word: String,
        /// Treat the word as Kazakh Latin and detransliterate it first
        #[arg(long)]
        latin: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Look up a word in a packed-value trie file
    Lookup {
        /// Trie file
        trie_file: String,
        /// Word to look up
        word: String,
    },
    /// Print the fingerprint of a dictionary
    Fingerprint {
        /// Dictionary directory
        dict_dir: String,
    },
    /// Show trie file info
    Info {
        /// Trie file
        trie_file: String,
    },
    /// Pack a word/paradigm TSV into a trie file
    CompileTrie {
        /// Input TSV: word, prefix length, stem length, paradigm index
        input_tsv: String,
        /// Output trie file
        output_file: String,
    },
    /// Export the default fixlist as TOML
    FixlistExport,
    /// Validate a custom fixlist TOML file
    FixlistValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Some(dir) = &cli.trace_dir {
        kaz_lemmer::init_tracing(dir);
    }

    match cli.command {
        Command::Detranslit { strict, text } => translit_ops::detranslit(text.as_deref(), strict),
        Command::Forms {
            dict_dir,
            word,
            latin,
            json,
        } => dict_ops::forms(&dict_dir, &word, latin, json),
        Command::Lookup { trie_file, word } => dict_ops::lookup(&trie_file, &word),
        Command::Fingerprint { dict_dir } => dict_ops::fingerprint(&dict_dir),
        Command::Info { trie_file } => dict_ops::info(&trie_file),
        Command::CompileTrie {
            input_tsv,
            output_file,
        } => dict_ops::compile_trie(&input_tsv, &output_file),
        Command::FixlistExport => config_ops::fixlist_export(),
        Command::FixlistValidate { file } => config_ops::fixlist_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
