pub mod commands;
pub mod tsv;
