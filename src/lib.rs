//! Kazakh lemmer: official-style Latin → Cyrillic detransliteration and
//! automorphology paradigm listing.
//!
//! The heavy lifting lives in [`lemmer_core`]; this crate wires it into an
//! [`Engine`] service object that callers construct once and share.

pub mod engine;
pub mod morphology;
mod trace_init;

pub use engine::{Engine, LatinForms};
pub use lemmer_core::{paradigm, settings, translit, trie, unicode};
pub use morphology::{Morphology, Recognition};
pub use trace_init::init_tracing;
