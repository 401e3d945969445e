//! Data layer - Static mappings
//!
//! This module contains the static data used when rewriting headings:
//! - Default formula → bookmark text mappings
//! - Unicode superscript/subscript tables

pub mod symbols;

// Re-export commonly used items
pub use symbols::{lookup_default, to_script, DEFAULT_MAPPINGS, SUBSCRIPTS, SUPERSCRIPTS};
