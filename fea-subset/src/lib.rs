//! Parsing, subsetting and rewriting glyph substitution features in the Adobe
//! OpenType Feature File format.
//!
//! This does not attempt to understand the whole language. Feature and lookup
//! blocks are parsed into a small object model that tracks which script and
//! language each statement applies to; that model can then be subset to a set
//! of scripts, languages and glyphs, and written back out.

pub mod ast;
pub mod document;
mod error;
mod parse;
pub mod subset;
mod types;
pub mod write;

#[cfg(test)]
mod tests;

pub use ast::{
    ElementKind, Feature, FlagKind, InFeatureClass, Lookup, LookupFlag, SequenceElement,
    Statement, Substitution,
};
pub use document::FeatureFile;
pub use error::{BlockKind, ParseError};
pub use parse::Scope;
pub use subset::SubsetFilter;
pub use types::{GlyphName, GlyphSet, InvalidTag, Tag, TagSet};
pub use write::{WriteFea, WriteOptions};
