//! Glyph class definitions inside feature and lookup bodies.

use std::sync::OnceLock;

use log::warn;
use regex::Regex;
use smol_str::SmolStr;

use crate::{
    types::{GlyphName, GlyphSet},
    write::{indent, WriteFea},
};

/// A glyph class defined inside a feature or lookup: `@Name = [a b c];`
#[derive(Clone, Debug, PartialEq)]
pub struct InFeatureClass {
    name: SmolStr,
    // every item, including references to other classes
    items: Vec<SmolStr>,
    members: GlyphSet,
    unparsed: Option<SmolStr>,
}

fn class_definition() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^@([^\s=]+)\s*=\s*(.*?)\s*;$").unwrap())
}

impl InFeatureClass {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(caps) = class_definition().captures(line) else {
            warn!("unrecognized class definition '{line}'");
            return InFeatureClass {
                name: line.trim_start_matches('@').into(),
                items: Vec::new(),
                members: GlyphSet::new(),
                unparsed: Some(line.into()),
            };
        };
        let value = &caps[2];
        let inner = value
            .strip_prefix('[')
            .and_then(|v| v.strip_suffix(']'))
            .unwrap_or(value);
        let items: Vec<SmolStr> = inner.split_whitespace().map(SmolStr::from).collect();
        let members = items
            .iter()
            .filter(|item| !item.starts_with('@'))
            .map(|item| GlyphName::new(item))
            .collect();
        InFeatureClass {
            name: caps[1].into(),
            items,
            members,
            unparsed: None,
        }
    }

    /// The class name, without the leading `@`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The glyphs in this class, deduplicated.
    ///
    /// References to other classes are not resolved.
    pub fn members(&self) -> &GlyphSet {
        &self.members
    }
}

impl WriteFea for InFeatureClass {
    fn write_fea(&self, depth: usize) -> String {
        let tab = indent(depth);
        match &self.unparsed {
            Some(text) => format!("{tab}{text}"),
            None => format!("{tab}@{} = [{}];", self.name, self.items.join(" ")),
        }
    }
}
