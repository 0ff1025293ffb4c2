//! Whole feature files.
//!
//! A feature file is mostly top-level statements we have no reason to
//! understand (`languagesystem`, class definitions, `table` blocks). Those are
//! carried through untouched; only `feature` and `lookup` blocks are parsed.

use log::debug;

use crate::{
    ast::{Feature, Lookup},
    error::{BlockKind, ParseError},
    parse::{find_block_end, logical_lines, BlockHeader, Scope},
    subset::SubsetFilter,
    write::{indent, WriteFea},
};

/// A top-level item in a feature file.
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Feature(Feature),
    Lookup(Lookup),
    /// Any other statement or block line, as written.
    Verbatim(String),
}

/// A parsed feature file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureFile {
    items: Vec<Item>,
}

impl FeatureFile {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let lines = logical_lines(text);
        let mut items = Vec::new();
        let mut i = 0;
        while i < lines.len() {
            let item = match BlockHeader::parse(&lines[i]) {
                Some(header) => {
                    let end = find_block_end(&lines, i, &header)?;
                    let body = &lines[i + 1..end];
                    let item = match header.kind {
                        BlockKind::Feature => {
                            Item::Feature(Feature::from_lines(header.name, body)?)
                        }
                        BlockKind::Lookup => {
                            Item::Lookup(Lookup::from_lines(&header, body, &Scope::default())?)
                        }
                    };
                    i = end;
                    item
                }
                None => Item::Verbatim(lines[i].clone()),
            };
            items.push(item);
            i += 1;
        }
        Ok(FeatureFile { items })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn features(&self) -> impl Iterator<Item = &Feature> + '_ {
        self.items.iter().filter_map(|item| match item {
            Item::Feature(feature) => Some(feature),
            _ => None,
        })
    }

    /// The first feature with the given name.
    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features().find(|feature| feature.name() == name)
    }

    /// Subset every feature, dropping those that become redundant.
    ///
    /// Top-level lookups and other statements are kept as they are, since
    /// they may be referenced from anywhere.
    pub fn subset(&self, filter: &SubsetFilter) -> FeatureFile {
        let items = self
            .items
            .iter()
            .filter_map(|item| match item {
                Item::Feature(feature) => {
                    let subset = feature.subset(filter);
                    if subset.is_none() {
                        debug!("dropping feature '{}'", feature.name());
                    }
                    subset.map(Item::Feature)
                }
                other => Some(other.clone()),
            })
            .collect();
        FeatureFile { items }
    }

    pub fn write(&self) -> String {
        let mut depth = 0usize;
        let mut out = Vec::with_capacity(self.items.len());
        for item in &self.items {
            match item {
                Item::Feature(feature) => out.push(feature.write_fea(depth)),
                Item::Lookup(lookup) => out.push(lookup.write_fea(depth)),
                // keep other blocks (`table GDEF { ... } GDEF;`) readable
                Item::Verbatim(line) => {
                    if line.starts_with('}') {
                        depth = depth.saturating_sub(1);
                    }
                    out.push(format!("{}{line}", indent(depth)));
                    if line.ends_with('{') {
                        depth += 1;
                    }
                }
            }
        }
        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}
