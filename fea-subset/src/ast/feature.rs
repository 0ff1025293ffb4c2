//! Feature blocks, the entry point for parsing, subsetting and writing.

use std::collections::HashSet;

use log::debug;
use smol_str::SmolStr;

use super::{Lookup, LookupFlag, Statement, Summary};
use crate::{
    error::{BlockKind, ParseError},
    parse::{find_block_end, logical_lines, parse_statements, BlockHeader, Owner, Scope},
    subset::SubsetFilter,
    types::{GlyphSet, TagSet},
    write::{write_block, write_statements, WriteFea, WriteOptions},
};

/// A `feature NAME { ... } NAME;` block.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    name: SmolStr,
    statements: Vec<Statement>,
    scripts: TagSet,
    languages: TagSet,
    all_glyphs: GlyphSet,
}

impl Feature {
    /// Parse the first feature block in `text`.
    ///
    /// Anything before the `feature NAME {` line or after its close is
    /// ignored.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let lines = logical_lines(text);
        let (start, header) = lines
            .iter()
            .enumerate()
            .find_map(|(i, line)| {
                BlockHeader::parse(line)
                    .filter(|header| header.kind == BlockKind::Feature)
                    .map(|header| (i, header))
            })
            .ok_or(ParseError::MissingFeatureName)?;
        let end = find_block_end(&lines, start, &header)?;
        Feature::from_lines(header.name, &lines[start + 1..end])
    }

    /// Parse a feature from its name and the text between its braces.
    pub fn from_body(name: impl Into<SmolStr>, body: &str) -> Result<Self, ParseError> {
        Feature::from_lines(name.into(), &logical_lines(body))
    }

    pub(crate) fn from_lines(name: SmolStr, lines: &[String]) -> Result<Self, ParseError> {
        let statements = parse_statements(lines, Scope::default(), Owner::Feature)?;
        let feature = Feature::new(name, statements);
        debug!(
            "feature '{}' with {} statements, scripts {:?}",
            feature.name,
            feature.statements.len(),
            feature.scripts
        );
        Ok(feature)
    }

    /// Create a feature from its statements.
    pub fn new(name: impl Into<SmolStr>, statements: Vec<Statement>) -> Self {
        let Summary {
            scripts,
            languages,
            glyphs,
        } = Summary::of(&statements);
        Feature {
            name: name.into(),
            statements,
            scripts,
            languages,
            all_glyphs: glyphs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Every script declared in this feature or covered by its lookups.
    pub fn scripts(&self) -> &TagSet {
        &self.scripts
    }

    /// Every language declared in this feature or covered by its lookups.
    pub fn languages(&self) -> &TagSet {
        &self.languages
    }

    /// Every glyph named by this feature's rules and classes.
    pub fn all_glyphs(&self) -> &GlyphSet {
        &self.all_glyphs
    }

    /// The lookups defined directly in this feature.
    pub fn lookups(&self) -> impl Iterator<Item = &Lookup> + '_ {
        self.statements.iter().filter_map(Statement::as_lookup)
    }

    /// The lookup block with the given name, if it is defined in this feature.
    pub fn lookup(&self, name: &str) -> Option<&Lookup> {
        self.lookups().find(|lookup| lookup.name() == name)
    }

    /// Produce a feature containing only what applies to `filter`.
    ///
    /// Returns `None` if the result would contain no rules, lookups or lookup
    /// references.
    ///
    /// The first reference to a lookup whose block was removed is replaced by
    /// the original block, filtered by glyphs only: the reference activates
    /// it under a script the block was not defined for, but every rule kept
    /// must still use only the kept glyphs. If no rule of the block survives
    /// the glyph filter, the reference is dropped. References to lookups that
    /// were never defined here are kept.
    pub fn subset(&self, filter: &SubsetFilter) -> Option<Feature> {
        if filter.is_unset() {
            return Some(self.clone());
        }
        let filtered: Vec<_> = self
            .statements
            .iter()
            .filter_map(|statement| statement.subset(filter))
            .collect();

        let mut defined: HashSet<SmolStr> = filtered
            .iter()
            .filter_map(Statement::as_lookup)
            .map(|lookup| SmolStr::from(lookup.name()))
            .collect();
        let glyphs_only = SubsetFilter {
            glyphs: filter.glyphs.clone(),
            ..Default::default()
        };
        let mut statements = Vec::with_capacity(filtered.len());
        for statement in filtered {
            let dangling = statement
                .as_flag()
                .and_then(LookupFlag::lookup_reference)
                .filter(|name| !defined.contains(*name))
                .and_then(|name| self.lookup(name));
            let Some(original) = dangling else {
                statements.push(statement);
                continue;
            };
            match original.subset(&glyphs_only) {
                Some(lookup) => {
                    debug!(
                        "inlining lookup '{}' at its reference in '{}'",
                        lookup.name(),
                        self.name
                    );
                    defined.insert(lookup.name().into());
                    statements.push(Statement::Lookup(lookup));
                }
                None => debug!(
                    "dropping reference to '{}' in '{}', none of its rules survive",
                    original.name(),
                    self.name
                ),
            }
        }

        if !statements.iter().any(Statement::is_substantive) {
            debug!("feature '{}' is redundant under {filter:?}", self.name);
            return None;
        }
        Some(Feature::new(self.name.clone(), statements))
    }

    /// Write this feature as FEA source.
    pub fn write(&self, options: WriteOptions) -> String {
        if options.omit_declaration {
            write_statements(&self.statements, 0)
        } else {
            self.write_fea(0)
        }
    }
}

impl WriteFea for Feature {
    fn write_fea(&self, depth: usize) -> String {
        write_block(&format!("feature {}", self.name), &self.name, &self.statements, depth)
    }
}

impl std::ops::Index<usize> for Feature {
    type Output = Statement;

    fn index(&self, index: usize) -> &Statement {
        &self.statements[index]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::Tag;

    fn tag(s: &str) -> Tag {
        s.parse().unwrap()
    }

    static SCENARIO: &str = "feature ccmp {
    lookup ccmap1 { sub danda-deva danda-deva by dbldanda-deva; } ccmap1;
    script dev2;
    lookup ccmap1;
    language MAR;
    lookup ccmap1;
} ccmp;";

    #[test]
    fn reference_lines_extend_scope() {
        let feature = Feature::parse(SCENARIO).unwrap();
        let lookup = feature.lookup("ccmap1").unwrap();
        assert_eq!(lookup.scripts().iter().collect::<Vec<_>>(), [&tag("dev2")]);
        assert_eq!(lookup.languages().iter().collect::<Vec<_>>(), [&tag("MAR")]);
        assert!(feature.scripts().contains("dev2"));
        assert!(feature.languages().contains("MAR"));
    }

    #[test]
    fn lookup_defined_under_script() {
        let feature = Feature::from_body(
            "ccmp",
            "script dev2;\nlookup ccmap1 {\nsub danda-deva danda-deva by dbldanda-deva;\n} ccmap1;\nlanguage MAR;\nlookup ccmap1;",
        )
        .unwrap();
        let lookup = feature.lookup("ccmap1").unwrap();
        assert_eq!(lookup.script(), Some(&tag("dev2")));
        assert_eq!(lookup.scripts().len(), 1);
        assert!(lookup.languages().contains("MAR"));
    }

    #[test]
    fn rules_inherit_scope() {
        let feature = Feature::from_body("liga", "sub f i by f_i;\nscript latn;\nlanguage TRK;\nsub f i by f_i.TRK;").unwrap();
        let rules: Vec<_> = feature.statements().iter().filter_map(Statement::as_rule).collect();
        assert_eq!(rules[0].script(), None);
        assert_eq!(rules[1].script(), Some(&tag("latn")));
        assert_eq!(rules[1].language(), Some(&tag("TRK")));
    }

    #[test]
    fn missing_name() {
        assert_eq!(
            Feature::parse("lookup a { sub a by b; } a;"),
            Err(ParseError::MissingFeatureName)
        );
    }

    #[test]
    fn unclosed_feature() {
        assert_eq!(
            Feature::parse("feature liga {\nsub f i by f_i;\n} lig;"),
            Err(ParseError::UnmatchedBlock {
                kind: BlockKind::Feature,
                name: "liga".into()
            })
        );
    }

    #[test]
    fn unclosed_lookup_in_feature() {
        assert_eq!(
            Feature::parse("feature liga {\nlookup l1 {\nsub f i by f_i;\n} liga;"),
            Err(ParseError::UnmatchedBlock {
                kind: BlockKind::Lookup,
                name: "l1".into()
            })
        );
    }

    #[test]
    fn index_statements() {
        let feature = Feature::parse(SCENARIO).unwrap();
        assert!(feature[0].as_lookup().is_some());
        assert_eq!(feature[1].as_flag().unwrap().text(), "script dev2;");
    }

    #[test]
    fn write_wrapped_and_bare() {
        let feature = Feature::from_body("liga", "# ligatures\nsub f i by f_i;").unwrap();
        assert_eq!(
            feature.write(WriteOptions::default()),
            "feature liga {\n\t# ligatures\n\tsub f i by f_i;\n} liga;"
        );
        assert_eq!(
            feature.write(WriteOptions {
                omit_declaration: true
            }),
            "# ligatures\nsub f i by f_i;"
        );
    }

    #[test]
    fn unset_filter_is_identity() {
        let feature = Feature::parse(SCENARIO).unwrap();
        assert_eq!(feature.subset(&SubsetFilter::default()), Some(feature.clone()));
    }

    #[test]
    fn redundant_feature_is_dropped() {
        let feature = Feature::from_body("ccmp", "# nothing here\n@Marks = [acutecomb gravecomb];").unwrap();
        let filter = SubsetFilter::default().with_glyphs(["acutecomb", "gravecomb"]);
        assert_eq!(feature.subset(&filter), None);
    }

    #[test]
    fn dangling_reference_is_repaired() {
        let feature = Feature::from_body(
            "ccmp",
            "script dev2;\nlookup ccmap1 {\nsub danda-deva danda-deva by dbldanda-deva;\n} ccmap1;\nscript latn;\nlookup ccmap1;",
        )
        .unwrap();
        let subset = feature
            .subset(&SubsetFilter::default().with_scripts(["latn"]))
            .unwrap();
        let kinds: Vec<_> = subset
            .statements()
            .iter()
            .map(|s| match s {
                Statement::Flag(flag) => flag.text().to_string(),
                Statement::Lookup(lookup) => format!("block {}", lookup.name()),
                _ => panic!("unexpected {s:?}"),
            })
            .collect();
        assert_eq!(kinds, ["script dev2;", "script latn;", "block ccmap1"]);
        assert_eq!(subset.lookup("ccmap1"), feature.lookup("ccmap1"));
    }

    static UNSCOPED_BLOCK: &str =
        "lookup L1 {\nsub a b by c;\nsub x y by z;\n} L1;\nscript latn;\nlookup L1;";

    #[test]
    fn repaired_block_keeps_only_kept_glyphs() {
        let feature = Feature::from_body("ccmp", UNSCOPED_BLOCK).unwrap();
        let filter = SubsetFilter::default()
            .with_scripts(["latn"])
            .with_glyphs(["x", "y", "z"]);
        let subset = feature.subset(&filter).unwrap();
        let lookup = subset.lookup("L1").unwrap();
        let rules: Vec<_> = lookup.statements().iter().filter_map(Statement::as_rule).collect();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].write_fea(0), "sub x y by z;");
        assert!(filter.contains_glyphs(rules[0].all_glyphs()));
    }

    #[test]
    fn reference_to_emptied_block_is_dropped() {
        let feature = Feature::from_body("ccmp", UNSCOPED_BLOCK).unwrap();
        let filter = SubsetFilter::default().with_glyphs(["q"]);
        assert_eq!(feature.subset(&filter), None);

        let feature = Feature::from_body(
            "ccmp",
            "lookup L1 {\nsub a by b;\n} L1;\nscript latn;\nlookup L1;\nsub q by r;",
        )
        .unwrap();
        let subset = feature.subset(&filter.with_glyphs(["q", "r"])).unwrap();
        let texts: Vec<_> = subset.statements().iter().map(|s| s.write_fea(0)).collect();
        assert_eq!(texts, ["script latn;", "sub q by r;"]);
    }

    #[test]
    fn lookup_may_share_the_feature_name() {
        let feature =
            Feature::parse("feature liga {\n lookup liga {\n sub f i by f_i;\n } liga;\n} liga;")
                .unwrap();
        assert_eq!(feature.name(), "liga");
        assert_eq!(feature.lookup("liga").unwrap().statements().len(), 1);
    }

    #[test]
    fn reference_to_external_lookup_survives() {
        let feature = Feature::from_body("ccmp", "script latn;\nlookup defined_elsewhere;").unwrap();
        let subset = feature
            .subset(&SubsetFilter::default().with_scripts(["deva"]))
            .unwrap();
        assert_eq!(subset.statements().len(), 2);
        assert!(subset.lookups().next().is_none());
    }
}
