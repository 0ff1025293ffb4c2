//! A single substitution rule.

use std::sync::OnceLock;

use log::warn;
use regex::Regex;
use smol_str::SmolStr;

use super::sequence::{parse_sequence, SequenceElement};
use crate::{
    parse::Scope,
    subset::SubsetFilter,
    types::{GlyphName, Tag},
    write::{indent, WriteFea},
};

/// One `sub ... by ...;` or chaining `sub ... lookup NAME ...;` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Substitution {
    script: Option<Tag>,
    language: Option<Tag>,
    input: Vec<SequenceElement>,
    output: Vec<SequenceElement>,
    is_chaining: bool,
    is_contextual: bool,
    all_glyphs: Vec<GlyphName>,
    // set when the statement did not match a rule pattern
    unparsed: Option<SmolStr>,
}

fn plain_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^sub(?:stitute)?\s+(.+?)\s+by\s+(.+?)\s*;$").unwrap())
}

fn chaining_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^sub(?:stitute)?\s+(.+?\slookup\s.+?)\s*;$").unwrap())
}

impl Substitution {
    /// `true` if `line` starts with a substitution keyword.
    pub(crate) fn is_rule(line: &str) -> bool {
        matches!(
            line.split_whitespace().next(),
            Some("sub" | "substitute")
        )
    }

    /// Parse a single rule statement in the given scope.
    ///
    /// Statements that do not match either rule pattern produce a rule with
    /// no sequences, which is written back out exactly as it was read.
    pub fn parse(line: &str, scope: &Scope) -> Self {
        let line = line.trim();
        let (input, output, is_chaining) = if let Some(caps) = plain_rule().captures(line) {
            (parse_sequence(&caps[1]), parse_sequence(&caps[2]), false)
        } else if let Some(caps) = chaining_rule().captures(line) {
            (parse_sequence(&caps[1]), Vec::new(), true)
        } else {
            warn!("unrecognized substitution '{line}'");
            return Substitution {
                script: scope.script.clone(),
                language: scope.language.clone(),
                input: Vec::new(),
                output: Vec::new(),
                is_chaining: false,
                is_contextual: false,
                all_glyphs: Vec::new(),
                unparsed: Some(line.into()),
            };
        };
        Substitution::new(scope, input, output, is_chaining)
    }

    fn new(
        scope: &Scope,
        mut input: Vec<SequenceElement>,
        mut output: Vec<SequenceElement>,
        is_chaining: bool,
    ) -> Self {
        let is_contextual = input.iter().chain(output.iter()).any(|el| el.is_target());
        if is_contextual {
            input
                .iter_mut()
                .chain(output.iter_mut())
                .for_each(SequenceElement::mark_context);
        }
        let all_glyphs = input
            .iter()
            .chain(output.iter())
            .flat_map(|el| el.glyph_names().iter().cloned())
            .collect();
        Substitution {
            script: scope.script.clone(),
            language: scope.language.clone(),
            input,
            output,
            is_chaining,
            is_contextual,
            all_glyphs,
            unparsed: None,
        }
    }

    pub fn script(&self) -> Option<&Tag> {
        self.script.as_ref()
    }

    pub fn language(&self) -> Option<&Tag> {
        self.language.as_ref()
    }

    pub fn input(&self) -> &[SequenceElement] {
        &self.input
    }

    pub fn output(&self) -> &[SequenceElement] {
        &self.output
    }

    /// `true` if this rule invokes lookups instead of having a `by` clause.
    pub fn is_chaining(&self) -> bool {
        self.is_chaining
    }

    /// `true` if some element is marked as a target.
    pub fn is_contextual(&self) -> bool {
        self.is_contextual
    }

    /// The glyphs named by the input followed by those named by the output.
    pub fn all_glyphs(&self) -> &[GlyphName] {
        &self.all_glyphs
    }

    /// `true` if this statement could not be parsed as a rule.
    pub fn is_unparsed(&self) -> bool {
        self.unparsed.is_some()
    }

    pub fn input_glyphs(&self) -> impl Iterator<Item = &GlyphName> + '_ {
        self.input.iter().flat_map(|el| el.glyph_names())
    }

    pub fn output_glyphs(&self) -> impl Iterator<Item = &GlyphName> + '_ {
        self.output.iter().flat_map(|el| el.glyph_names())
    }

    /// A copy of this rule if it passes `filter`.
    pub fn subset(&self, filter: &SubsetFilter) -> Option<Substitution> {
        (filter.matches_script(self.script())
            && filter.matches_language(self.language())
            && filter.contains_glyphs(&self.all_glyphs))
        .then(|| self.clone())
    }
}

impl WriteFea for Substitution {
    fn write_fea(&self, depth: usize) -> String {
        let tab = indent(depth);
        if let Some(text) = &self.unparsed {
            return format!("{tab}{text}");
        }
        let input = write_sequence(&self.input);
        if self.is_chaining {
            format!("{tab}sub {input};")
        } else {
            let output = write_sequence(&self.output);
            format!("{tab}sub {input} by {output};")
        }
    }
}

fn write_sequence(elements: &[SequenceElement]) -> String {
    elements
        .iter()
        .map(SequenceElement::write)
        .collect::<Vec<_>>()
        .join(" ")
}
