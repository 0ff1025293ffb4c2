//! The elements of a substitution's input and output sequences.

use log::warn;
use smol_str::SmolStr;

use crate::types::GlyphName;

/// What a [`SequenceElement`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// A single glyph name
    Glyph,
    /// A reference to a named class, `@Name`
    ClassRef,
    /// An inline class, `[a b c]`
    InlineClass,
    /// A nested lookup in a chaining rule, `lookup NAME`
    LookupRef,
}

/// One position in a substitution's input or output.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceElement {
    text: SmolStr,
    kind: ElementKind,
    is_target: bool,
    is_context: bool,
    glyph_names: Vec<GlyphName>,
}

impl SequenceElement {
    /// Create an element from a single atom of source text.
    ///
    /// A trailing `'` marks the element as a target; it is not included in
    /// the element's text.
    pub fn new(atom: &str) -> Self {
        let is_target = atom.ends_with('\'');
        let text = atom.strip_suffix('\'').unwrap_or(atom);
        let (kind, glyph_names) = if text.starts_with('@') {
            (ElementKind::ClassRef, Vec::new())
        } else if text.starts_with('[') {
            (ElementKind::InlineClass, inline_class_members(text))
        } else if text.starts_with("lookup ") {
            (ElementKind::LookupRef, Vec::new())
        } else {
            (ElementKind::Glyph, vec![GlyphName::new(text)])
        };
        SequenceElement {
            text: text.into(),
            kind,
            is_target,
            is_context: false,
            glyph_names,
        }
    }

    /// The source text of this element, without any target marker.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_target(&self) -> bool {
        self.is_target
    }

    /// `true` if this element is not a target, in a rule that has targets.
    pub fn is_context(&self) -> bool {
        self.is_context
    }

    /// The glyphs named directly by this element.
    ///
    /// Empty for class and lookup references; those are resolved elsewhere.
    pub fn glyph_names(&self) -> &[GlyphName] {
        &self.glyph_names
    }

    /// The name of the referenced lookup, for a [`ElementKind::LookupRef`].
    pub fn lookup_name(&self) -> Option<&str> {
        match self.kind {
            ElementKind::LookupRef => self.text.strip_prefix("lookup "),
            _ => None,
        }
    }

    pub(crate) fn mark_context(&mut self) {
        self.is_context = !self.is_target;
    }

    pub(crate) fn write(&self) -> String {
        if self.is_target {
            format!("{}'", self.text)
        } else {
            self.text.to_string()
        }
    }
}

fn inline_class_members(text: &str) -> Vec<GlyphName> {
    let Some(inner) = text
        .strip_prefix('[')
        .and_then(|rest| rest.rfind(']').map(|end| &rest[..end]))
    else {
        warn!("malformed inline class '{text}'");
        return Vec::new();
    };
    inner
        .split_whitespace()
        .filter(|item| !item.starts_with('@'))
        .map(GlyphName::new)
        .collect()
}

/// Split a sequence into elements.
///
/// Inline classes and `lookup NAME` pairs contain spaces but are single
/// elements.
pub(crate) fn parse_sequence(text: &str) -> Vec<SequenceElement> {
    let mut elements = Vec::new();
    let mut rest = text.trim_start();
    while !rest.is_empty() {
        let (atom, tail) = next_atom(rest);
        elements.push(SequenceElement::new(&atom));
        rest = tail.trim_start();
    }
    elements
}

fn next_atom(text: &str) -> (String, &str) {
    if text.starts_with('[') {
        let Some(close) = text.find(']') else {
            return (text.trim_end().to_string(), "");
        };
        let mut end = close + 1;
        if text[end..].starts_with('\'') {
            end += 1;
        }
        return (text[..end].to_string(), &text[end..]);
    }
    let (word, tail) = split_word(text);
    if word == "lookup" {
        let (name, tail) = split_word(tail.trim_start());
        if !name.is_empty() {
            return (format!("lookup {name}"), tail);
        }
    }
    (word.to_string(), tail)
}

fn split_word(text: &str) -> (&str, &str) {
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    text.split_at(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(elements: &[SequenceElement]) -> Vec<&str> {
        elements.iter().map(SequenceElement::text).collect()
    }

    #[test]
    fn glyphs_and_classes() {
        let seq = parse_sequence("@Uppercase @Markscomb' acutecomb");
        assert_eq!(texts(&seq), ["@Uppercase", "@Markscomb", "acutecomb"]);
        assert_eq!(seq[0].kind(), ElementKind::ClassRef);
        assert!(seq[0].glyph_names().is_empty());
        assert!(seq[1].is_target());
        assert_eq!(seq[2].kind(), ElementKind::Glyph);
        assert_eq!(seq[2].glyph_names(), [GlyphName::new("acutecomb")]);
    }

    #[test]
    fn inline_class_is_one_element() {
        let seq = parse_sequence("[i j]' @CombiningTopAccents");
        assert_eq!(texts(&seq), ["[i j]", "@CombiningTopAccents"]);
        assert_eq!(seq[0].kind(), ElementKind::InlineClass);
        assert!(seq[0].is_target());
        assert_eq!(seq[0].glyph_names(), [GlyphName::new("i"), GlyphName::new("j")]);
    }

    #[test]
    fn inline_class_skips_class_refs() {
        let seq = parse_sequence("[@DevaIMatraRephs anusvara-deva]");
        assert_eq!(seq[0].glyph_names(), [GlyphName::new("anusvara-deva")]);
    }

    #[test]
    fn lookup_ref_is_one_element() {
        let seq = parse_sequence("@DevaFullforms' lookup removeReph [anusvara-deva reph-deva]'");
        assert_eq!(
            texts(&seq),
            ["@DevaFullforms", "lookup removeReph", "[anusvara-deva reph-deva]"]
        );
        assert_eq!(seq[1].kind(), ElementKind::LookupRef);
        assert_eq!(seq[1].lookup_name(), Some("removeReph"));
        assert!(!seq[1].is_target());
        assert!(seq[2].is_target());
    }

    #[test]
    fn malformed_inline_class() {
        let seq = parse_sequence("a [b c");
        assert_eq!(texts(&seq), ["a", "[b c"]);
        assert_eq!(seq[1].kind(), ElementKind::InlineClass);
        assert!(seq[1].glyph_names().is_empty());
    }

    #[test]
    fn write_restores_marker() {
        let seq = parse_sequence("[i j]' x");
        assert_eq!(seq[0].write(), "[i j]'");
        assert_eq!(seq[1].write(), "x");
    }
}
