//! Control statements: comments, `lookupflag`, `script`, `language` and
//! bare lookup references.

use std::sync::OnceLock;

use log::warn;
use regex::Regex;
use smol_str::SmolStr;

use crate::{
    parse::Scope,
    types::Tag,
    write::{indent, WriteFea},
};

/// The kind of a [`LookupFlag`] statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlagKind {
    /// `# ...`
    Comment,
    /// `lookupflag ...;`
    LookupFlag,
    /// `script TAG;`
    Script(Tag),
    /// `language TAG ...;`
    Language(Tag),
    /// `lookup NAME;`
    LookupReference(SmolStr),
    /// Any other statement, carried through unchanged.
    Other,
}

/// Any statement that is not a block, a class definition or a rule.
#[derive(Clone, Debug, PartialEq)]
pub struct LookupFlag {
    text: SmolStr,
    kind: FlagKind,
    scope: Scope,
}

fn script_statement() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^script\s+([^\s;]+)\s*;$").unwrap())
}

fn language_statement() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^language\s+([^\s;]+)(?:\s+[^\s;]+)*\s*;$").unwrap())
}

fn lookup_reference() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^lookup\s+([^\s;{]+)\s*;$").unwrap())
}

impl FlagKind {
    fn parse(line: &str) -> FlagKind {
        if line.starts_with('#') {
            FlagKind::Comment
        } else if let Some(caps) = script_statement().captures(line) {
            parse_tag(&caps[1]).map(FlagKind::Script).unwrap_or(FlagKind::Other)
        } else if let Some(caps) = language_statement().captures(line) {
            parse_tag(&caps[1]).map(FlagKind::Language).unwrap_or(FlagKind::Other)
        } else if let Some(caps) = lookup_reference().captures(line) {
            FlagKind::LookupReference(caps[1].into())
        } else if line.split_whitespace().next() == Some("lookupflag") {
            FlagKind::LookupFlag
        } else {
            FlagKind::Other
        }
    }
}

fn parse_tag(raw: &str) -> Option<Tag> {
    match raw.parse() {
        Ok(tag) => Some(tag),
        Err(e) => {
            warn!("ignoring declaration: {e}");
            None
        }
    }
}

impl LookupFlag {
    /// Parse a control statement found in the given scope.
    ///
    /// The statement's own scope is the one that follows it, so a `script`
    /// statement carries the script it declares.
    pub fn parse(line: &str, scope: &Scope) -> Self {
        let text = line.trim();
        let kind = FlagKind::parse(text);
        let scope = scope.apply(&kind);
        LookupFlag {
            text: text.into(),
            kind,
            scope,
        }
    }

    pub(crate) fn comment(line: &str, scope: Scope) -> Self {
        LookupFlag {
            text: line.trim().into(),
            kind: FlagKind::Comment,
            scope,
        }
    }

    pub fn kind(&self) -> &FlagKind {
        &self.kind
    }

    /// The statement, as written.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// The script in effect at this statement.
    pub fn script(&self) -> Option<&Tag> {
        self.scope.script.as_ref()
    }

    /// The language in effect at this statement.
    pub fn language(&self) -> Option<&Tag> {
        self.scope.language.as_ref()
    }

    /// The lookup named by a bare `lookup NAME;` statement.
    pub fn lookup_reference(&self) -> Option<&str> {
        match &self.kind {
            FlagKind::LookupReference(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_lookupflag(&self) -> bool {
        self.kind == FlagKind::LookupFlag
    }

    pub fn is_comment(&self) -> bool {
        self.kind == FlagKind::Comment
    }
}

impl WriteFea for LookupFlag {
    fn write_fea(&self, depth: usize) -> String {
        format!("{}{}", indent(depth), self.text)
    }
}
