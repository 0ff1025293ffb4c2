//! Identifiers shared by the parser, the AST and the subsetter.

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// An insertion-ordered set of glyph names.
pub type GlyphSet = IndexSet<GlyphName>;

/// An insertion-ordered set of script or language tags.
pub type TagSet = IndexSet<Tag>;

/// The name of a glyph, as it appears in FEA source.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GlyphName(SmolStr);

impl GlyphName {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(SmolStr::new(s))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for GlyphName {
    fn from(value: &str) -> Self {
        GlyphName(value.into())
    }
}

impl From<String> for GlyphName {
    fn from(value: String) -> Self {
        GlyphName(value.into())
    }
}

impl Debug for GlyphName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for GlyphName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for GlyphName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// lets a GlyphSet be queried with a &str
impl std::borrow::Borrow<str> for GlyphName {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq<&str> for GlyphName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// A script or language tag.
///
/// Unlike the tags stored in a compiled font, these are kept exactly as they
/// were written (`MAR`, not `MAR `) so that they can be written back out.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(SmolStr);

impl Tag {
    /// The script assumed for statements that precede any `script` statement.
    pub const DFLT_SCRIPT: Tag = Tag(SmolStr::new_inline("DFLT"));
    /// The language assumed for statements that precede any `language` statement.
    pub const DFLT_LANGUAGE: Tag = Tag(SmolStr::new_inline("dflt"));

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// An error representing an invalid tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid tag")]
pub struct InvalidTag(String);

impl FromStr for Tag {
    type Err = InvalidTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if (1..=4).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_graphic()) {
            Ok(Tag(s.into()))
        } else {
            Err(InvalidTag(s.to_string()))
        }
    }
}

impl TryFrom<String> for Tag {
    type Error = InvalidTag;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tag> for String {
    fn from(value: Tag) -> Self {
        value.0.into()
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag({})", self.as_str())
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::borrow::Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
