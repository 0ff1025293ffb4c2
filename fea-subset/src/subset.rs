//! Choosing which rules survive subsetting

use indexmap::IndexSet;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::types::{GlyphName, GlyphSet, Tag, TagSet};

/// The scripts, languages and glyphs to keep.
///
/// Each filter is optional; an unset filter keeps everything. Rules declared
/// before any `script` statement belong to the `DFLT` script, and rules
/// declared before any `language` statement belong to the `dflt` language,
/// so include those tags to keep them.
///
/// This can be loaded from YAML:
///
/// ```yaml
/// scripts: [latn, DFLT]
/// glyphs: [a, b, f_i]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubsetFilter {
    pub scripts: Option<TagSet>,
    pub languages: Option<TagSet>,
    pub glyphs: Option<GlyphSet>,
}

impl SubsetFilter {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// `true` if no filter is set, in which case subsetting is a copy.
    pub fn is_unset(&self) -> bool {
        self.scripts.is_none() && self.languages.is_none() && self.glyphs.is_none()
    }

    pub fn with_scripts<T: AsRef<str>>(mut self, scripts: impl IntoIterator<Item = T>) -> Self {
        self.scripts = Some(tags(scripts));
        self
    }

    pub fn with_languages<T: AsRef<str>>(
        mut self,
        languages: impl IntoIterator<Item = T>,
    ) -> Self {
        self.languages = Some(tags(languages));
        self
    }

    pub fn with_glyphs<T: AsRef<str>>(mut self, glyphs: impl IntoIterator<Item = T>) -> Self {
        self.glyphs = Some(glyphs.into_iter().map(GlyphName::new).collect());
        self
    }

    pub(crate) fn matches_script(&self, script: Option<&Tag>) -> bool {
        match &self.scripts {
            None => true,
            Some(scripts) => scripts.contains(script.unwrap_or(&Tag::DFLT_SCRIPT)),
        }
    }

    pub(crate) fn matches_language(&self, language: Option<&Tag>) -> bool {
        match &self.languages {
            None => true,
            Some(languages) => languages.contains(language.unwrap_or(&Tag::DFLT_LANGUAGE)),
        }
    }

    /// `true` if every glyph in `glyphs` is kept.
    pub(crate) fn contains_glyphs(&self, glyphs: &[GlyphName]) -> bool {
        match &self.glyphs {
            None => true,
            Some(keep) => glyphs.iter().all(|glyph| keep.contains(glyph)),
        }
    }

    /// The filter that keeps only what both `self` and `other` keep.
    pub fn intersect(&self, other: &SubsetFilter) -> SubsetFilter {
        SubsetFilter {
            scripts: intersect(&self.scripts, &other.scripts),
            languages: intersect(&self.languages, &other.languages),
            glyphs: intersect(&self.glyphs, &other.glyphs),
        }
    }
}

fn tags<T: AsRef<str>>(raw: impl IntoIterator<Item = T>) -> TagSet {
    raw.into_iter()
        .filter_map(|tag| match tag.as_ref().parse() {
            Ok(tag) => Some(tag),
            Err(e) => {
                warn!("{e}, it will match nothing");
                None
            }
        })
        .collect()
}

fn intersect<T: Clone + Eq + std::hash::Hash>(
    one: &Option<IndexSet<T>>,
    two: &Option<IndexSet<T>>,
) -> Option<IndexSet<T>> {
    match (one, two) {
        (Some(one), Some(two)) => Some(one.intersection(two).cloned().collect()),
        (Some(set), None) | (None, Some(set)) => Some(set.clone()),
        (None, None) => None,
    }
}
