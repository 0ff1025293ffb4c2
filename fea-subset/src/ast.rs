//! The feature object model

mod class;
mod feature;
mod flag;
mod lookup;
mod sequence;
mod statement;
mod substitution;

pub use class::InFeatureClass;
pub use feature::Feature;
pub use flag::{FlagKind, LookupFlag};
pub use lookup::Lookup;
pub use sequence::{ElementKind, SequenceElement};
pub use statement::Statement;
pub use substitution::Substitution;

use crate::types::{GlyphSet, TagSet};

/// The scripts, languages and glyphs mentioned by a sequence of statements.
#[derive(Clone, Debug, Default)]
pub(crate) struct Summary {
    pub(crate) scripts: TagSet,
    pub(crate) languages: TagSet,
    pub(crate) glyphs: GlyphSet,
}

impl Summary {
    pub(crate) fn of(statements: &[Statement]) -> Summary {
        let mut summary = Summary::default();
        for statement in statements {
            match statement {
                Statement::Flag(flag) => match flag.kind() {
                    FlagKind::Script(tag) => {
                        summary.scripts.insert(tag.clone());
                    }
                    FlagKind::Language(tag) => {
                        summary.languages.insert(tag.clone());
                    }
                    _ => (),
                },
                Statement::ClassDef(class) => {
                    summary.glyphs.extend(class.members().iter().cloned())
                }
                Statement::Lookup(lookup) => {
                    summary.scripts.extend(lookup.scripts().iter().cloned());
                    summary.languages.extend(lookup.languages().iter().cloned());
                    summary.glyphs.extend(lookup.all_glyphs().iter().cloned());
                }
                Statement::Rule(rule) => summary.glyphs.extend(rule.all_glyphs().iter().cloned()),
            }
        }
        summary
    }
}
