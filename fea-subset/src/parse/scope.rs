use crate::{ast::FlagKind, types::Tag};

/// The script and language in effect at a point in a statement stream.
///
/// A scope only ever moves forward: each control statement produces the scope
/// for the statements that follow it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Scope {
    pub script: Option<Tag>,
    pub language: Option<Tag>,
}

impl Scope {
    pub fn new(script: Option<Tag>, language: Option<Tag>) -> Self {
        Scope { script, language }
    }

    /// The scope that follows a statement of the given kind.
    ///
    /// A `script` statement resets the language. A `language` statement seen
    /// before any `script` statement applies to the implicit `DFLT` script, so
    /// the script stays unset.
    pub(crate) fn apply(&self, kind: &FlagKind) -> Scope {
        match kind {
            FlagKind::Script(script) => Scope::new(Some(script.clone()), None),
            FlagKind::Language(language) => {
                Scope::new(self.script.clone(), Some(language.clone()))
            }
            _ => self.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_none() && self.language.is_none()
    }
}
