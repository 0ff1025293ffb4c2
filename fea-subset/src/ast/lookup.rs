//! Named lookup blocks.

use log::debug;
use smol_str::SmolStr;

use super::{FlagKind, Statement, Summary};
use crate::{
    error::{BlockKind, ParseError},
    parse::{find_block_end, logical_lines, parse_statements, BlockHeader, Owner, Scope},
    subset::SubsetFilter,
    types::{GlyphSet, Tag, TagSet},
    write::{write_block, WriteFea},
};

/// A `lookup NAME { ... } NAME;` block.
#[derive(Clone, Debug, PartialEq)]
pub struct Lookup {
    name: SmolStr,
    use_extension: bool,
    script: Option<Tag>,
    language: Option<Tag>,
    scripts: TagSet,
    languages: TagSet,
    all_glyphs: GlyphSet,
    statements: Vec<Statement>,
}

impl Lookup {
    /// Parse a complete lookup block, from its opening line to its close.
    ///
    /// `scope` is the scope in effect where the block begins.
    pub fn parse(text: &str, scope: &Scope) -> Result<Self, ParseError> {
        let lines = logical_lines(text);
        let header = lines
            .first()
            .and_then(|line| BlockHeader::parse(line))
            .filter(|header| header.kind == BlockKind::Lookup)
            .ok_or(ParseError::MissingLookupName)?;
        let end = find_block_end(&lines, 0, &header)?;
        if end + 1 < lines.len() {
            debug!("ignoring {} lines after lookup '{}'", lines.len() - end - 1, header.name);
        }
        Lookup::from_lines(&header, &lines[1..end], scope)
    }

    pub(crate) fn from_lines(
        header: &BlockHeader,
        body: &[String],
        scope: &Scope,
    ) -> Result<Self, ParseError> {
        let statements = parse_statements(body, scope.clone(), Owner::Lookup(&header.name))?;
        let Summary {
            mut scripts,
            mut languages,
            glyphs,
        } = Summary::of(&statements);

        let own_script = statements.iter().find_map(|s| match s {
            Statement::Flag(flag) => match flag.kind() {
                FlagKind::Script(tag) => Some(tag.clone()),
                _ => None,
            },
            _ => None,
        });
        let own_language = statements.iter().find_map(|s| match s {
            Statement::Flag(flag) => match flag.kind() {
                FlagKind::Language(tag) => Some(tag.clone()),
                _ => None,
            },
            _ => None,
        });
        scripts.extend(scope.script.clone());
        languages.extend(scope.language.clone());
        let script = own_script.clone().or_else(|| scope.script.clone());
        let language = match own_script {
            Some(_) => own_language,
            None => own_language.or_else(|| scope.language.clone()),
        };

        debug!(
            "lookup '{}' with {} statements, scripts {scripts:?}",
            header.name,
            statements.len()
        );
        Ok(Lookup {
            name: header.name.clone(),
            use_extension: header.use_extension,
            script,
            language,
            scripts,
            languages,
            all_glyphs: glyphs,
            statements,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The script this block was defined under, or declared itself.
    pub fn script(&self) -> Option<&Tag> {
        self.script.as_ref()
    }

    /// The language this block was defined under, or declared itself.
    pub fn language(&self) -> Option<&Tag> {
        self.language.as_ref()
    }

    /// Every script this lookup is active for.
    ///
    /// This includes scripts under which it is referenced later in the
    /// enclosing feature.
    pub fn scripts(&self) -> &TagSet {
        &self.scripts
    }

    /// Every language this lookup is active for.
    pub fn languages(&self) -> &TagSet {
        &self.languages
    }

    pub fn all_glyphs(&self) -> &GlyphSet {
        &self.all_glyphs
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn use_extension(&self) -> bool {
        self.use_extension
    }

    /// Register this lookup as active under `scope`.
    pub(crate) fn add_scope(&mut self, scope: &Scope) {
        self.scripts.extend(scope.script.clone());
        self.languages.extend(scope.language.clone());
    }

    /// Subset the body of this lookup.
    ///
    /// Returns `None` if nothing but comments, flags and classes survive.
    pub fn subset(&self, filter: &SubsetFilter) -> Option<Lookup> {
        if filter.is_unset() {
            return Some(self.clone());
        }
        let statements: Vec<_> = self
            .statements
            .iter()
            .filter_map(|statement| statement.subset(filter))
            .collect();
        if !statements.iter().any(Statement::is_substantive) {
            debug!("lookup '{}' is empty after subsetting", self.name);
            return None;
        }
        Some(Lookup {
            name: self.name.clone(),
            use_extension: self.use_extension,
            script: self.script.clone(),
            language: self.language.clone(),
            scripts: self.scripts.clone(),
            languages: self.languages.clone(),
            all_glyphs: Summary::of(&statements).glyphs,
            statements,
        })
    }
}

impl WriteFea for Lookup {
    fn write_fea(&self, depth: usize) -> String {
        let header = if self.use_extension {
            format!("lookup {} useExtension", self.name)
        } else {
            format!("lookup {}", self.name)
        };
        write_block(&header, &self.name, &self.statements, depth)
    }
}
