//! The statement engine shared by feature and lookup bodies.

use log::trace;

use super::{find_block_end, BlockHeader, Scope};
use crate::{
    ast::{InFeatureClass, Lookup, LookupFlag, Statement, Substitution},
    error::{BlockKind, ParseError},
};

/// The block whose body is being parsed.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Owner<'a> {
    Feature,
    Lookup(&'a str),
}

/// Classify each logical line of a block body, threading the scope forward.
///
/// `scope` is the scope in effect where the body begins. Lookup blocks found
/// along the way are parsed recursively, seeded with the scope in effect at
/// their opening line.
pub(crate) fn parse_statements(
    lines: &[String],
    scope: Scope,
    owner: Owner,
) -> Result<Vec<Statement>, ParseError> {
    let mut statements = Vec::new();
    let mut scope = scope;
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].as_str();
        let statement = if line.starts_with('#') {
            Statement::Flag(LookupFlag::comment(line, scope.clone()))
        } else if line.starts_with('@') {
            Statement::ClassDef(InFeatureClass::parse(line))
        } else if let Some(header) = lookup_header(line) {
            if let Owner::Lookup(outer) = owner {
                return Err(ParseError::NestedLookup {
                    outer: outer.into(),
                    inner: header.name,
                });
            }
            let end = find_block_end(lines, i, &header)?;
            let lookup = Lookup::from_lines(&header, &lines[i + 1..end], &scope)?;
            i = end;
            Statement::Lookup(lookup)
        } else if Substitution::is_rule(line) {
            Statement::Rule(Substitution::parse(line, &scope))
        } else {
            let flag = LookupFlag::parse(line, &scope);
            scope = flag.scope().clone();
            if let Some(name) = flag.lookup_reference() {
                activate(&mut statements, name, &scope);
            }
            Statement::Flag(flag)
        };
        trace!("{scope:?} {statement:?}");
        statements.push(statement);
        i += 1;
    }
    Ok(statements)
}

fn lookup_header(line: &str) -> Option<BlockHeader> {
    BlockHeader::parse(line).filter(|header| header.kind == BlockKind::Lookup)
}

/// A bare `lookup NAME;` registers an earlier block under the current scope.
fn activate(statements: &mut [Statement], name: &str, scope: &Scope) {
    for statement in statements.iter_mut() {
        if let Statement::Lookup(lookup) = statement {
            if lookup.name() == name {
                lookup.add_scope(scope);
            }
        }
    }
}
