use super::{InFeatureClass, Lookup, LookupFlag, Substitution};
use crate::{subset::SubsetFilter, write::WriteFea};

/// One entry in the body of a feature or lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// A comment, flag, scope declaration or lookup reference
    Flag(LookupFlag),
    /// `@Name = [...];`
    ClassDef(InFeatureClass),
    /// A nested `lookup NAME { ... } NAME;` block
    Lookup(Lookup),
    /// A substitution rule
    Rule(Substitution),
}

impl Statement {
    /// Subset this statement.
    ///
    /// Flags and class definitions always survive; blocks and rules are
    /// filtered.
    pub fn subset(&self, filter: &SubsetFilter) -> Option<Statement> {
        match self {
            Statement::Flag(flag) => Some(Statement::Flag(flag.clone())),
            Statement::ClassDef(class) => Some(Statement::ClassDef(class.clone())),
            Statement::Lookup(lookup) => lookup.subset(filter).map(Statement::Lookup),
            Statement::Rule(rule) => rule.subset(filter).map(Statement::Rule),
        }
    }

    /// `true` for statements that make their enclosing block worth keeping:
    /// lookups, rules and references to lookups.
    pub fn is_substantive(&self) -> bool {
        match self {
            Statement::Flag(flag) => flag.lookup_reference().is_some(),
            Statement::ClassDef(_) => false,
            Statement::Lookup(_) | Statement::Rule(_) => true,
        }
    }

    pub fn as_lookup(&self) -> Option<&Lookup> {
        match self {
            Statement::Lookup(lookup) => Some(lookup),
            _ => None,
        }
    }

    pub fn as_rule(&self) -> Option<&Substitution> {
        match self {
            Statement::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<&LookupFlag> {
        match self {
            Statement::Flag(flag) => Some(flag),
            _ => None,
        }
    }
}

impl WriteFea for Statement {
    fn write_fea(&self, depth: usize) -> String {
        match self {
            Statement::Flag(flag) => flag.write_fea(depth),
            Statement::ClassDef(class) => class.write_fea(depth),
            Statement::Lookup(lookup) => lookup.write_fea(depth),
            Statement::Rule(rule) => rule.write_fea(depth),
        }
    }
}
