//! Writing the object model back out as FEA source.

use crate::ast::Statement;

/// Types that can be written as FEA source.
pub trait WriteFea {
    /// Write `self`, indented by `depth` tabs.
    ///
    /// Blocks indent their contents one level deeper than themselves.
    fn write_fea(&self, depth: usize) -> String;
}

/// Options for [`Feature::write`](crate::Feature::write).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Write only the statements of the feature, unindented, without the
    /// surrounding `feature NAME { ... } NAME;`.
    ///
    /// This is used to splice a feature's contents into another document.
    pub omit_declaration: bool,
}

pub(crate) fn indent(depth: usize) -> String {
    "\t".repeat(depth)
}

pub(crate) fn write_statements(statements: &[Statement], depth: usize) -> String {
    statements
        .iter()
        .map(|statement| statement.write_fea(depth))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write `header {`, the statements one level deeper, then `} name;`.
pub(crate) fn write_block(header: &str, name: &str, statements: &[Statement], depth: usize) -> String {
    let tab = indent(depth);
    let body = write_statements(statements, depth + 1);
    format!("{tab}{header} {{\n{body}\n{tab}}} {name};")
}
