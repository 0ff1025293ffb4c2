//! Error types related to parsing

use std::fmt::{Display, Formatter};

use smol_str::SmolStr;

/// The kind of block a structural error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Feature,
    Lookup,
}

/// An unrecoverable error that occurs during parsing.
///
/// This is in contrast with statements that do not match the expected
/// pattern for their kind; those are kept in the tree as-is and are only
/// reported through the log.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A block was opened but never closed.
    #[error("no matching '}} {name};' for {kind} '{name}'")]
    UnmatchedBlock { kind: BlockKind, name: SmolStr },
    /// The source did not contain a `feature NAME {` header.
    #[error("could not find a feature name in the source")]
    MissingFeatureName,
    /// The source did not start with a `lookup NAME {` header.
    #[error("could not find a lookup name in the source")]
    MissingLookupName,
    /// A lookup block was opened inside another lookup block.
    #[error("lookup '{inner}' cannot be defined inside lookup '{outer}'")]
    NestedLookup { outer: SmolStr, inner: SmolStr },
}

impl Display for BlockKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockKind::Feature => f.write_str("feature"),
            BlockKind::Lookup => f.write_str("lookup"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assert_parse_error_is_send() {
        fn send_me_baby<T: Send + Sync>() {}
        send_me_baby::<ParseError>();
    }

    #[test]
    fn unmatched_names_the_block() {
        let err = ParseError::UnmatchedBlock {
            kind: BlockKind::Lookup,
            name: "ccmp_latn_1".into(),
        };
        assert_eq!(
            err.to_string(),
            "no matching '} ccmp_latn_1;' for lookup 'ccmp_latn_1'"
        );
    }
}
