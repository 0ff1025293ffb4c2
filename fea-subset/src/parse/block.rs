//! Finding the extent of `feature` and `lookup` blocks.

use smol_str::SmolStr;

use crate::error::{BlockKind, ParseError};

/// The opening line of a named block, e.g. `lookup ccmp_1 useExtension {`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BlockHeader {
    pub(crate) kind: BlockKind,
    pub(crate) name: SmolStr,
    pub(crate) use_extension: bool,
}

impl BlockHeader {
    /// Parse `line` as a block opener, if it is one.
    pub(crate) fn parse(line: &str) -> Option<BlockHeader> {
        let body = line.strip_suffix('{')?;
        let mut words = body.split_whitespace();
        let kind = match words.next()? {
            "feature" => BlockKind::Feature,
            "lookup" => BlockKind::Lookup,
            _ => return None,
        };
        let name = words.next()?.into();
        let use_extension = words.any(|word| word == "useExtension");
        Some(BlockHeader {
            kind,
            name,
            use_extension,
        })
    }
}

// The label of any block opener: `lookup NAME {`, `table GDEF {`, `featureNames {`.
fn opener_label(line: &str) -> Option<&str> {
    let body = line.strip_suffix('{')?;
    let mut words = body.split_whitespace();
    words.next()?;
    Some(words.next().unwrap_or(""))
}

// The label of a block close: `} NAME;` or `};`.
fn close_label(line: &str) -> Option<&str> {
    line.strip_prefix('}')
        .and_then(|rest| rest.trim_end().strip_suffix(';'))
        .map(str::trim)
}

/// Return the index of the line that closes the block opened at `lines[start]`.
///
/// Every block opened along the way, of any kind, is tracked on a stack and a
/// close only matches the innermost open block with the same label. A close
/// that matches nothing is skipped.
pub(crate) fn find_block_end(
    lines: &[String],
    start: usize,
    header: &BlockHeader,
) -> Result<usize, ParseError> {
    let mut open: Vec<&str> = Vec::new();
    for (i, line) in lines.iter().enumerate().skip(start) {
        if let Some(label) = opener_label(line) {
            open.push(label);
        } else if let Some(label) = close_label(line) {
            if open.last() == Some(&label) {
                open.pop();
                if open.is_empty() {
                    return Ok(i);
                }
            }
        }
    }
    Err(ParseError::UnmatchedBlock {
        kind: header.kind,
        name: header.name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case::lookup("lookup ccmap1 {", BlockKind::Lookup, "ccmap1", false)]
    #[case::feature("feature ccmp {", BlockKind::Feature, "ccmp", false)]
    #[case::extension("lookup big useExtension {", BlockKind::Lookup, "big", true)]
    fn parse_header(
        #[case] line: &str,
        #[case] kind: BlockKind,
        #[case] name: &str,
        #[case] use_extension: bool,
    ) {
        let header = BlockHeader::parse(line).unwrap();
        assert_eq!(header.kind, kind);
        assert_eq!(header.name, name);
        assert_eq!(header.use_extension, use_extension);
    }

    #[rstest]
    #[case::reference("lookup ccmap1;")]
    #[case::other_block("featureNames {")]
    #[case::no_name("lookup {")]
    fn not_a_header(#[case] line: &str) {
        assert_eq!(BlockHeader::parse(line), None);
    }

    #[test]
    fn finds_close() {
        let src = lines(&["lookup a {", "sub x by y;", "} a;", "lookup a;"]);
        let header = BlockHeader::parse(&src[0]).unwrap();
        assert_eq!(find_block_end(&src, 0, &header), Ok(2));
    }

    #[test]
    fn close_name_must_match_exactly() {
        let src = lines(&["lookup a {", "sub x by y;", "} ab;", "}a ;"]);
        let header = BlockHeader::parse(&src[0]).unwrap();
        assert_eq!(find_block_end(&src, 0, &header), Ok(3));
    }

    #[test]
    fn nested_same_name_is_balanced() {
        let src = lines(&["feature f {", "feature f {", "} f;", "sub a by b;", "} f;"]);
        let header = BlockHeader::parse(&src[0]).unwrap();
        assert_eq!(find_block_end(&src, 0, &header), Ok(4));
    }

    #[test]
    fn lookup_named_like_its_feature() {
        let src = lines(&[
            "feature liga {",
            "lookup liga {",
            "sub f i by f_i;",
            "} liga;",
            "} liga;",
        ]);
        let header = BlockHeader::parse(&src[0]).unwrap();
        assert_eq!(find_block_end(&src, 0, &header), Ok(4));
        let header = BlockHeader::parse(&src[1]).unwrap();
        assert_eq!(find_block_end(&src, 1, &header), Ok(3));
    }

    #[test]
    fn other_blocks_are_skipped() {
        let src = lines(&[
            "feature ss01 {",
            "featureNames {",
            "name \"Alternate a\";",
            "};",
            "sub a by a.ss01;",
            "} ss01;",
        ]);
        let header = BlockHeader::parse(&src[0]).unwrap();
        assert_eq!(find_block_end(&src, 0, &header), Ok(5));
    }

    #[test]
    fn unmatched() {
        let src = lines(&["lookup a {", "sub x by y;", "} b;"]);
        let header = BlockHeader::parse(&src[0]).unwrap();
        assert_eq!(
            find_block_end(&src, 0, &header),
            Err(ParseError::UnmatchedBlock {
                kind: BlockKind::Lookup,
                name: "a".into()
            })
        );
    }
}
