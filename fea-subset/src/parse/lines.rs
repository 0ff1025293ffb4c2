//! Splitting source text into one-statement lines.
//!
//! The statement engine works on "logical lines": each one is a single
//! statement, a block opener (ending in `{`), a block close (`} NAME;`) or a
//! comment. Physical layout is irrelevant; a statement may span several
//! physical lines and several statements may share one.

/// Split `text` into trimmed, non-empty logical lines.
pub(crate) fn logical_lines(text: &str) -> Vec<String> {
    let mut splitter = Splitter::default();
    for line in text.lines() {
        splitter.feed(line);
    }
    splitter.finish()
}

#[derive(Default)]
struct Splitter {
    out: Vec<String>,
    current: String,
    // depth of `[` nesting; statement separators are ignored inside classes
    brackets: usize,
    in_string: bool,
    // comments met inside an unfinished statement, emitted after it
    pending_comments: Vec<String>,
}

impl Splitter {
    fn feed(&mut self, line: &str) {
        for (i, c) in line.char_indices() {
            match c {
                '"' => {
                    self.in_string = !self.in_string;
                    self.current.push(c);
                }
                _ if self.in_string => self.current.push(c),
                // a comment runs to the end of the physical line
                '#' => {
                    let comment = line[i..].trim_end().to_string();
                    if self.current.trim().is_empty() {
                        self.out.push(comment);
                    } else {
                        self.pending_comments.push(comment);
                    }
                    break;
                }
                '[' => {
                    self.brackets += 1;
                    self.push(c);
                }
                ']' => {
                    self.brackets = self.brackets.saturating_sub(1);
                    self.push(c);
                }
                '{' | ';' if self.brackets == 0 => {
                    self.push(c);
                    self.flush();
                }
                '}' if self.brackets == 0 => {
                    self.flush();
                    self.push(c);
                }
                _ => self.push(c),
            }
        }
        self.push(' ');
    }

    // runs of whitespace outside strings collapse to a single space
    fn push(&mut self, c: char) {
        if !c.is_whitespace() {
            self.current.push(c);
        } else if !(self.current.is_empty() || self.current.ends_with(' ')) {
            self.current.push(' ');
        }
    }

    fn flush(&mut self) {
        let trimmed = self.current.trim();
        if !trimmed.is_empty() {
            self.out.push(trimmed.to_string());
        }
        self.current.clear();
        self.out.append(&mut self.pending_comments);
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn one_statement_per_line() {
        let text = "\n\tscript latn;\n\n   lookup ccmp_latn_1;\n";
        assert_eq!(logical_lines(text), vec!["script latn;", "lookup ccmp_latn_1;"]);
    }

    #[test]
    fn compact_block() {
        let text = "lookup ccmap1 { sub danda-deva danda-deva by dbldanda-deva; } ccmap1;";
        assert_eq!(
            logical_lines(text),
            vec![
                "lookup ccmap1 {",
                "sub danda-deva danda-deva by dbldanda-deva;",
                "} ccmap1;"
            ]
        );
    }

    #[test]
    fn trailing_comment_follows_code() {
        let text = "@Top = [acutecomb gravecomb];  # NoQA: E501";
        assert_eq!(
            logical_lines(text),
            vec!["@Top = [acutecomb gravecomb];", "# NoQA: E501"]
        );
    }

    #[test]
    fn comment_inside_statement_follows_it() {
        let text = "sub a # note\n    by b;\nsub c by d;";
        assert_eq!(logical_lines(text), vec!["sub a by b;", "# note", "sub c by d;"]);
    }

    #[test]
    fn class_spans_lines() {
        let text = "@Marks = [acutecomb\n    gravecomb\n    tildecomb];\nsub a by b;";
        assert_eq!(
            logical_lines(text),
            vec!["@Marks = [acutecomb gravecomb tildecomb];", "sub a by b;"]
        );
    }

    #[test]
    fn braces_in_strings_are_text() {
        let text = "name \"{odd;}\";";
        assert_eq!(logical_lines(text), vec!["name \"{odd;}\";"]);
    }
}
