//! Comment and string-literal aware line segmentation.
//!
//! The [`Lexer`] splits lines into comment spans and code fragments using a
//! language's delimiter data. The line scanner, the body scan and the
//! compressor all go through it, so they agree on where comments are.
//!
//! All delimiters are ASCII, so byte offsets returned here always fall on
//! UTF-8 character boundaries.

use crate::analysis::languages::LanguageSpec;

/// Check whether the byte at `pos` is escaped: an odd number of
/// consecutive backslashes immediately precedes it.
pub fn is_escaped(bytes: &[u8], pos: usize) -> bool {
    let backslashes = bytes[..pos.min(bytes.len())]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count();
    backslashes % 2 == 1
}

/// Walk `line` outside string literals, stopping at the first offset where
/// `stop` returns true.
///
/// `delimiters` must be ordered longest first. Single-character delimiters
/// do not close on an escaped quote.
fn walk_unquoted<F>(line: &str, delimiters: &[&str], limit: usize, mut stop: F) -> Option<usize>
where
    F: FnMut(usize) -> bool,
{
    let bytes = line.as_bytes();
    let limit = limit.min(bytes.len());
    let mut open: Option<&str> = None;
    let mut i = 0;

    while i < limit {
        let rest = &bytes[i..];
        match open {
            Some(delim) => {
                if rest.starts_with(delim.as_bytes()) && (delim.len() > 1 || !is_escaped(bytes, i)) {
                    open = None;
                    i += delim.len();
                } else {
                    i += 1;
                }
            }
            None => {
                if stop(i) {
                    return Some(i);
                }
                match delimiters.iter().find(|d| rest.starts_with(d.as_bytes())) {
                    Some(&delim) => {
                        open = Some(delim);
                        i += delim.len();
                    }
                    None => i += 1,
                }
            }
        }
    }
    None
}

/// Find the first occurrence of `token` in `line` that is not inside a
/// string literal.
pub fn find_unquoted(line: &str, token: &str, delimiters: &[&str]) -> Option<usize> {
    if token.is_empty() {
        return None;
    }
    let bytes = line.as_bytes();
    let token = token.as_bytes();
    walk_unquoted(line, delimiters, bytes.len(), |i| bytes[i..].starts_with(token))
}

/// Check whether offset `pos` of `line` falls inside a string literal.
pub fn in_string_at(line: &str, pos: usize, delimiters: &[&str]) -> bool {
    // Walking up to `pos` and never stopping leaves the quote state at `pos`;
    // a quoted position is one that the walker never visits unquoted.
    let mut reached = false;
    walk_unquoted(line, delimiters, pos + 1, |i| {
        if i == pos {
            reached = true;
        }
        false
    });
    !reached && pos < line.len()
}

/// A comment found by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSpan {
    /// First line (1-indexed).
    pub line_start: usize,
    /// Last line (1-indexed).
    pub line_end: usize,
    /// Comment text per line, delimiters included. Whole-line comments keep
    /// their indentation; comments that follow code start at the opener.
    pub lines: Vec<String>,
    /// Code precedes the comment on its first line.
    pub inline: bool,
    /// Written with the block-comment delimiters.
    pub block: bool,
}

impl CommentSpan {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// A piece of a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Comment(CommentSpan),
    /// Code with comments removed. A physical line can yield several code
    /// fragments when comments split it.
    Code { line: usize, text: String },
}

/// An open block comment carried across lines.
struct OpenComment {
    line_start: usize,
    lines: Vec<String>,
    inline: bool,
}

/// Splits source lines into comments and code for one language.
pub struct Lexer<'a> {
    spec: &'a LanguageSpec,
}

impl<'a> Lexer<'a> {
    pub fn new(spec: &'a LanguageSpec) -> Self {
        Self { spec }
    }

    /// Segment `lines`, numbering them from `first_line`.
    ///
    /// Unterminated block comments at the end of input are dropped.
    pub fn segment<S: AsRef<str>>(&self, lines: &[S], first_line: usize) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut open: Option<OpenComment> = None;

        for (offset, raw) in lines.iter().enumerate() {
            let line_no = first_line + offset;
            let mut text: String = raw.as_ref().to_string();
            let mut whole_line = true;

            loop {
                if let Some(mut comment) = open.take() {
                    let Some((_, end)) = self.spec.multi_comment else {
                        break;
                    };
                    match text.find(end) {
                        Some(pos) => {
                            let close = pos + end.len();
                            comment.lines.push(text[..close].to_string());
                            segments.push(Segment::Comment(CommentSpan {
                                line_start: comment.line_start,
                                line_end: line_no,
                                lines: comment.lines,
                                inline: comment.inline,
                                block: true,
                            }));
                            let tail = text[close..].to_string();
                            if tail.trim().is_empty() {
                                break;
                            }
                            // re-examine what follows the closer as a fresh line
                            text = tail;
                            whole_line = false;
                            continue;
                        }
                        None => {
                            comment.lines.push(text.clone());
                            open = Some(comment);
                            break;
                        }
                    }
                }

                if let Some((start, end)) = self.spec.multi_comment {
                    if let Some(pos) = self.block_opener(&text, start) {
                        let before = &text[..pos];
                        let inline = !before.trim().is_empty() || !whole_line;
                        let body_from = pos + start.len();
                        let comment_text = if inline { &text[pos..] } else { text.as_str() };

                        if let Some(rel) = text[body_from..].find(end) {
                            let close = body_from + rel + end.len();
                            let shown = if inline {
                                text[pos..close].to_string()
                            } else {
                                text[..close].to_string()
                            };
                            segments.push(Segment::Comment(CommentSpan {
                                line_start: line_no,
                                line_end: line_no,
                                lines: vec![shown],
                                inline,
                                block: true,
                            }));
                            let rest = format!("{}{}", before, &text[close..]);
                            if rest.trim().is_empty() {
                                break;
                            }
                            text = rest;
                            continue;
                        }

                        if !before.trim().is_empty() {
                            segments.push(Segment::Code {
                                line: line_no,
                                text: before.to_string(),
                            });
                        }
                        open = Some(OpenComment {
                            line_start: line_no,
                            lines: vec![comment_text.to_string()],
                            inline,
                        });
                        break;
                    }
                }

                if let Some(token) = self.spec.single_comment {
                    if let Some(pos) = find_unquoted(&text, token, &self.spec.string_delimiters) {
                        let before = &text[..pos];
                        let standalone = before.trim().is_empty() && whole_line;
                        let shown = if standalone {
                            text.trim_end().to_string()
                        } else {
                            text[pos..].trim_end().to_string()
                        };
                        segments.push(Segment::Comment(CommentSpan {
                            line_start: line_no,
                            line_end: line_no,
                            lines: vec![shown],
                            inline: !standalone,
                            block: false,
                        }));
                        if !before.trim().is_empty() {
                            segments.push(Segment::Code {
                                line: line_no,
                                text: before.to_string(),
                            });
                        }
                        break;
                    }
                }

                if !text.trim().is_empty() {
                    segments.push(Segment::Code { line: line_no, text });
                }
                break;
            }
        }

        segments
    }

    /// Locate a block-comment opener outside string literals.
    ///
    /// When the opener doubles as a string delimiter (Python docstrings),
    /// only an opener with nothing but whitespace before it counts.
    fn block_opener(&self, text: &str, start: &str) -> Option<usize> {
        if self.spec.docstring_comments {
            let trimmed = text.trim_start();
            return trimmed
                .starts_with(start)
                .then(|| text.len() - trimmed.len());
        }
        find_unquoted(text, start, &self.spec.string_delimiters)
    }
}

/// Strip comment markers from a single line of comment text.
pub fn clean_comment_line(line: &str) -> String {
    const PREFIXES: &[&str] = &["///", "//!", "//", "#!", "##", "#", "--", ";;"];
    let mut text = line.trim();
    if let Some(prefix) = PREFIXES.iter().find(|p| text.starts_with(*p)) {
        text = &text[prefix.len()..];
    }
    text.trim_matches(|c: char| c.is_whitespace() || matches!(c, '/' | '*' | '"' | '\''))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::languages::language_table;

    fn segments(lang: &str, src: &str) -> Vec<Segment> {
        let spec = language_table().get(lang).unwrap();
        let lines: Vec<&str> = src.lines().collect();
        Lexer::new(spec).segment(&lines, 1)
    }

    fn comments(segs: &[Segment]) -> Vec<&CommentSpan> {
        segs.iter()
            .filter_map(|s| match s {
                Segment::Comment(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    fn code(segs: &[Segment]) -> Vec<(usize, &str)> {
        segs.iter()
            .filter_map(|s| match s {
                Segment::Code { line, text } => Some((*line, text.as_str())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_is_escaped_parity() {
        let s = br#"a\"b\\"c"#;
        assert!(is_escaped(s, 2));
        assert!(!is_escaped(s, 6));
        assert!(!is_escaped(s, 0));
    }

    #[test]
    fn test_find_unquoted_skips_strings() {
        let delims = ["\"", "'"];
        assert_eq!(find_unquoted(r#"url = "http://x" // c"#, "//", &delims), Some(17));
        assert_eq!(find_unquoted(r#"s = "a \" // b""#, "//", &delims), None);
        assert_eq!(find_unquoted(r#"s = "a \\" // b"#, "//", &delims), Some(11));
        assert_eq!(find_unquoted("x = 1", "//", &delims), None);
    }

    #[test]
    fn test_in_string_at() {
        let delims = ["\"", "'"];
        let line = r##"a = "# not" # yes"##;
        assert!(in_string_at(line, 5, &delims));
        assert!(!in_string_at(line, 12, &delims));
    }

    #[test]
    fn test_whole_line_and_inline_comments() {
        let segs = segments("python", "# header\nx = 1  # note\n");
        let cs = comments(&segs);
        assert_eq!(cs.len(), 2);
        assert!(!cs[0].inline);
        assert_eq!(cs[0].lines, vec!["# header"]);
        assert!(cs[1].inline);
        assert_eq!(cs[1].lines, vec!["# note"]);
        assert_eq!(code(&segs), vec![(2, "x = 1  ")]);
    }

    #[test]
    fn test_hash_inside_string_is_code() {
        let segs = segments("python", "s = \"# not a comment\"\n");
        assert!(comments(&segs).is_empty());
        assert_eq!(code(&segs).len(), 1);
    }

    #[test]
    fn test_block_comment_same_line_keeps_code() {
        let segs = segments("c", "int x; /**< @brief X coord. */\n");
        let cs = comments(&segs);
        assert_eq!(cs.len(), 1);
        assert!(cs[0].inline && cs[0].block);
        assert_eq!(cs[0].lines, vec!["/**< @brief X coord. */"]);
        assert_eq!(code(&segs), vec![(1, "int x; ")]);
    }

    #[test]
    fn test_multi_line_block_with_trailing_code() {
        let src = "/* start\n middle\n end */ int y;\nint z;\n";
        let segs = segments("c", src);
        let cs = comments(&segs);
        assert_eq!(cs.len(), 1);
        assert_eq!((cs[0].line_start, cs[0].line_end), (1, 3));
        assert_eq!(cs[0].lines.len(), 3);
        assert_eq!(code(&segs), vec![(3, " int y;"), (4, "int z;")]);
    }

    #[test]
    fn test_unterminated_block_is_dropped() {
        let segs = segments("c", "int a;\n/* never closed\nint b;\n");
        assert!(comments(&segs).is_empty());
        assert_eq!(code(&segs), vec![(1, "int a;")]);
    }

    #[test]
    fn test_python_docstring_only_when_leading() {
        let segs = segments("python", "    \"\"\"Doc.\n    More.\n    \"\"\"\n");
        let cs = comments(&segs);
        assert_eq!(cs.len(), 1);
        assert_eq!((cs[0].line_start, cs[0].line_end), (1, 3));

        let segs = segments("python", "x = \"\"\"value\"\"\"\n");
        assert!(comments(&segs).is_empty());
        assert_eq!(code(&segs).len(), 1);
    }

    #[test]
    fn test_single_line_docstring() {
        let segs = segments("python", "    \"\"\"One line.\"\"\"\n");
        let cs = comments(&segs);
        assert_eq!(cs.len(), 1);
        assert!(!cs[0].inline);
        assert!(code(&segs).is_empty());
    }

    #[test]
    fn test_lua_block_comment_before_single() {
        let segs = segments("lua", "--[[ block\ntext ]]\n-- line\n");
        let cs = comments(&segs);
        assert_eq!(cs.len(), 2);
        assert!(cs[0].block);
        assert!(!cs[1].block);
    }

    #[test]
    fn test_clean_comment_line() {
        assert_eq!(clean_comment_line("  // hello"), "hello");
        assert_eq!(clean_comment_line("/// docs"), "docs");
        assert_eq!(clean_comment_line("# note"), "note");
        assert_eq!(clean_comment_line("/* block */"), "block");
        assert_eq!(clean_comment_line("-- lua"), "lua");
    }
}
