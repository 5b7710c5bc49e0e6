//! Block extent resolution.
//!
//! Finds the last line of a block-bearing construct with brace counting,
//! indentation tracking or terminator keywords. None of this is parsing:
//! braces inside strings and mixed tabs/spaces will throw it off.

use crate::analysis::languages::BlockStyle;
use crate::config::AnalyzerConfig;

/// Lookahead caps for each strategy, in lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLimits {
    pub indentation: usize,
    pub braces: usize,
    pub terminator: usize,
}

impl Default for BlockLimits {
    fn default() -> Self {
        Self {
            indentation: 200,
            braces: 300,
            terminator: 200,
        }
    }
}

impl From<&AnalyzerConfig> for BlockLimits {
    fn from(config: &AnalyzerConfig) -> Self {
        Self {
            indentation: config.indent_lookahead,
            braces: config.brace_lookahead,
            terminator: config.terminator_lookahead,
        }
    }
}

/// Width of the leading whitespace of `line`, in characters.
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Resolves where blocks end for one language.
#[derive(Debug, Clone, Copy)]
pub struct BlockResolver {
    style: BlockStyle,
    limits: BlockLimits,
}

impl BlockResolver {
    pub fn new(style: BlockStyle, limits: BlockLimits) -> Self {
        Self { style, limits }
    }

    /// Return the 1-indexed inclusive end line of the construct declared on
    /// `lines[start]`.
    ///
    /// `head` is the declaration text as matched, which differs from
    /// `lines[start]` when a comment preceded it on the same line.
    pub fn find_end<S: AsRef<str>>(&self, lines: &[S], start: usize, head: &str) -> usize {
        if start >= lines.len() {
            return lines.len().max(1);
        }
        match self.style {
            BlockStyle::Indentation => self.indentation_end(lines, start, head),
            BlockStyle::Braces => self.brace_end(lines, start, head),
            BlockStyle::Terminator(keyword) => self.terminator_end(lines, start, head, keyword),
            BlockStyle::Unknown => start + 1,
        }
    }

    fn indentation_end<S: AsRef<str>>(&self, lines: &[S], start: usize, head: &str) -> usize {
        let indent = indent_width(head);
        let cap = (start + self.limits.indentation).min(lines.len());
        let mut end = start + 1;
        while end < cap {
            let line = lines[end].as_ref();
            if !line.trim().is_empty() && indent_width(line) <= indent {
                break;
            }
            end += 1;
        }
        end.max(start + 1)
    }

    fn brace_end<S: AsRef<str>>(&self, lines: &[S], start: usize, head: &str) -> usize {
        let cap = (start + self.limits.braces).min(lines.len());
        let mut depth: i64 = 0;
        let mut opened = false;

        for idx in start..cap {
            let line = if idx == start { head } else { lines[idx].as_ref() };
            for ch in line.chars() {
                match ch {
                    '{' => {
                        depth += 1;
                        opened = true;
                    }
                    '}' => depth -= 1,
                    _ => {}
                }
            }
            if opened && depth <= 0 {
                return idx + 1;
            }
            if !opened {
                // forward declarations and bodiless heads stop the search
                let trimmed = line.trim_end();
                if trimmed.ends_with(';') || (idx > start && trimmed.is_empty()) {
                    return start + 1;
                }
            }
        }

        if opened {
            cap.max(start + 1)
        } else {
            start + 1
        }
    }

    fn terminator_end<S: AsRef<str>>(
        &self,
        lines: &[S],
        start: usize,
        head: &str,
        keyword: &str,
    ) -> usize {
        let is_terminator = |text: &str| {
            text.strip_prefix(keyword)
                .map_or(false, |rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        };

        // `def greet; puts "hi"; end`
        let head_trimmed = head.trim_end();
        if head_trimmed
            .rsplit(|c: char| c.is_whitespace() || c == ';')
            .next()
            .map_or(false, |last| last == keyword)
            && head_trimmed.len() > keyword.len()
        {
            return start + 1;
        }

        let indent = indent_width(head);
        let cap = (start + self.limits.terminator).min(lines.len());
        for idx in start + 1..cap {
            let line = lines[idx].as_ref();
            if is_terminator(line.trim()) && indent_width(line) <= indent {
                return idx + 1;
            }
        }
        (start + 2).min(lines.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(style: BlockStyle) -> BlockResolver {
        BlockResolver::new(style, BlockLimits::default())
    }

    fn end_of(style: BlockStyle, src: &str, start: usize) -> usize {
        let lines: Vec<&str> = src.lines().collect();
        resolver(style).find_end(&lines, start, lines[start])
    }

    #[test]
    fn test_braces_multi_line() {
        let src = "void f() {\n  if (x) {\n    y();\n  }\n}\nint z;";
        assert_eq!(end_of(BlockStyle::Braces, src, 0), 5);
    }

    #[test]
    fn test_braces_same_line() {
        assert_eq!(end_of(BlockStyle::Braces, "void hello() {}", 0), 1);
    }

    #[test]
    fn test_braces_forward_declaration() {
        let src = "void f();\nvoid g() {\n}\n";
        assert_eq!(end_of(BlockStyle::Braces, src, 0), 1);
    }

    #[test]
    fn test_braces_knr_style() {
        let src = "int main(void)\n{\n  return 0;\n}\n";
        assert_eq!(end_of(BlockStyle::Braces, src, 0), 4);
    }

    #[test]
    fn test_braces_blank_line_before_brace() {
        let src = "class Foo(val x: Int)\n\nclass Bar {\n}\n";
        assert_eq!(end_of(BlockStyle::Braces, src, 0), 1);
    }

    #[test]
    fn test_braces_cap() {
        let mut src = String::from("fn f() {\n");
        for _ in 0..10 {
            src.push_str("  x();\n");
        }
        let lines: Vec<&str> = src.lines().collect();
        let limits = BlockLimits {
            braces: 4,
            ..BlockLimits::default()
        };
        let end = BlockResolver::new(BlockStyle::Braces, limits).find_end(&lines, 0, lines[0]);
        assert_eq!(end, 4);
    }

    #[test]
    fn test_indentation() {
        let src = "def f():\n    a = 1\n\n    return a\n\ndef g():\n    pass\n";
        assert_eq!(end_of(BlockStyle::Indentation, src, 0), 5);
        assert_eq!(end_of(BlockStyle::Indentation, src, 5), 7);
    }

    #[test]
    fn test_indentation_last_line() {
        assert_eq!(end_of(BlockStyle::Indentation, "x = 1\ndef f(): pass", 1), 2);
    }

    #[test]
    fn test_terminator() {
        let src = "class Foo\n  def bar\n    1\n  end\nend\n";
        assert_eq!(end_of(BlockStyle::Terminator("end"), src, 0), 5);
        assert_eq!(end_of(BlockStyle::Terminator("end"), src, 1), 4);
    }

    #[test]
    fn test_terminator_missing_defaults_to_next_line() {
        let src = "def foo\n  1\n  2\n";
        assert_eq!(end_of(BlockStyle::Terminator("end"), src, 0), 2);
        assert_eq!(end_of(BlockStyle::Terminator("end"), "def foo", 0), 1);
    }

    #[test]
    fn test_terminator_one_liner() {
        let src = "def greet; puts 'hi'; end\ndef other\nend\n";
        assert_eq!(end_of(BlockStyle::Terminator("end"), src, 0), 1);
    }

    #[test]
    fn test_unknown_style() {
        assert_eq!(end_of(BlockStyle::Unknown, "f() {\n}\n", 0), 1);
    }
}
