//! Single-pass line scanner producing raw elements.

use crate::analysis::blocks::{BlockLimits, BlockResolver};
use crate::analysis::element::{build_extract, Element, ElementKind};
use crate::analysis::languages::{most_specific_group, LanguageSpec};
use crate::analysis::lexer::{CommentSpan, Lexer, Segment};
use crate::config::AnalyzerConfig;

/// Turns source lines into an ordered list of comment and construct elements.
pub struct LineScanner<'a> {
    spec: &'a LanguageSpec,
    resolver: BlockResolver,
    max_extract_lines: usize,
}

impl<'a> LineScanner<'a> {
    pub fn new(spec: &'a LanguageSpec, config: &AnalyzerConfig) -> Self {
        Self {
            spec,
            resolver: BlockResolver::new(spec.block_style, BlockLimits::from(config)),
            max_extract_lines: config.max_extract_lines,
        }
    }

    /// Scan `lines`, returning elements sorted by start line.
    pub fn scan<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Element> {
        let mut elements = Vec::new();

        for segment in Lexer::new(self.spec).segment(lines, 1) {
            match segment {
                Segment::Comment(span) => elements.push(self.comment_element(span)),
                Segment::Code { line, text } => {
                    if let Some(elem) = self.match_construct(lines, line, &text) {
                        elements.push(elem);
                    }
                }
            }
        }

        elements.sort_by_key(|e| e.line_start);
        elements
    }

    fn comment_element(&self, span: CommentSpan) -> Element {
        let kind = if span.block {
            ElementKind::CommentMulti
        } else {
            ElementKind::CommentSingle
        };
        let mut elem = Element::new(
            kind,
            span.line_start,
            span.line_end,
            build_extract(&span.lines, self.max_extract_lines),
        );
        elem.inline = span.inline;
        elem
    }

    /// Try each rule against the code on `line_no`; the first match wins.
    fn match_construct<S: AsRef<str>>(
        &self,
        lines: &[S],
        line_no: usize,
        code: &str,
    ) -> Option<Element> {
        let (rule_idx, caps) = self.spec.match_line(code)?;
        let kind = self.spec.rules[rule_idx].kind;
        let name = most_specific_group(&caps);

        let start = line_no - 1;
        let line_end = if kind.is_single_line() {
            line_no
        } else {
            self.resolver
                .find_end(lines, start, code)
                .clamp(line_no, lines.len())
        };

        // the matched code stands in for the first physical line so that a
        // comment sharing the line does not leak into the extract
        let mut extract_lines: Vec<&str> = Vec::with_capacity(line_end - start);
        extract_lines.push(code.trim_end());
        extract_lines.extend(lines[line_no..line_end].iter().map(|l| l.as_ref()));

        let mut elem = Element::new(
            kind,
            line_no,
            line_end,
            build_extract(&extract_lines, self.max_extract_lines),
        );
        elem.name = name;
        elem.rule = Some(rule_idx);
        Some(elem)
    }
}
