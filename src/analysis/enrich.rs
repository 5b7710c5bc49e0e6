//! Enrichment passes over a scanned element list.
//!
//! Passes run in a fixed order and only ever fill in attributes: no element
//! is added, removed or moved. Running the pipeline twice gives the same
//! result as running it once.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::doc::parse_doc_comment;
use crate::analysis::element::{BodyComment, Element, ElementKind, ExitPoint, Visibility};
use crate::analysis::languages::{most_specific_group, InheritanceStyle, LanguageSpec, VisibilityStyle};
use crate::analysis::lexer::{clean_comment_line, Lexer, Segment};
use crate::config::AnalyzerConfig;

lazy_static! {
    /// Explicit control exits.
    static ref EXIT_STATEMENT: Regex =
        Regex::new(r"^\s*(return\b.*|yield\b.*|raise\b.*|throw\b.*|panic!\(.*)").unwrap();

    /// Process termination calls.
    static ref PROCESS_EXIT: Regex =
        Regex::new(r"^\s*(sys\.exit\(.*|os\._exit\(.*|exit\(.*|process\.exit\(.*)").unwrap();

    /// Comment opener that documents the code before it (`//!<`, `/**<`, `#<`).
    static ref POSTFIX_MARKER: Regex = Regex::new(r"^\s*(?:#|//+|--|/\*+|;+)!?<").unwrap();

    static ref ACCESS_KEYWORD: Regex =
        Regex::new(r"\b(public|private|protected|internal)\b").unwrap();
    static ref PUB_KEYWORD: Regex = Regex::new(r"^\s*pub\b").unwrap();
    static ref SWIFT_ACCESS: Regex =
        Regex::new(r"\b(fileprivate|private|public|open|internal)\b").unwrap();

    static ref PAREN_BASES: Regex = Regex::new(r"class\s+\w+\s*\(([^)]+)\)").unwrap();
    static ref EXTENDS_CLAUSE: Regex =
        Regex::new(r"\bextends\s+([\w.<>, ]+?)\s*(?:\bimplements\b|\{|$)").unwrap();
    static ref IMPLEMENTS_CLAUSE: Regex =
        Regex::new(r"\bimplements\s+([\w.<>, ]+?)\s*(?:\{|$)").unwrap();
    static ref COLON_BASES: Regex =
        Regex::new(r"(?:class|struct|interface)\s+\w+\s*:\s*(.+?)(?:\s*\{|$)").unwrap();
    static ref KOTLIN_BASES: Regex =
        Regex::new(r"(?:class|interface)\s+\w+\s*(?:\([^)]*\))?\s*:\s*(.+?)(?:\s*\{|$)").unwrap();
    static ref RUBY_BASE: Regex = Regex::new(r"class\s+\w+\s*<\s*([\w:]+)").unwrap();
}

/// Comment data gathered before the documentation pass mutates elements.
struct CommentRef {
    line_start: usize,
    line_end: usize,
    inline: bool,
    postfix: bool,
    text: String,
}

/// Runs the enrichment pipeline for one language.
pub struct Enricher<'a> {
    spec: &'a LanguageSpec,
    doc_gap: usize,
}

impl<'a> Enricher<'a> {
    pub fn new(spec: &'a LanguageSpec, config: &AnalyzerConfig) -> Self {
        Self {
            spec,
            doc_gap: config.doc_gap,
        }
    }

    /// Run every pass. Body and documentation passes need the source lines
    /// and are skipped without them.
    pub fn run<S: AsRef<str>>(&self, elements: &mut [Element], source: Option<&[S]>) {
        self.clean_names(elements);
        self.extract_signatures(elements);
        self.detect_hierarchy(elements);
        self.extract_visibility(elements);
        self.extract_inheritance(elements);
        if let Some(lines) = source {
            self.scan_bodies(elements, lines);
            self.associate_docs(elements, lines);
        }
    }

    /// Re-derive each construct name from its extract's first line.
    pub fn clean_names(&self, elements: &mut [Element]) {
        for elem in elements.iter_mut().filter(|e| !e.kind.is_comment()) {
            let first = elem.first_line().to_string();
            let originating = elem.rule.and_then(|idx| self.spec.rules.get(idx));
            let same_kind = self.spec.rules.iter().filter(|r| r.kind == elem.kind);

            let name = originating
                .into_iter()
                .chain(same_kind)
                .find_map(|rule| rule.pattern.captures(&first))
                .and_then(|caps| most_specific_group(&caps));
            if name.is_some() {
                elem.name = name;
            }
        }
    }

    /// Derive a one-line signature with any trailing opener removed.
    pub fn extract_signatures(&self, elements: &mut [Element]) {
        for elem in elements.iter_mut() {
            if elem.kind.is_comment()
                || matches!(elem.kind, ElementKind::Import | ElementKind::Decorator)
            {
                continue;
            }
            elem.signature = Some(normalize_signature(elem.first_line()));
        }
    }

    /// Attach non-container elements to their tightest enclosing container.
    pub fn detect_hierarchy(&self, elements: &mut [Element]) {
        let containers: Vec<(usize, usize, String)> = elements
            .iter()
            .filter(|e| e.kind.is_container())
            .map(|e| (e.line_start, e.line_end, e.display_name().to_string()))
            .collect();

        for elem in elements.iter_mut() {
            if elem.kind.is_container() {
                elem.depth = 0;
                elem.parent_name = None;
                continue;
            }
            if elem.kind.is_comment() || elem.kind == ElementKind::Import {
                continue;
            }
            let parent = containers
                .iter()
                .filter(|(start, end, _)| *start <= elem.line_start && elem.line_end <= *end)
                .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
            match parent {
                Some((_, _, name)) => {
                    elem.parent_name = Some(name.clone());
                    elem.depth = 1;
                }
                None => {
                    elem.parent_name = None;
                    elem.depth = 0;
                }
            }
        }
    }

    pub fn extract_visibility(&self, elements: &mut [Element]) {
        for elem in elements.iter_mut() {
            if elem.kind.is_comment() || elem.kind == ElementKind::Import {
                continue;
            }
            elem.visibility = visibility_of(self.spec.visibility, elem);
        }
    }

    pub fn extract_inheritance(&self, elements: &mut [Element]) {
        for elem in elements.iter_mut() {
            if !matches!(
                elem.kind,
                ElementKind::Class | ElementKind::Struct | ElementKind::Interface
            ) {
                continue;
            }
            elem.inherits = inheritance_of(self.spec.inheritance, elem.first_line());
        }
    }

    /// Collect comments and exit statements inside each block body.
    pub fn scan_bodies<S: AsRef<str>>(&self, elements: &mut [Element], lines: &[S]) {
        let lexer = Lexer::new(self.spec);
        for elem in elements.iter_mut() {
            if elem.kind.is_comment() || elem.kind.is_single_line() {
                continue;
            }
            elem.body_comments.clear();
            elem.exit_points.clear();
            if elem.line_end <= elem.line_start {
                continue;
            }

            let body_end = elem.line_end.min(lines.len());
            if elem.line_start >= body_end {
                continue;
            }
            // body starts on the line after the declaration
            let body = &lines[elem.line_start..body_end];
            for segment in lexer.segment(body, elem.line_start + 1) {
                match segment {
                    Segment::Comment(span) => {
                        let text = span
                            .lines
                            .iter()
                            .map(|l| clean_comment_line(l))
                            .filter(|l| !l.is_empty())
                            .collect::<Vec<_>>()
                            .join(" ");
                        if !text.is_empty() {
                            elem.body_comments.push(BodyComment {
                                line_start: span.line_start,
                                line_end: span.line_end,
                                text,
                            });
                        }
                    }
                    Segment::Code { line, text } => {
                        let caps = EXIT_STATEMENT
                            .captures(&text)
                            .or_else(|| PROCESS_EXIT.captures(&text));
                        if let Some(stmt) = caps.and_then(|c| c.get(1)) {
                            elem.exit_points.push(ExitPoint {
                                line,
                                text: stmt.as_str().trim().to_string(),
                            });
                        }
                    }
                }
            }
        }
    }

    /// Resolve the documentation comment of each construct and parse it.
    pub fn associate_docs<S: AsRef<str>>(&self, elements: &mut [Element], lines: &[S]) {
        let comments: Vec<CommentRef> = elements
            .iter()
            .filter(|e| e.kind.is_comment())
            .map(|c| {
                let text = if c.inline {
                    c.extract.clone()
                } else {
                    full_text(lines, c.line_start, c.line_end)
                };
                CommentRef {
                    line_start: c.line_start,
                    line_end: c.line_end,
                    inline: c.inline,
                    postfix: POSTFIX_MARKER.is_match(&text.trim_start()),
                    text,
                }
            })
            .collect();

        for elem in elements.iter_mut().filter(|e| !e.kind.is_comment()) {
            let doc = self.owning_comment(elem, &comments);
            elem.doc_fields = doc.map(|c| parse_doc_comment(&c.text)).unwrap_or_default();
        }
    }

    fn owning_comment<'c>(&self, elem: &Element, comments: &'c [CommentRef]) -> Option<&'c CommentRef> {
        let same_line = comments.iter().find(|c| {
            c.inline
                && c.postfix
                && (c.line_start == elem.line_start || c.line_start == elem.line_end)
        });
        if same_line.is_some() {
            return same_line;
        }

        let preceding = comments
            .iter()
            .filter(|c| {
                !c.inline
                    && !c.postfix
                    && c.line_end < elem.line_start
                    && elem.line_start - c.line_end <= self.doc_gap
            })
            .max_by(|a, b| a.line_end.cmp(&b.line_end).then(a.line_start.cmp(&b.line_start)));
        if preceding.is_some() {
            return preceding;
        }

        comments
            .iter()
            .filter(|c| {
                !c.inline
                    && c.postfix
                    && c.line_start > elem.line_end
                    && c.line_start - elem.line_end <= self.doc_gap
            })
            .min_by(|a, b| a.line_start.cmp(&b.line_start).then(a.line_end.cmp(&b.line_end)))
    }
}

/// Strip one trailing `{`, `:` or `;` from a declaration head.
///
/// A trailing `::` is a scope operator and is kept.
pub fn normalize_signature(first_line: &str) -> String {
    let line = first_line.trim();
    if line.ends_with("::") {
        return line.to_string();
    }
    let stripped = [" {", "{", ":", ";"]
        .iter()
        .find_map(|suffix| line.strip_suffix(suffix))
        .unwrap_or(line);
    stripped.trim_end().to_string()
}

fn visibility_of(style: VisibilityStyle, elem: &Element) -> Option<Visibility> {
    let first = elem.first_line();
    match style {
        VisibilityStyle::Underscore => {
            let name = elem.name.as_deref()?;
            if name.starts_with("__") && name.ends_with("__") && name.len() > 4 {
                Some(Visibility::Public)
            } else if name.starts_with('_') {
                Some(Visibility::Private)
            } else {
                Some(Visibility::Public)
            }
        }
        VisibilityStyle::AccessKeywords => {
            ACCESS_KEYWORD
                .captures(first)
                .and_then(|c| c.get(1))
                .map(|m| match m.as_str() {
                    "public" => Visibility::Public,
                    "private" => Visibility::Private,
                    "protected" => Visibility::Protected,
                    _ => Visibility::Internal,
                })
        }
        VisibilityStyle::Capitalized => {
            let name = elem.name.as_deref()?;
            let first_char = name.chars().next()?;
            if first_char.is_uppercase() {
                Some(Visibility::Public)
            } else {
                Some(Visibility::Private)
            }
        }
        VisibilityStyle::PubKeyword => {
            if PUB_KEYWORD.is_match(first) {
                Some(Visibility::Public)
            } else {
                Some(Visibility::Private)
            }
        }
        VisibilityStyle::Swift => SWIFT_ACCESS
            .captures(first)
            .and_then(|c| c.get(1))
            .map(|m| match m.as_str() {
                "fileprivate" => Visibility::FilePrivate,
                "private" => Visibility::Private,
                "internal" => Visibility::Internal,
                _ => Visibility::Public,
            }),
        VisibilityStyle::None => None,
    }
}

fn inheritance_of(style: InheritanceStyle, first: &str) -> Option<String> {
    let capture = |re: &Regex| {
        re.captures(first)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    };
    match style {
        InheritanceStyle::Parenthesized => capture(&*PAREN_BASES),
        InheritanceStyle::ExtendsImplements => {
            let parts: Vec<String> = [capture(&*EXTENDS_CLAUSE), capture(&*IMPLEMENTS_CLAUSE)]
                .into_iter()
                .flatten()
                .collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        InheritanceStyle::Colon => capture(&*COLON_BASES),
        InheritanceStyle::KotlinColon => capture(&*KOTLIN_BASES),
        InheritanceStyle::LessThan => capture(&*RUBY_BASE),
        InheritanceStyle::None => None,
    }
}

fn full_text<S: AsRef<str>>(lines: &[S], start: usize, end: usize) -> String {
    let end = end.min(lines.len());
    if start == 0 || start > end {
        return String::new();
    }
    lines[start - 1..end]
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}
