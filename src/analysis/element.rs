//! Element model produced by the scanner and filled in by enrichment.

use serde::Serialize;
use std::fmt;

use super::doc::DocFields;

/// Marker line appended to extracts that were cut short.
pub const TRUNCATION_MARKER: &str = "    ...";

/// Kind of recognized construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Function,
    Method,
    Class,
    Struct,
    Enum,
    Trait,
    Interface,
    Module,
    Impl,
    Macro,
    Constant,
    Variable,
    TypeAlias,
    Import,
    Decorator,
    CommentSingle,
    CommentMulti,
    Component,
    Protocol,
    Extension,
    Union,
    Namespace,
    Property,
    Signal,
    Typedef,
}

impl ElementKind {
    /// Snake-case identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Function => "function",
            ElementKind::Method => "method",
            ElementKind::Class => "class",
            ElementKind::Struct => "struct",
            ElementKind::Enum => "enum",
            ElementKind::Trait => "trait",
            ElementKind::Interface => "interface",
            ElementKind::Module => "module",
            ElementKind::Impl => "impl",
            ElementKind::Macro => "macro",
            ElementKind::Constant => "constant",
            ElementKind::Variable => "variable",
            ElementKind::TypeAlias => "type_alias",
            ElementKind::Import => "import",
            ElementKind::Decorator => "decorator",
            ElementKind::CommentSingle => "comment_single",
            ElementKind::CommentMulti => "comment_multi",
            ElementKind::Component => "component",
            ElementKind::Protocol => "protocol",
            ElementKind::Extension => "extension",
            ElementKind::Union => "union",
            ElementKind::Namespace => "namespace",
            ElementKind::Property => "property",
            ElementKind::Signal => "signal",
            ElementKind::Typedef => "typedef",
        }
    }

    /// Upper-case label used in plain listings and search output.
    ///
    /// Both comment kinds collapse to `COMMENT`.
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Function => "FUNCTION",
            ElementKind::Method => "METHOD",
            ElementKind::Class => "CLASS",
            ElementKind::Struct => "STRUCT",
            ElementKind::Enum => "ENUM",
            ElementKind::Trait => "TRAIT",
            ElementKind::Interface => "INTERFACE",
            ElementKind::Module => "MODULE",
            ElementKind::Impl => "IMPL",
            ElementKind::Macro => "MACRO",
            ElementKind::Constant => "CONSTANT",
            ElementKind::Variable => "VARIABLE",
            ElementKind::TypeAlias => "TYPE_ALIAS",
            ElementKind::Import => "IMPORT",
            ElementKind::Decorator => "DECORATOR",
            ElementKind::CommentSingle | ElementKind::CommentMulti => "COMMENT",
            ElementKind::Component => "COMPONENT",
            ElementKind::Protocol => "PROTOCOL",
            ElementKind::Extension => "EXTENSION",
            ElementKind::Union => "UNION",
            ElementKind::Namespace => "NAMESPACE",
            ElementKind::Property => "PROPERTY",
            ElementKind::Signal => "SIGNAL",
            ElementKind::Typedef => "TYPEDEF",
        }
    }

    /// Short display tag (2-6 characters) for Markdown output.
    pub fn short_label(&self) -> &'static str {
        match self {
            ElementKind::Function => "fn",
            ElementKind::Method => "method",
            ElementKind::Class => "class",
            ElementKind::Struct => "struct",
            ElementKind::Enum => "enum",
            ElementKind::Trait => "trait",
            ElementKind::Interface => "iface",
            ElementKind::Module => "mod",
            ElementKind::Impl => "impl",
            ElementKind::Macro => "macro",
            ElementKind::Constant => "const",
            ElementKind::Variable => "var",
            ElementKind::TypeAlias => "type",
            ElementKind::Import => "import",
            ElementKind::Decorator => "dec",
            ElementKind::CommentSingle | ElementKind::CommentMulti => "cmt",
            ElementKind::Component => "comp",
            ElementKind::Protocol => "proto",
            ElementKind::Extension => "ext",
            ElementKind::Union => "union",
            ElementKind::Namespace => "ns",
            ElementKind::Property => "prop",
            ElementKind::Signal => "signal",
            ElementKind::Typedef => "tdef",
        }
    }

    /// Resolve an upper-case label back to a kind (search filters use this).
    ///
    /// `COMMENT` resolves to the single-line kind; callers that need both
    /// comment kinds should compare labels instead.
    pub fn from_label(label: &str) -> Option<ElementKind> {
        ElementKind::ALL
            .iter()
            .copied()
            .find(|k| k.label().eq_ignore_ascii_case(label))
    }

    /// Every kind, in declaration order.
    pub const ALL: [ElementKind; 25] = [
        ElementKind::Function,
        ElementKind::Method,
        ElementKind::Class,
        ElementKind::Struct,
        ElementKind::Enum,
        ElementKind::Trait,
        ElementKind::Interface,
        ElementKind::Module,
        ElementKind::Impl,
        ElementKind::Macro,
        ElementKind::Constant,
        ElementKind::Variable,
        ElementKind::TypeAlias,
        ElementKind::Import,
        ElementKind::Decorator,
        ElementKind::CommentSingle,
        ElementKind::CommentMulti,
        ElementKind::Component,
        ElementKind::Protocol,
        ElementKind::Extension,
        ElementKind::Union,
        ElementKind::Namespace,
        ElementKind::Property,
        ElementKind::Signal,
        ElementKind::Typedef,
    ];

    /// Check if this kind can hold nested constructs.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ElementKind::Class
                | ElementKind::Struct
                | ElementKind::Module
                | ElementKind::Impl
                | ElementKind::Interface
                | ElementKind::Trait
                | ElementKind::Namespace
                | ElementKind::Enum
                | ElementKind::Extension
                | ElementKind::Protocol
        )
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, ElementKind::CommentSingle | ElementKind::CommentMulti)
    }

    /// Check if constructs of this kind never span more than their own line.
    pub fn is_single_line(&self) -> bool {
        matches!(
            self,
            ElementKind::Import
                | ElementKind::Constant
                | ElementKind::Variable
                | ElementKind::Decorator
                | ElementKind::Macro
                | ElementKind::TypeAlias
                | ElementKind::Typedef
                | ElementKind::Property
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Visibility of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Internal,
    FilePrivate,
}

impl Visibility {
    /// Short code shown in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "pub",
            Visibility::Private => "priv",
            Visibility::Protected => "prot",
            Visibility::Internal => "int",
            Visibility::FilePrivate => "fpriv",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A comment found inside a construct body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyComment {
    pub line_start: usize,
    pub line_end: usize,
    /// Comment text with delimiters removed.
    pub text: String,
}

/// A control-exit statement found inside a construct body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitPoint {
    pub line: usize,
    /// The statement, trimmed.
    pub text: String,
}

/// A recognized construct or comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// What was recognized.
    pub kind: ElementKind,
    /// First line (1-indexed, inclusive).
    pub line_start: usize,
    /// Last line (1-indexed, inclusive).
    pub line_end: usize,
    /// Source text, cut to the configured line limit with [`TRUNCATION_MARKER`].
    pub extract: String,
    /// Declared identifier, when the construct has one.
    pub name: Option<String>,
    /// Declaration head on a single line, without a trailing opener or terminator.
    pub signature: Option<String>,
    pub visibility: Option<Visibility>,
    /// Name of the tightest enclosing container.
    pub parent_name: Option<String>,
    /// 0 for top-level elements, 1 for elements nested in a container.
    pub depth: usize,
    /// Base classes or implemented interfaces, as written.
    pub inherits: Option<String>,
    /// For comments: whether code precedes the comment on its first line.
    pub inline: bool,
    pub body_comments: Vec<BodyComment>,
    pub exit_points: Vec<ExitPoint>,
    /// Structured fields from the associated documentation comment.
    pub doc_fields: DocFields,
    /// Index of the language rule that produced this element.
    #[serde(skip)]
    pub rule: Option<usize>,
}

impl Element {
    /// Create an element with no enrichment data.
    pub fn new(kind: ElementKind, line_start: usize, line_end: usize, extract: String) -> Self {
        Self {
            kind,
            line_start,
            line_end,
            extract,
            name: None,
            signature: None,
            visibility: None,
            parent_name: None,
            depth: 0,
            inherits: None,
            inline: false,
            body_comments: Vec::new(),
            exit_points: Vec::new(),
            doc_fields: DocFields::new(),
            rule: None,
        }
    }

    /// First line of the extract.
    pub fn first_line(&self) -> &str {
        self.extract.lines().next().unwrap_or("")
    }

    /// Number of source lines covered.
    pub fn line_count(&self) -> usize {
        self.line_end - self.line_start + 1
    }

    /// Name if present, otherwise the trimmed first line.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.first_line().trim(),
        }
    }

    /// Location in `L<start>` / `L<start>-<end>` form.
    pub fn location(&self) -> String {
        format_location(self.line_start, self.line_end)
    }
}

/// Format a line range as `L5` or `L5-9`.
pub fn format_location(start: usize, end: usize) -> String {
    if start == end {
        format!("L{}", start)
    } else {
        format!("L{}-{}", start, end)
    }
}

/// Join `lines` into an extract, keeping at most `max_lines` lines.
///
/// When cut, the last kept slot holds [`TRUNCATION_MARKER`].
pub fn build_extract<S: AsRef<str>>(lines: &[S], max_lines: usize) -> String {
    let max_lines = max_lines.max(2);
    if lines.len() <= max_lines {
        return lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
    }
    let mut kept: Vec<&str> = lines[..max_lines - 1].iter().map(|l| l.as_ref()).collect();
    kept.push(TRUNCATION_MARKER);
    kept.join("\n")
}
