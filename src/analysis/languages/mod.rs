//! Per-language rule tables.
//!
//! Each language lives in its own module and returns a [`LanguageSpec`]:
//! comment and string delimiters plus an ordered list of recognition rules.
//! The table is built once and shared process-wide; alias keys point at the
//! same `Arc` as their canonical key, so identity comparison
//! ([`Arc::ptr_eq`]) is how callers tell languages apart.
//!
//! # Adding a New Language
//!
//! 1. Create a module in `src/analysis/languages/` exposing `fn spec()`
//! 2. Declare comment/string delimiters and the rule list, most specific first
//! 3. Pick the block, visibility and inheritance styles
//! 4. Add it to [`build_language_specs`] and, if it has file extensions,
//!    to [`language_for_extension`]

mod c;
mod cpp;
mod csharp;
mod elixir;
mod go;
mod haskell;
mod java;
mod javascript;
mod kotlin;
mod lua;
mod perl;
mod php;
mod python;
mod ruby;
mod rust_lang;
mod scala;
mod shell;
mod swift;
mod typescript;
mod zig;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::analysis::ElementKind;
use crate::error::AnalyzerError;

/// Default string delimiters for languages that do not declare their own.
const DEFAULT_STRING_DELIMITERS: &[&str] = &["\"", "'"];

/// How the end line of a block-bearing construct is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    /// Block ends before the first line indented at or left of the declaration.
    Indentation,
    /// Block ends where `{` / `}` counting returns to zero.
    Braces,
    /// Block ends at a line starting with the given keyword (e.g. `end`).
    Terminator(&'static str),
    /// Constructs are treated as single-line.
    Unknown,
}

/// How declaration visibility is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityStyle {
    /// Leading underscore marks private names.
    Underscore,
    /// `public` / `private` / `protected` / `internal` keywords.
    AccessKeywords,
    /// Capitalized names are exported.
    Capitalized,
    /// A leading `pub` keyword; everything else is private.
    PubKeyword,
    /// Swift access levels, including `fileprivate` and `open`.
    Swift,
    None,
}

/// How a class/struct/interface inheritance clause is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InheritanceStyle {
    /// `class Name(Base, Mixin)`
    Parenthesized,
    /// `extends X` and `implements Y`
    ExtendsImplements,
    /// `class Name : Base`
    Colon,
    /// `class Name(ctor) : Base`
    KotlinColon,
    /// `class Name < Base`
    LessThan,
    None,
}

/// A recognition rule: lines matching `pattern` are constructs of `kind`.
///
/// Group 1 captures the declaration head; later groups capture the name.
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: ElementKind,
    pub pattern: Regex,
}

/// Declarative description of one language.
#[derive(Debug)]
pub struct LanguageSpec {
    /// Canonical key, e.g. `python`.
    pub name: &'static str,
    /// Human-readable name, e.g. `Python`.
    pub title: &'static str,
    /// Short keys resolving to this spec.
    pub aliases: &'static [&'static str],
    pub single_comment: Option<&'static str>,
    /// Block comment opener and closer.
    pub multi_comment: Option<(&'static str, &'static str)>,
    /// String delimiters, longest first.
    pub string_delimiters: Vec<&'static str>,
    /// Rules in match order; the first match wins.
    pub rules: Vec<Rule>,
    pub block_style: BlockStyle,
    pub visibility: VisibilityStyle,
    pub inheritance: InheritanceStyle,
    /// Leading indentation carries meaning and must survive compression.
    pub indent_significant: bool,
    /// The block-comment opener doubles as a string delimiter, so it only
    /// opens a comment when nothing but whitespace precedes it.
    pub docstring_comments: bool,
}

impl LanguageSpec {
    fn new(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            title,
            aliases: &[],
            single_comment: None,
            multi_comment: None,
            string_delimiters: DEFAULT_STRING_DELIMITERS.to_vec(),
            rules: Vec::new(),
            block_style: BlockStyle::Unknown,
            visibility: VisibilityStyle::None,
            inheritance: InheritanceStyle::None,
            indent_significant: false,
            docstring_comments: false,
        }
    }

    fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    fn single_comment(mut self, token: &'static str) -> Self {
        self.single_comment = Some(token);
        self
    }

    fn multi_comment(mut self, start: &'static str, end: &'static str) -> Self {
        self.multi_comment = Some((start, end));
        self
    }

    fn strings(mut self, delimiters: &[&'static str]) -> Self {
        let mut delimiters = delimiters.to_vec();
        delimiters.sort_by(|a, b| b.len().cmp(&a.len()));
        self.string_delimiters = delimiters;
        self
    }

    fn blocks(mut self, style: BlockStyle) -> Self {
        self.block_style = style;
        self
    }

    fn visibility(mut self, style: VisibilityStyle) -> Self {
        self.visibility = style;
        self
    }

    fn inheritance(mut self, style: InheritanceStyle) -> Self {
        self.inheritance = style;
        self
    }

    fn indent_significant(mut self) -> Self {
        self.indent_significant = true;
        self
    }

    fn docstring_comments(mut self) -> Self {
        self.docstring_comments = true;
        self
    }

    fn rule(mut self, kind: ElementKind, pattern: &str) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid {} rule {:?}: {}", self.name, pattern, e));
        self.rules.push(Rule { kind, pattern });
        self
    }

    /// Find the first rule matching `line`.
    pub fn match_line<'t>(&self, line: &'t str) -> Option<(usize, regex::Captures<'t>)> {
        self.rules
            .iter()
            .enumerate()
            .find_map(|(idx, rule)| rule.pattern.captures(line).map(|caps| (idx, caps)))
    }

    /// Construct kinds this language can produce, by upper-case label.
    pub fn supported_labels(&self) -> BTreeSet<&'static str> {
        let mut labels: BTreeSet<&'static str> =
            self.rules.iter().map(|r| r.kind.label()).collect();
        if self.single_comment.is_some() || self.multi_comment.is_some() {
            labels.insert(ElementKind::CommentSingle.label());
        }
        labels
    }
}

/// Pick the most specific non-empty capture: the highest-numbered group
/// that participated and is not blank.
pub fn most_specific_group(caps: &regex::Captures<'_>) -> Option<String> {
    (1..caps.len())
        .rev()
        .filter_map(|i| caps.get(i))
        .map(|m| m.as_str().trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Immutable mapping from every language key (canonical and alias) to its spec.
#[derive(Debug)]
pub struct LanguageTable {
    specs: HashMap<&'static str, Arc<LanguageSpec>>,
}

impl LanguageTable {
    /// Look up a key after normalization (trim, lower-case, leading dot removed).
    pub fn get(&self, key: &str) -> Option<&Arc<LanguageSpec>> {
        self.specs.get(normalize_key(key).as_str())
    }

    /// Look up a key, failing with the list of supported languages.
    pub fn resolve(&self, key: &str) -> Result<Arc<LanguageSpec>, AnalyzerError> {
        self.get(key)
            .cloned()
            .ok_or_else(|| AnalyzerError::UnsupportedLanguage {
                language: key.to_string(),
                supported: self
                    .canonical_keys()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
    }

    /// Every registered key, aliases included, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.keys().copied()
    }

    /// Canonical keys of the distinct languages, sorted.
    ///
    /// Aliases are folded by spec identity, not by comparing contents.
    pub fn canonical_keys(&self) -> Vec<&'static str> {
        let mut seen: HashSet<*const LanguageSpec> = HashSet::new();
        let mut keys: Vec<&'static str> = self
            .specs
            .values()
            .filter(|spec| seen.insert(Arc::as_ptr(spec)))
            .map(|spec| spec.name)
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Distinct specs in canonical key order.
    pub fn languages(&self) -> Vec<Arc<LanguageSpec>> {
        self.canonical_keys()
            .into_iter()
            .filter_map(|key| self.specs.get(key).cloned())
            .collect()
    }
}

/// Build the language table. Prefer [`language_table`], which caches it.
pub fn build_language_specs() -> LanguageTable {
    let canonical = vec![
        python::spec(),
        c::spec(),
        cpp::spec(),
        rust_lang::spec(),
        javascript::spec(),
        typescript::spec(),
        java::spec(),
        go::spec(),
        ruby::spec(),
        php::spec(),
        swift::spec(),
        kotlin::spec(),
        scala::spec(),
        lua::spec(),
        shell::spec(),
        perl::spec(),
        haskell::spec(),
        zig::spec(),
        elixir::spec(),
        csharp::spec(),
    ];

    let mut specs = HashMap::new();
    for spec in canonical {
        let spec = Arc::new(spec);
        for alias in spec.aliases {
            specs.insert(*alias, Arc::clone(&spec));
        }
        specs.insert(spec.name, spec);
    }
    LanguageTable { specs }
}

static LANGUAGE_TABLE: Lazy<LanguageTable> = Lazy::new(build_language_specs);

/// The process-wide language table, built on first use.
pub fn language_table() -> &'static LanguageTable {
    &LANGUAGE_TABLE
}

/// Sorted canonical keys of all supported languages.
pub fn supported_languages() -> Vec<&'static str> {
    language_table().canonical_keys()
}

/// Normalize a user-supplied language key: `" .PY "` becomes `"py"`.
pub fn normalize_key(key: &str) -> String {
    let key = key.trim().to_lowercase();
    match key.strip_prefix('.') {
        Some(stripped) => stripped.to_string(),
        None => key,
    }
}

/// Map a file extension (without the dot) to a canonical language key.
pub fn language_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "py" | "pyw" => Some("python"),
        "c" | "h" => Some("c"),
        "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Some("cpp"),
        "rs" => Some("rust"),
        "js" | "jsx" | "mjs" | "cjs" => Some("javascript"),
        "ts" | "tsx" | "mts" => Some("typescript"),
        "java" => Some("java"),
        "go" => Some("go"),
        "rb" => Some("ruby"),
        "php" => Some("php"),
        "swift" => Some("swift"),
        "kt" | "kts" => Some("kotlin"),
        "scala" | "sc" => Some("scala"),
        "lua" => Some("lua"),
        "sh" | "bash" | "zsh" => Some("shell"),
        "pl" | "pm" => Some("perl"),
        "hs" => Some("haskell"),
        "zig" => Some("zig"),
        "ex" | "exs" => Some("elixir"),
        "cs" => Some("csharp"),
        _ => None,
    }
}

/// Detect the language of `path` from its extension.
pub fn detect_language(path: &std::path::Path) -> Option<&'static str> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(language_for_extension)
}
