//! Python: indentation blocks, `#` comments, triple-quoted docstrings.

use super::{BlockStyle, InheritanceStyle, LanguageSpec, VisibilityStyle};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("python", "Python")
        .aliases(&["py"])
        .single_comment("#")
        .multi_comment(r#"""""#, r#"""""#)
        .strings(&[r#"""""#, "'''", "\"", "'"])
        .blocks(BlockStyle::Indentation)
        .visibility(VisibilityStyle::Underscore)
        .inheritance(InheritanceStyle::Parenthesized)
        .indent_significant()
        .docstring_comments()
        .rule(ElementKind::Class, r"^(\s*class\s+(\w+)\s*[\(:])")
        .rule(ElementKind::Function, r"^(\s*(?:async\s+)?def\s+(\w+)\s*\()")
        .rule(ElementKind::Decorator, r"^(\s*@(\w[\w.]*)\s*)")
        .rule(ElementKind::Import, r"^(\s*(?:from\s+\S+\s+)?import\s+(.+))")
        .rule(ElementKind::Variable, r"^(\s*([A-Z][A-Z_0-9]+)\s*=\s*)")
}
