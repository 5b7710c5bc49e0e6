//! Go: functions, receiver methods, struct/interface/alias types.

use super::{BlockStyle, LanguageSpec, VisibilityStyle};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("go", "Go")
        .single_comment("//")
        .multi_comment("/*", "*/")
        .strings(&["\"", "`"])
        .blocks(BlockStyle::Braces)
        .visibility(VisibilityStyle::Capitalized)
        .rule(ElementKind::Function, r"^(\s*func\s+(\w+)\s*\()")
        .rule(
            ElementKind::Method,
            r"^(\s*func\s+\(\s*\w+\s+\*?\w+\s*\)\s+(\w+)\s*\()",
        )
        .rule(ElementKind::Struct, r"^(\s*type\s+(\w+)\s+struct\b)")
        .rule(ElementKind::Interface, r"^(\s*type\s+(\w+)\s+interface\b)")
        // struct and interface types are claimed by the rules above
        .rule(ElementKind::TypeAlias, r"^(\s*type\s+(\w+)\s+\w)")
        .rule(ElementKind::Constant, r"^(\s*(?:const|var)\s+(\w+))")
        .rule(ElementKind::Import, r"^(\s*import\s+(.+))")
        .rule(ElementKind::Module, r"^(\s*package\s+(\w+))")
}
