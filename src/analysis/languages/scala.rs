//! Scala: classes, traits, objects, `def`/`val`/`var`.

use super::{BlockStyle, LanguageSpec};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("scala", "Scala")
        .single_comment("//")
        .multi_comment("/*", "*/")
        .blocks(BlockStyle::Braces)
        .rule(
            ElementKind::Class,
            r"^(\s*(?:abstract\s+|sealed\s+|case\s+)?class\s+(\w+))",
        )
        .rule(ElementKind::Trait, r"^(\s*trait\s+(\w+))")
        .rule(ElementKind::Module, r"^(\s*object\s+(\w+))")
        .rule(ElementKind::Function, r"^(\s*(?:override\s+)?def\s+(\w+))")
        .rule(ElementKind::Constant, r"^(\s*val\s+(\w+))")
        .rule(ElementKind::Variable, r"^(\s*var\s+(\w+))")
        .rule(ElementKind::TypeAlias, r"^(\s*type\s+(\w+))")
        .rule(ElementKind::Import, r"^(\s*import\s+(.+))")
}
