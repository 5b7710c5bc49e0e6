//! Kotlin: modifier-heavy classes, `fun`, objects, `val`/`var`.

use super::{BlockStyle, InheritanceStyle, LanguageSpec, VisibilityStyle};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("kotlin", "Kotlin")
        .aliases(&["kt"])
        .single_comment("//")
        .multi_comment("/*", "*/")
        .blocks(BlockStyle::Braces)
        .visibility(VisibilityStyle::AccessKeywords)
        .inheritance(InheritanceStyle::KotlinColon)
        .rule(
            ElementKind::Class,
            r"^(\s*(?:public\s+|private\s+|protected\s+|internal\s+)?(?:open\s+|abstract\s+|sealed\s+|data\s+|inner\s+)*class\s+(\w+))",
        )
        .rule(
            ElementKind::Interface,
            r"^(\s*(?:public\s+|private\s+|protected\s+|internal\s+)?interface\s+(\w+))",
        )
        .rule(
            ElementKind::Enum,
            r"^(\s*(?:public\s+|private\s+|protected\s+|internal\s+)?enum\s+class\s+(\w+))",
        )
        .rule(
            ElementKind::Function,
            r"^(\s*(?:public\s+|private\s+|protected\s+|internal\s+)?(?:open\s+|override\s+)?(?:suspend\s+)?fun\s+(?:<[^>]+>\s+)?(\w+)\s*\()",
        )
        .rule(
            ElementKind::Constant,
            r"^(\s*(?:public\s+|private\s+|protected\s+|internal\s+)?(?:const\s+)?val\s+(\w+))",
        )
        .rule(
            ElementKind::Variable,
            r"^(\s*(?:public\s+|private\s+|protected\s+|internal\s+)?var\s+(\w+))",
        )
        .rule(
            ElementKind::Module,
            r"^(\s*(?:object|companion\s+object)\s+(\w*))",
        )
        .rule(ElementKind::Import, r"^(\s*import\s+(.+))")
        .rule(ElementKind::Decorator, r"^(\s*@(\w+))")
}
