//! Java: access-modified classes, methods, annotations, packages.

use super::{BlockStyle, InheritanceStyle, LanguageSpec, VisibilityStyle};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("java", "Java")
        .single_comment("//")
        .multi_comment("/*", "*/")
        .blocks(BlockStyle::Braces)
        .visibility(VisibilityStyle::AccessKeywords)
        .inheritance(InheritanceStyle::ExtendsImplements)
        .rule(
            ElementKind::Class,
            r"^(\s*(?:public\s+|private\s+|protected\s+)?(?:static\s+)?(?:final\s+)?(?:abstract\s+)?class\s+(\w+))",
        )
        .rule(
            ElementKind::Interface,
            r"^(\s*(?:public\s+|private\s+|protected\s+)?interface\s+(\w+))",
        )
        .rule(
            ElementKind::Enum,
            r"^(\s*(?:public\s+|private\s+|protected\s+)?enum\s+(\w+))",
        )
        .rule(
            ElementKind::Function,
            r"^(\s*(?:public\s+|private\s+|protected\s+)?(?:static\s+)?(?:final\s+)?(?:synchronized\s+)?(?:native\s+)?(?:abstract\s+)?(?:<[^>]+>\s+)?(?:void|int|char|float|double|long|short|byte|boolean|String|Object|List|Map|Set|Optional|\w+(?:<[^>]*>)?)\s*(?:\[\])?\s+(\w+)\s*\()",
        )
        .rule(ElementKind::Import, r"^(\s*import\s+(?:static\s+)?(.+?);)")
        .rule(ElementKind::Module, r"^(\s*package\s+(.+?);)")
        .rule(ElementKind::Decorator, r"^(\s*@(\w[\w.]*(?:\([^)]*\))?))")
        .rule(
            ElementKind::Constant,
            r"^(\s*(?:public\s+|private\s+|protected\s+)?static\s+final\s+\w+\s+([A-Z_]\w*)\s*=)",
        )
}
