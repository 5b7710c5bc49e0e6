//! PHP: classes, traits, namespaces, `use`/`require` imports.

use super::{BlockStyle, LanguageSpec, VisibilityStyle};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("php", "PHP")
        .single_comment("//")
        .multi_comment("/*", "*/")
        .blocks(BlockStyle::Braces)
        .visibility(VisibilityStyle::AccessKeywords)
        .rule(
            ElementKind::Class,
            r"^(\s*(?:abstract\s+|final\s+)?class\s+(\w+))",
        )
        .rule(ElementKind::Interface, r"^(\s*interface\s+(\w+))")
        .rule(ElementKind::Trait, r"^(\s*trait\s+(\w+))")
        .rule(
            ElementKind::Function,
            r"^(\s*(?:public\s+|private\s+|protected\s+)?(?:static\s+)?function\s+(\w+)\s*\()",
        )
        .rule(ElementKind::Namespace, r"^(\s*namespace\s+(.+?);)")
        .rule(
            ElementKind::Import,
            r"^(\s*(?:use|require|require_once|include|include_once)\s+(.+?);)",
        )
        .rule(
            ElementKind::Constant,
            r#"^(\s*(?:const|define)\s*\(?\s*['"]?(\w+))"#,
        )
}
