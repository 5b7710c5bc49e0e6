//! Rust: brace blocks, `pub` visibility, attributes as decorators.

use super::{BlockStyle, LanguageSpec, VisibilityStyle};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("rust", "Rust")
        .aliases(&["rs"])
        .single_comment("//")
        .multi_comment("/*", "*/")
        .blocks(BlockStyle::Braces)
        .visibility(VisibilityStyle::PubKeyword)
        .rule(
            ElementKind::Function,
            r#"^(\s*(?:pub(?:\(\w+\))?\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+"C"\s+)?fn\s+(\w+))"#,
        )
        .rule(ElementKind::Struct, r"^(\s*(?:pub(?:\(\w+\))?\s+)?struct\s+(\w+))")
        .rule(ElementKind::Enum, r"^(\s*(?:pub(?:\(\w+\))?\s+)?enum\s+(\w+))")
        .rule(
            ElementKind::Trait,
            r"^(\s*(?:pub(?:\(\w+\))?\s+)?(?:unsafe\s+)?trait\s+(\w+))",
        )
        .rule(
            ElementKind::Impl,
            r"^(\s*impl(?:<[^>]*>)?\s+(?:(\w+(?:<[^>]*>)?)\s+for\s+)?(\w+))",
        )
        .rule(ElementKind::Module, r"^(\s*(?:pub(?:\(\w+\))?\s+)?mod\s+(\w+))")
        .rule(
            ElementKind::Macro,
            r"^(\s*(?:pub(?:\(\w+\))?\s+)?macro_rules!\s+(\w+))",
        )
        .rule(
            ElementKind::Constant,
            r"^(\s*(?:pub(?:\(\w+\))?\s+)?(?:const|static)\s+(\w+))",
        )
        .rule(ElementKind::TypeAlias, r"^(\s*(?:pub(?:\(\w+\))?\s+)?type\s+(\w+))")
        .rule(ElementKind::Import, r"^(\s*use\s+(.+?);)")
        .rule(ElementKind::Decorator, r"^(\s*#\[(\w[^\]]*)\])")
}
