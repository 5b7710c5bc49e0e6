//! Zig: container declarations are `const` bindings to struct/enum/union.

use super::{BlockStyle, LanguageSpec, VisibilityStyle};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("zig", "Zig")
        .single_comment("//")
        .blocks(BlockStyle::Braces)
        .visibility(VisibilityStyle::PubKeyword)
        .rule(ElementKind::Function, r"^(\s*(?:pub\s+|export\s+)?fn\s+(\w+))")
        .rule(
            ElementKind::Struct,
            r"^(\s*(?:pub\s+)?const\s+(\w+)\s*=\s*(?:extern\s+|packed\s+)?struct\b)",
        )
        .rule(
            ElementKind::Enum,
            r"^(\s*(?:pub\s+)?const\s+(\w+)\s*=\s*enum\b)",
        )
        .rule(
            ElementKind::Union,
            r"^(\s*(?:pub\s+)?const\s+(\w+)\s*=\s*union\b)",
        )
        .rule(
            ElementKind::Import,
            r"^(\s*(?:pub\s+)?const\s+(\w+)\s*=\s*@import\()",
        )
        .rule(
            ElementKind::Constant,
            r"^(\s*(?:pub\s+)?const\s+(\w+)\s*(?::\s*[^=]+)?\s*=)",
        )
        .rule(ElementKind::Variable, r"^(\s*(?:pub\s+)?var\s+(\w+))")
}
