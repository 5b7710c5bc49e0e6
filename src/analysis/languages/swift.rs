//! Swift: classes, protocols, extensions, `let`/`var` bindings.

use super::{BlockStyle, InheritanceStyle, LanguageSpec, VisibilityStyle};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("swift", "Swift")
        .single_comment("//")
        .multi_comment("/*", "*/")
        .blocks(BlockStyle::Braces)
        .visibility(VisibilityStyle::Swift)
        .inheritance(InheritanceStyle::Colon)
        .rule(
            ElementKind::Class,
            r"^(\s*(?:public\s+|private\s+|internal\s+|open\s+|fileprivate\s+)?(?:final\s+)?class\s+(\w+))",
        )
        .rule(
            ElementKind::Struct,
            r"^(\s*(?:public\s+|private\s+|internal\s+)?struct\s+(\w+))",
        )
        .rule(
            ElementKind::Enum,
            r"^(\s*(?:public\s+|private\s+|internal\s+)?enum\s+(\w+))",
        )
        .rule(
            ElementKind::Protocol,
            r"^(\s*(?:public\s+|private\s+|internal\s+)?protocol\s+(\w+))",
        )
        .rule(
            ElementKind::Extension,
            r"^(\s*(?:public\s+|private\s+|internal\s+)?extension\s+(\w+))",
        )
        .rule(
            ElementKind::Function,
            r"^(\s*(?:public\s+|private\s+|internal\s+|open\s+)?(?:static\s+|class\s+)?(?:override\s+)?func\s+(\w+))",
        )
        .rule(ElementKind::Import, r"^(\s*import\s+(\w+))")
        .rule(
            ElementKind::Constant,
            r"^(\s*(?:public\s+|private\s+)?(?:static\s+)?let\s+(\w+)\s*(?::|\s*=))",
        )
        .rule(
            ElementKind::Variable,
            r"^(\s*(?:public\s+|private\s+)?(?:static\s+)?var\s+(\w+)\s*(?::|\s*=))",
        )
}
