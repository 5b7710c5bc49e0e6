//! JavaScript: classes, function declarations, arrow bindings, React wrappers.

use super::{BlockStyle, InheritanceStyle, LanguageSpec};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("javascript", "JavaScript")
        .aliases(&["js"])
        .single_comment("//")
        .multi_comment("/*", "*/")
        .strings(&["\"", "'", "`"])
        .blocks(BlockStyle::Braces)
        .inheritance(InheritanceStyle::ExtendsImplements)
        .rule(
            ElementKind::Class,
            r"^(\s*(?:export\s+)?(?:default\s+)?class\s+(\w+))",
        )
        .rule(
            ElementKind::Function,
            r"^(\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s+(\w+)\s*\()",
        )
        .rule(
            ElementKind::Function,
            r"^(\s*(?:export\s+)?(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s+)?(?:function|\([^)]*\)\s*=>|[a-zA-Z_]\w*\s*=>))",
        )
        .rule(
            ElementKind::Component,
            r"^(\s*(?:export\s+)?(?:const|let|var)\s+(\w+)\s*=\s*(?:React\.)?(?:memo|forwardRef|lazy)\s*\()",
        )
        .rule(
            ElementKind::Constant,
            r"^(\s*(?:export\s+)?const\s+([A-Z][A-Z_0-9]+)\s*=)",
        )
        .rule(ElementKind::Import, r"^(\s*import\s+(.+))")
        .rule(
            ElementKind::Module,
            r"^(\s*(?:export\s+)?(?:const|let|var)\s+(\w+)\s*=\s*require\s*\()",
        )
}
