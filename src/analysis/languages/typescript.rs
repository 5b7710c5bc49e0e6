//! TypeScript: JavaScript rules plus interfaces, type aliases, enums, namespaces.

use super::{BlockStyle, InheritanceStyle, LanguageSpec};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("typescript", "TypeScript")
        .aliases(&["ts"])
        .single_comment("//")
        .multi_comment("/*", "*/")
        .strings(&["\"", "'", "`"])
        .blocks(BlockStyle::Braces)
        .inheritance(InheritanceStyle::ExtendsImplements)
        .rule(ElementKind::Interface, r"^(\s*(?:export\s+)?interface\s+(\w+))")
        .rule(
            ElementKind::TypeAlias,
            r"^(\s*(?:export\s+)?type\s+(\w+)\s*(?:<[^>]*>)?\s*=)",
        )
        .rule(
            ElementKind::Enum,
            r"^(\s*(?:export\s+)?(?:const\s+)?enum\s+(\w+))",
        )
        .rule(
            ElementKind::Class,
            r"^(\s*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+(\w+))",
        )
        .rule(
            ElementKind::Function,
            r"^(\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s+(\w+)\s*)",
        )
        .rule(
            ElementKind::Function,
            r"^(\s*(?:export\s+)?(?:const|let|var)\s+(\w+)\s*(?::\s*[^=]+)?\s*=\s*(?:async\s+)?(?:function|\([^)]*\)\s*(?::\s*[^=]+)?\s*=>|[a-zA-Z_]\w*\s*=>))",
        )
        .rule(
            ElementKind::Namespace,
            r"^(\s*(?:export\s+)?(?:declare\s+)?namespace\s+(\w+))",
        )
        .rule(
            ElementKind::Module,
            r"^(\s*(?:export\s+)?(?:declare\s+)?module\s+(\w+))",
        )
        .rule(ElementKind::Import, r"^(\s*import\s+(.+))")
        .rule(ElementKind::Decorator, r"^(\s*@(\w[\w.]*))")
}
