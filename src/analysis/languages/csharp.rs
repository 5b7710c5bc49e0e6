//! C#: classes, properties, attributes, namespaces.

use super::{BlockStyle, InheritanceStyle, LanguageSpec, VisibilityStyle};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("csharp", "C#")
        .aliases(&["cs"])
        .single_comment("//")
        .multi_comment("/*", "*/")
        .blocks(BlockStyle::Braces)
        .visibility(VisibilityStyle::AccessKeywords)
        .inheritance(InheritanceStyle::Colon)
        .rule(
            ElementKind::Class,
            r"^(\s*(?:public\s+|private\s+|protected\s+|internal\s+)?(?:static\s+)?(?:sealed\s+|abstract\s+|partial\s+)?class\s+(\w+))",
        )
        .rule(
            ElementKind::Interface,
            r"^(\s*(?:public\s+|private\s+|protected\s+|internal\s+)?interface\s+(\w+))",
        )
        .rule(
            ElementKind::Struct,
            r"^(\s*(?:public\s+|private\s+|protected\s+|internal\s+)?(?:readonly\s+)?struct\s+(\w+))",
        )
        .rule(
            ElementKind::Enum,
            r"^(\s*(?:public\s+|private\s+|protected\s+|internal\s+)?enum\s+(\w+))",
        )
        .rule(ElementKind::Namespace, r"^(\s*namespace\s+(\w[\w.]*))")
        .rule(
            ElementKind::Function,
            r"^(\s*(?:public\s+|private\s+|protected\s+|internal\s+)?(?:static\s+)?(?:async\s+)?(?:virtual\s+|override\s+|abstract\s+)?(?:void|int|char|float|double|long|short|byte|bool|decimal|string|object|var|Task|IEnumerable|\w+(?:<[^>]*>)?)\s*(?:\[\])?\s+(\w+)\s*\()",
        )
        .rule(
            ElementKind::Property,
            r"^(\s*(?:public\s+|private\s+|protected\s+|internal\s+)?(?:static\s+)?(?:virtual\s+|override\s+)?(?:required\s+)?\w+(?:<[^>]*>)?\s+(\w+)\s*\{)",
        )
        .rule(ElementKind::Import, r"^(\s*using\s+(.+?);)")
        .rule(ElementKind::Decorator, r"^(\s*\[(\w[\w.]*(?:\([^)]*\))?)\])")
        .rule(
            ElementKind::Constant,
            r"^(\s*(?:public\s+|private\s+)?const\s+\w+\s+(\w+)\s*=)",
        )
}
