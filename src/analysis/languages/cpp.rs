//! C++: C rules plus classes, namespaces, templates and aliases.

use super::{BlockStyle, InheritanceStyle, LanguageSpec, VisibilityStyle};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("cpp", "C++")
        .aliases(&["cc", "cxx", "hpp"])
        .single_comment("//")
        .multi_comment("/*", "*/")
        .blocks(BlockStyle::Braces)
        .visibility(VisibilityStyle::AccessKeywords)
        .inheritance(InheritanceStyle::Colon)
        .rule(ElementKind::Class, r"^(\s*(?:template\s*<[^>]*>\s*)?class\s+(\w+))")
        .rule(ElementKind::Struct, r"^(\s*(?:template\s*<[^>]*>\s*)?struct\s+(\w+))")
        .rule(ElementKind::Enum, r"^(\s*enum\s+(?:class\s+)?(\w+))")
        .rule(ElementKind::Namespace, r"^(\s*namespace\s+(\w+))")
        .rule(
            ElementKind::Function,
            r"^(\s*(?:static\s+|inline\s+|virtual\s+|explicit\s+|constexpr\s+|consteval\s+|constinit\s+|extern\s+|const\s+)*(?:auto|void|int|char|float|double|long|short|unsigned|signed|bool|string|wstring|size_t|\w+(?:::\w+)*)\s*[&*]*\s*(\w+(?:::\w+)*)\s*\()",
        )
        .rule(ElementKind::Macro, r"^(\s*#\s*define\s+(\w+))")
        .rule(ElementKind::Import, r"^(\s*#\s*include\s+(.+))")
        .rule(ElementKind::TypeAlias, r"^(\s*(?:using|typedef)\s+(\w+))")
}
