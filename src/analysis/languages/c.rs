//! C: brace blocks, preprocessor macros and includes.

use super::{BlockStyle, LanguageSpec};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("c", "C")
        .aliases(&["h"])
        .single_comment("//")
        .multi_comment("/*", "*/")
        .blocks(BlockStyle::Braces)
        .rule(ElementKind::Struct, r"^(\s*(?:typedef\s+)?struct\s+(\w+))")
        .rule(ElementKind::Union, r"^(\s*(?:typedef\s+)?union\s+(\w+))")
        .rule(ElementKind::Enum, r"^(\s*(?:typedef\s+)?enum\s+(\w+))")
        .rule(ElementKind::Typedef, r"^(\s*typedef\s+.+?\s+(\w+)\s*;)")
        .rule(ElementKind::Macro, r"^(\s*#\s*define\s+(\w+))")
        .rule(
            ElementKind::Function,
            r"^(\s*(?:static\s+|inline\s+|extern\s+|const\s+)*(?:(?:unsigned|signed|long|short|volatile|register)\s+)*(?:void|int|char|float|double|long|short|unsigned|signed|size_t|ssize_t|uint\d+_t|int\d+_t|bool|_Bool|FILE|\w+_t|\w+)\s*\**\s+(\w+)\s*\()",
        )
        .rule(ElementKind::Import, r"^(\s*#\s*include\s+(.+))")
        .rule(
            ElementKind::Variable,
            r"^(\s*(?:static\s+|extern\s+|const\s+)*(?:const\s+)?(?:char|int|float|double|void|long|short|unsigned|signed|size_t|bool|_Bool|\w+_t)\s*\**\s+(\w+)\s*(?:=|;|\[))",
        )
}
