//! Haskell: type signatures stand in for function declarations.

use super::{BlockStyle, LanguageSpec};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("haskell", "Haskell")
        .aliases(&["hs"])
        .single_comment("--")
        .multi_comment("{-", "-}")
        .blocks(BlockStyle::Indentation)
        .indent_significant()
        .rule(ElementKind::Module, r"^(\s*module\s+(\w[\w.]*))")
        .rule(ElementKind::TypeAlias, r"^(\s*type\s+(\w+))")
        .rule(ElementKind::Struct, r"^(\s*data\s+(\w+))")
        .rule(ElementKind::Class, r"^(\s*class\s+(\w+))")
        .rule(ElementKind::Function, r"^(([a-z_]\w*)\s*::)")
        .rule(ElementKind::Import, r"^(\s*import\s+(?:qualified\s+)?(.+))")
}
