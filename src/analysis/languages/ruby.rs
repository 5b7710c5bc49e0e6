//! Ruby: `end`-terminated blocks, `=begin`/`=end` comments.

use super::{BlockStyle, InheritanceStyle, LanguageSpec};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("ruby", "Ruby")
        .aliases(&["rb"])
        .single_comment("#")
        .multi_comment("=begin", "=end")
        .blocks(BlockStyle::Terminator("end"))
        .inheritance(InheritanceStyle::LessThan)
        .rule(ElementKind::Class, r"^(\s*class\s+(\w+))")
        .rule(ElementKind::Module, r"^(\s*module\s+(\w+))")
        .rule(ElementKind::Function, r"^(\s*def\s+(?:self\.)?(\w+[?!=]?))")
        .rule(ElementKind::Constant, r"^(\s*([A-Z][A-Z_0-9]+)\s*=)")
        .rule(ElementKind::Import, r"^(\s*require(?:_relative)?\s+(.+))")
        .rule(
            ElementKind::Decorator,
            r"^(\s*attr_(?:reader|writer|accessor)\s+(.+))",
        )
}
