//! Lua: `function ... end` blocks, `--` and `--[[ ]]` comments.

use super::{BlockStyle, LanguageSpec};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("lua", "Lua")
        .single_comment("--")
        .multi_comment("--[[", "]]")
        .blocks(BlockStyle::Terminator("end"))
        .rule(
            ElementKind::Function,
            r"^(\s*(?:local\s+)?function\s+(\w[\w.:]*))\s*\(",
        )
        .rule(
            ElementKind::Function,
            r"^(\s*(?:local\s+)?(\w[\w.]*)\s*=\s*function\s*\()",
        )
        .rule(ElementKind::Variable, r"^(\s*local\s+(\w+)\s*=)")
}
