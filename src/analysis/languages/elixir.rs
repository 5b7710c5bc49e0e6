//! Elixir: `do ... end` blocks, protocols and implementations.

use super::{BlockStyle, LanguageSpec};
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("elixir", "Elixir")
        .aliases(&["ex", "exs"])
        .single_comment("#")
        .blocks(BlockStyle::Terminator("end"))
        .indent_significant()
        .rule(ElementKind::Module, r"^(\s*defmodule\s+(\w[\w.]*))")
        .rule(
            ElementKind::Function,
            r"^(\s*(?:def|defp|defmacro|defmacrop)\s+(\w+))",
        )
        .rule(ElementKind::Protocol, r"^(\s*defprotocol\s+(\w[\w.]*))")
        .rule(ElementKind::Impl, r"^(\s*defimpl\s+(\w[\w.]*))")
        .rule(ElementKind::Struct, r"^(\s*defstruct\s+(.+))")
        .rule(
            ElementKind::Import,
            r"^(\s*(?:import|alias|use|require)\s+(.+))",
        )
}
