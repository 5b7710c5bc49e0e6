//! Perl: subs, packages, POD blocks.

use super::LanguageSpec;
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("perl", "Perl")
        .aliases(&["pl"])
        .single_comment("#")
        .multi_comment("=pod", "=cut")
        .rule(ElementKind::Function, r"^(\s*sub\s+(\w+))")
        .rule(ElementKind::Module, r"^(\s*package\s+(\w[\w:]*))")
        .rule(ElementKind::Constant, r"^(\s*use\s+constant\s+(\w+))")
        .rule(ElementKind::Import, r"^(\s*(?:use|require)\s+(.+?);)")
}
