//! POSIX shell, bash and zsh.

use super::LanguageSpec;
use crate::analysis::ElementKind;

pub(super) fn spec() -> LanguageSpec {
    LanguageSpec::new("shell", "Shell")
        .aliases(&["bash", "sh", "zsh"])
        .single_comment("#")
        .rule(
            ElementKind::Function,
            r"^(\s*(?:function\s+)?(\w+)\s*\(\s*\))",
        )
        .rule(
            ElementKind::Variable,
            r"^(\s*(?:export\s+|readonly\s+|declare\s+(?:-\w+\s+)*)?([A-Z_][A-Z_0-9]*)\s*=)",
        )
        .rule(ElementKind::Import, r"^(\s*(?:source|\.)\s+(.+))")
}
