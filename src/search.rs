//! Construct search across files.
//!
//! Selects elements by kind label (`CLASS|FUNCTION`) and a regex over their
//! names, and prints each match with its complete source rather than the
//! truncated extract.

use std::collections::BTreeSet;
use std::path::PathBuf;

use regex::Regex;

use crate::analysis::languages::{detect_language, language_table, LanguageSpec};
use crate::analysis::{AnalysisContext, Element};
use crate::report::{write_status, FileStatus};

/// Split a `|`-separated tag filter into upper-case labels.
pub fn parse_tag_filter(filter: &str) -> BTreeSet<String> {
    filter
        .split('|')
        .map(|tag| tag.trim().to_uppercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Check if `spec` can produce at least one of `tags`.
pub fn language_supports_tags(spec: &LanguageSpec, tags: &BTreeSet<String>) -> bool {
    spec.supported_labels()
        .iter()
        .any(|label| tags.contains(*label))
}

/// Supported tags per language, one `- Title: TAG, TAG` line each.
pub fn format_available_tags() -> String {
    language_table()
        .languages()
        .iter()
        .map(|spec| {
            let labels: Vec<&str> = spec.supported_labels().into_iter().collect();
            format!("- {}: {}", spec.title, labels.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check if `elem` has one of `tags` and a name matched by `name`.
///
/// A `None` pattern (one that failed to compile) matches nothing.
pub fn construct_matches(elem: &Element, tags: &BTreeSet<String>, name: Option<&Regex>) -> bool {
    if !tags.contains(elem.kind.label()) {
        return false;
    }
    match (elem.name.as_deref(), name) {
        (Some(elem_name), Some(re)) if !elem_name.is_empty() => re.is_match(elem_name),
        _ => false,
    }
}

/// Render one match with its full source range.
pub fn format_construct(elem: &Element, lines: &[&str], line_numbers: bool) -> String {
    let mut out = vec![format!(
        "### {}: `{}`",
        elem.kind.label(),
        elem.name.as_deref().unwrap_or_default()
    )];
    if let Some(sig) = &elem.signature {
        out.push(format!("- Signature: `{}`", sig));
    }
    out.push(format!("- Lines: {}-{}", elem.line_start, elem.line_end));

    let start = elem.line_start.saturating_sub(1).min(lines.len());
    let end = elem.line_end.min(lines.len());
    let code: Vec<String> = lines[start..end]
        .iter()
        .enumerate()
        .map(|(offset, line)| {
            if line_numbers {
                format!("{}: {}", elem.line_start + offset, line.trim_end())
            } else {
                line.trim_end().to_string()
            }
        })
        .collect();

    out.push("```".to_string());
    out.push(code.join("\n"));
    out.push("```".to_string());
    out.join("\n")
}

/// Matches found by [`find_constructs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub output: String,
    /// Total constructs matched.
    pub matches: usize,
    /// Files with at least one match.
    pub ok: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Find constructs in `paths` whose kind is in `tag_filter` and whose name
/// matches `pattern`.
///
/// Files that are missing, of unknown language, unable to produce any of
/// the tags, or without matches are skipped. Errors when the filter holds
/// no tags or nothing matched anywhere.
pub fn find_constructs(
    ctx: &AnalysisContext,
    paths: &[PathBuf],
    tag_filter: &str,
    pattern: &str,
    line_numbers: bool,
    progress: bool,
) -> anyhow::Result<SearchResult> {
    let tags = parse_tag_filter(tag_filter);
    if tags.is_empty() {
        anyhow::bail!(
            "No valid tags specified in tag filter.\n\nAvailable tags by language:\n{}",
            format_available_tags()
        );
    }
    let name = match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "invalid name pattern, nothing will match");
            None
        }
    };

    let mut result = SearchResult::default();
    let mut parts = Vec::new();
    let skip = |result: &mut SearchResult, path: &PathBuf, reason: &str| {
        result.skipped += 1;
        if progress {
            write_status(FileStatus::Skip, path, Some(reason));
        }
    };

    for path in paths {
        if !path.is_file() {
            skip(&mut result, path, "not found");
            continue;
        }
        let Some(language) = detect_language(path) else {
            skip(&mut result, path, "unsupported extension");
            continue;
        };
        let supported = language_table()
            .get(language)
            .map_or(false, |spec| language_supports_tags(spec, &tags));
        if !supported {
            let reason = format!("language {} does not support any requested tags", language);
            skip(&mut result, path, &reason);
            continue;
        }

        let analysis = match ctx.analyze_file(path, Some(language)) {
            Ok(analysis) => analysis,
            Err(e) => {
                result.failed += 1;
                if progress {
                    write_status(FileStatus::Fail, path, Some(&e.to_string()));
                }
                continue;
            }
        };

        let matched: Vec<&Element> = analysis
            .elements
            .iter()
            .filter(|e| construct_matches(e, &tags, name.as_ref()))
            .collect();
        if matched.is_empty() {
            skip(&mut result, path, "no matches");
            continue;
        }

        let lines = analysis.lines();
        let blocks: Vec<String> = matched
            .iter()
            .map(|e| format_construct(e, &lines, line_numbers))
            .collect();
        parts.push(format!(
            "@@@ {} | {}\n\n{}",
            path.display(),
            language,
            blocks.join("\n\n")
        ));
        result.matches += matched.len();
        result.ok += 1;
        if progress {
            let detail = format!("{} matches", matched.len());
            write_status(FileStatus::Ok, path, Some(&detail));
        }
    }

    if parts.is_empty() {
        anyhow::bail!(
            "No constructs found matching the specified criteria.\n\nAvailable tags by language:\n{}",
            format_available_tags()
        );
    }
    if progress {
        eprintln!(
            "\n  Found: {} constructs in {} files ({} skipped, {} failed)",
            result.matches, result.ok, result.skipped, result.failed
        );
    }
    result.output = parts.join("\n\n");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ElementKind;
    use std::fs;
    use tempfile::TempDir;

    fn named(kind: ElementKind, name: &str) -> Element {
        let mut elem = Element::new(kind, 1, 1, format!("x {}", name));
        elem.name = Some(name.to_string());
        elem
    }

    #[test]
    fn test_parse_tag_filter() {
        let tags = parse_tag_filter(" class | Function||");
        assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["CLASS", "FUNCTION"]);
        assert!(parse_tag_filter(" | ").is_empty());
    }

    #[test]
    fn test_construct_matches() {
        let tags = parse_tag_filter("FUNCTION");
        let re = Regex::new("^get_").unwrap();
        assert!(construct_matches(&named(ElementKind::Function, "get_user"), &tags, Some(&re)));
        assert!(!construct_matches(&named(ElementKind::Function, "set_user"), &tags, Some(&re)));
        assert!(!construct_matches(&named(ElementKind::Class, "get_user"), &tags, Some(&re)));
        assert!(!construct_matches(&named(ElementKind::Function, "get_user"), &tags, None));

        let mut unnamed = named(ElementKind::Function, "");
        unnamed.name = None;
        assert!(!construct_matches(&unnamed, &tags, Some(&re)));
    }

    #[test]
    fn test_comment_tag_covers_both_kinds() {
        let tags = parse_tag_filter("COMMENT");
        let re = Regex::new(".").unwrap();
        assert!(construct_matches(&named(ElementKind::CommentMulti, "x"), &tags, Some(&re)));
    }

    #[test]
    fn test_language_supports_tags() {
        let go = language_table().get("go").unwrap();
        assert!(language_supports_tags(go, &parse_tag_filter("STRUCT")));
        assert!(!language_supports_tags(go, &parse_tag_filter("CLASS|TRAIT")));
    }

    #[test]
    fn test_format_construct_full_code() {
        let lines = vec!["fn a() {", "    one();", "    two();", "}  "];
        let mut elem = named(ElementKind::Function, "a");
        elem.line_end = 4;
        elem.signature = Some("fn a()".to_string());
        let out = format_construct(&elem, &lines, true);
        assert_eq!(
            out,
            "### FUNCTION: `a`\n- Signature: `fn a()`\n- Lines: 1-4\n```\n1: fn a() {\n2:     one();\n3:     two();\n4: }\n```"
        );
    }

    #[test]
    fn test_find_constructs_across_files() {
        let dir = TempDir::new().unwrap();
        let py = dir.path().join("svc.py");
        let go = dir.path().join("main.go");
        fs::write(&py, "class UserService:\n    def get_user(self):\n        return 1\n").unwrap();
        fs::write(&go, "package main\n\nfunc getUser() {}\n").unwrap();

        let ctx = AnalysisContext::default();
        let result = find_constructs(
            &ctx,
            &[py.clone(), go.clone()],
            "CLASS",
            "User",
            false,
            false,
        )
        .unwrap();

        assert_eq!((result.matches, result.ok, result.skipped), (1, 1, 1));
        assert!(result.output.starts_with(&format!("@@@ {} | python", py.display())));
        assert!(result.output.contains("### CLASS: `UserService`"));
        assert!(result.output.contains("        return 1"));
    }

    #[test]
    fn test_find_constructs_errors() {
        let dir = TempDir::new().unwrap();
        let py = dir.path().join("a.py");
        fs::write(&py, "def f():\n    pass\n").unwrap();
        let ctx = AnalysisContext::default();

        let err = find_constructs(&ctx, &[py.clone()], " | ", ".*", true, false).unwrap_err();
        assert!(err.to_string().contains("No valid tags"));

        let err = find_constructs(&ctx, &[py.clone()], "FUNCTION", "([", true, false).unwrap_err();
        assert!(err.to_string().contains("No constructs found"));
        assert!(err.to_string().contains("- Python: "));
    }
}
