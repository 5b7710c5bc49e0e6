//! Documentation comment parsing.
//!
//! Understands Doxygen/Javadoc style tags (`@brief`, `\param`, ...) in any
//! comment dialect the language table knows: `/** */`, `///`, `#`, `--`,
//! triple-quoted docstrings. Comments without recognized tags parse to an
//! empty map.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

/// Tag name to the content of each occurrence, in source order.
pub type DocFields = BTreeMap<String, Vec<String>>;

/// Recognized tags in presentation order.
pub const DOC_TAGS: &[&str] = &[
    "brief",
    "details",
    "param",
    "param[in]",
    "param[out]",
    "return",
    "retval",
    "exception",
    "throws",
    "warning",
    "deprecated",
    "note",
    "see",
    "sa",
    "satisfies",
    "pre",
    "post",
];

/// Lines made only of comment delimiters.
const BARE_DELIMITERS: &[&str] = &[
    "/**", "/*", "*/", "/*!", "///", "//!", "\"\"\"", "'''", "{-", "-}", "--[[", "]]", "=begin",
    "=end", "=pod", "=cut",
];

lazy_static! {
    static ref TAG_PATTERN: Regex = Regex::new(
        r"[@\\](?:(param)(?:(\[[^\]]+\])|\b)|(satisfies|deprecated|exception|details|warning|returns|retval|return|throws|brief|note|post|see|pre|sa)\b)"
    )
    .unwrap();

    static ref LEADING_MARKER: Regex = Regex::new(
        r#"^\s*(?:/\*+!?|/{2,3}!?|\*+|#+|--\[\[|--|\{-|"""|''')?\s*(?:!?<\s*)?"#
    )
    .unwrap();

    static ref TRAILING_MARKER: Regex =
        Regex::new(r#"\s*(?:\*+/|"""|'''|-\}|\]\])\s*$"#).unwrap();

    static ref SPACE_RUN: Regex = Regex::new(r"[ \t]+").unwrap();
}

/// Remove comment delimiters, leaving one content line per input line.
fn strip_delimiters(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !BARE_DELIMITERS.contains(&line.trim()))
        .map(|line| {
            let line = LEADING_MARKER.replace(line, "");
            TRAILING_MARKER.replace(&line, "").into_owned()
        })
        .collect()
}

/// Collapse whitespace runs, trim lines, and squeeze blank lines.
fn normalize_content(content: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in content.lines() {
        let line = SPACE_RUN.replace_all(line.trim(), " ").into_owned();
        if line.is_empty() && out.last().map_or(true, |l: &String| l.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().map_or(false, |l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

/// Extract tagged fields from a documentation comment.
pub fn parse_doc_comment(text: &str) -> DocFields {
    let mut fields = DocFields::new();
    if text.trim().is_empty() {
        return fields;
    }

    let cleaned = strip_delimiters(text).join("\n");
    let tags: Vec<(String, usize, usize)> = TAG_PATTERN
        .captures_iter(&cleaned)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let key = if caps.get(1).is_some() {
                let direction = caps.get(2).map_or("", |m| m.as_str());
                format!("param{}", direction)
            } else {
                match caps.get(3)?.as_str() {
                    "returns" => "return".to_string(),
                    other => other.to_string(),
                }
            };
            Some((key, whole.start(), whole.end()))
        })
        .collect();

    for (idx, (key, _, content_start)) in tags.iter().enumerate() {
        let content_end = tags
            .get(idx + 1)
            .map_or(cleaned.len(), |(_, next_start, _)| *next_start);
        let content = normalize_content(&cleaned[*content_start..content_end]);
        if !content.is_empty() {
            fields.entry(key.clone()).or_default().push(content);
        }
    }
    fields
}

/// Render fields as Markdown bullets, one per tag, in [`DOC_TAGS`] order.
///
/// Tags outside the fixed list (unusual `param[...]` directions) follow in
/// key order.
pub fn format_doc_fields_markdown(fields: &DocFields) -> Vec<String> {
    let known = DOC_TAGS
        .iter()
        .filter_map(|tag| fields.get_key_value(*tag));
    let extra = fields
        .iter()
        .filter(|(key, _)| !DOC_TAGS.contains(&key.as_str()));

    known
        .chain(extra)
        .map(|(tag, values)| {
            let joined = values
                .iter()
                .map(|v| v.replace('\n', " "))
                .collect::<Vec<_>>()
                .join(" ");
            format!("- {}: {}", capitalize(tag), joined)
        })
        .collect()
}

fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
