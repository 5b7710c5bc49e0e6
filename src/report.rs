//! Output formatting for analysis results.
//!
//! Supports three output formats:
//! - Plain: line-numbered listing of every element with its extract
//! - Markdown: token-efficient summary meant to be read by an agent
//! - JSON: structured output for programmatic consumption
//!
//! Batch commands also report per-file progress (`OK`, `SKIP`, `FAIL`) on
//! stderr through the helpers at the bottom of this module.

use colored::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::analysis::lexer::clean_comment_line;
use crate::analysis::{
    format_doc_fields_markdown, AnalysisContext, Element, ElementKind, FileAnalysis, Visibility,
};
use crate::error::AnalyzerError;

// =============================================================================
// Plain Format
// =============================================================================

/// Which elements a plain listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingFilter {
    #[default]
    All,
    DefinitionsOnly,
    CommentsOnly,
}

impl ListingFilter {
    pub fn keeps(&self, elem: &Element) -> bool {
        match self {
            ListingFilter::All => true,
            ListingFilter::DefinitionsOnly => !elem.kind.is_comment(),
            ListingFilter::CommentsOnly => elem.kind.is_comment(),
        }
    }
}

/// Render elements as a line-numbered listing.
///
/// A blank line separates elements that are not adjacent in the source.
pub fn render_plain(elements: &[Element], filter: ListingFilter) -> String {
    let mut out = Vec::new();
    let mut prev_end: Option<usize> = None;

    for elem in elements.iter().filter(|e| filter.keeps(e)) {
        if prev_end.map_or(false, |end| elem.line_start > end + 1) {
            out.push(String::new());
        }
        let name = elem
            .name
            .as_deref()
            .map(|n| format!(" {}", n))
            .unwrap_or_default();
        out.push(format!(
            "{:>6} | [{}]{} {}",
            elem.line_start,
            elem.kind.label(),
            name,
            elem.location()
        ));
        for line in elem.extract.lines() {
            out.push(format!("       | {}", truncate(line, 72)));
        }
        prev_end = Some(elem.line_end);
    }
    out.join("\n")
}

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report for one analyzed file.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub version: String,
    pub file: String,
    pub language: &'a str,
    pub total_lines: usize,
    pub elements: Vec<&'a Element>,
}

/// Serialize an analysis, keeping only the elements `filter` accepts.
pub fn render_json(analysis: &FileAnalysis, filter: ListingFilter) -> anyhow::Result<String> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        file: analysis.path.display().to_string(),
        language: analysis.language,
        total_lines: analysis.total_lines,
        elements: analysis
            .elements
            .iter()
            .filter(|e| filter.keeps(e))
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

// =============================================================================
// Markdown Format
// =============================================================================

/// Comments attached to the definitions they precede, plus the rest.
struct CommentMaps<'a> {
    /// Definition start line to the comments directly above it.
    doc_for_def: HashMap<usize, Vec<&'a Element>>,
    standalone: Vec<&'a Element>,
    file_description: String,
}

fn is_definition(elem: &Element) -> bool {
    !elem.kind.is_comment()
        && !matches!(elem.kind, ElementKind::Import | ElementKind::Decorator)
}

/// Comment text with markers removed, one entry per non-empty line.
fn comment_lines(elem: &Element) -> Vec<String> {
    elem.extract
        .lines()
        .map(clean_comment_line)
        .filter(|l| !l.is_empty() && !l.starts_with("=begin") && !l.starts_with("=end"))
        .collect()
}

fn comment_text(elem: &Element, max: usize) -> String {
    let text = comment_lines(elem).join(" ");
    if max > 0 {
        truncate(&text, max)
    } else {
        text
    }
}

fn build_comment_maps(elements: &[Element]) -> CommentMaps<'_> {
    let def_starts: BTreeSet<usize> = elements
        .iter()
        .filter(|e| is_definition(e))
        .map(|e| e.line_start)
        .collect();
    let import_starts: BTreeSet<usize> = elements
        .iter()
        .filter(|e| e.kind == ElementKind::Import)
        .map(|e| e.line_start)
        .collect();
    let comments: Vec<&Element> = elements.iter().filter(|e| e.kind.is_comment()).collect();

    // first comment near the top, shebangs excluded
    let file_description = comments
        .iter()
        .take_while(|c| c.line_start <= 10)
        .map(|c| comment_text(c, 0))
        .find(|t| !t.is_empty() && !t.starts_with("/usr/") && !t.starts_with("usr/"))
        .map(|t| truncate(&t, 200))
        .unwrap_or_default();

    let mut doc_for_def: HashMap<usize, Vec<&Element>> = HashMap::new();
    let mut standalone = Vec::new();
    for (idx, comment) in comments.iter().enumerate() {
        if comment.inline {
            continue;
        }
        let mut attached = false;
        for target in comment.line_end + 1..=comment.line_end + 3 {
            if def_starts.contains(&target) {
                doc_for_def.entry(target).or_default().push(*comment);
                attached = true;
                break;
            }
            if import_starts.contains(&target) {
                break;
            }
        }
        if !attached && (idx > 0 || file_description.is_empty()) {
            standalone.push(*comment);
        }
    }

    CommentMaps {
        doc_for_def,
        standalone,
        file_description,
    }
}

/// Merge body comments and exit points by line into `L<n>>` annotations.
fn render_body_annotations(
    out: &mut Vec<String>,
    elem: &Element,
    indent: &str,
    exclude: &[(usize, usize)],
) {
    let comments: BTreeMap<usize, (usize, &str)> = elem
        .body_comments
        .iter()
        .map(|c| (c.line_start, (c.line_end, c.text.as_str())))
        .collect();
    let exits: BTreeMap<usize, &str> = elem
        .exit_points
        .iter()
        .map(|e| (e.line, e.text.as_str()))
        .collect();
    let lines: BTreeSet<usize> = comments.keys().chain(exits.keys()).copied().collect();

    for line in lines {
        if exclude.iter().any(|(s, e)| *s <= line && line <= *e) {
            continue;
        }
        match (exits.get(&line), comments.get(&line)) {
            (Some(exit), Some((_, text))) => {
                out.push(format!("{}L{}> `{}` - {}", indent, line, exit, text))
            }
            (Some(exit), None) => out.push(format!("{}L{}> `{}`", indent, line, exit)),
            (None, Some((end, text))) => {
                let loc = if *end == line {
                    format!("L{}", line)
                } else {
                    format!("L{}-{}", line, end)
                };
                out.push(format!("{}{}> {}", indent, loc, text));
            }
            (None, None) => {}
        }
    }
}

fn visibility_suffix(visibility: Option<Visibility>) -> String {
    match visibility {
        Some(vis) if vis != Visibility::Public => format!(" `{}`", vis.as_str()),
        _ => String::new(),
    }
}

/// Render an analysis as compact Markdown.
pub fn render_markdown(analysis: &FileAnalysis) -> String {
    markdown_for(
        &analysis.elements,
        &analysis.path,
        analysis.title,
        analysis.total_lines,
    )
}

/// Render enriched elements of one file as compact Markdown.
///
/// Sections: header, imports, definitions (containers with their children,
/// documentation and body annotations), standalone comments, symbol index.
pub fn markdown_for(elements: &[Element], path: &Path, title: &str, total_lines: usize) -> String {
    let mut out: Vec<String> = Vec::new();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let maps = build_comment_maps(elements);
    let defs: Vec<&Element> = elements.iter().filter(|e| is_definition(e)).collect();
    let imports: Vec<&Element> = elements
        .iter()
        .filter(|e| e.kind == ElementKind::Import)
        .collect();
    let comment_count = elements
        .iter()
        .filter(|e| e.kind.is_comment() && !e.inline)
        .count();

    // Header
    out.push(format!(
        "# {} | {} | {}L | {} symbols | {} imports | {} comments",
        file_name,
        title,
        total_lines,
        defs.len(),
        imports.len(),
        comment_count
    ));
    out.push(format!("> Path: `{}`", path.display()));
    if !maps.file_description.is_empty() {
        out.push(format!("> {}", maps.file_description));
    }
    out.push(String::new());

    // Imports
    if !imports.is_empty() {
        out.push("## Imports".to_string());
        out.push("```".to_string());
        out.extend(imports.iter().map(|imp| imp.first_line().trim().to_string()));
        out.push("```".to_string());
        out.push(String::new());
    }

    let decorators: HashMap<usize, &str> = elements
        .iter()
        .filter(|e| e.kind == ElementKind::Decorator)
        .map(|e| (e.line_start, e.first_line().trim()))
        .collect();

    // children attach to the first enclosing top-level element with their
    // parent's name; anything left over is rendered at top level
    let mut children: HashMap<usize, Vec<&Element>> = HashMap::new();
    let mut top_level: Vec<usize> = Vec::new();
    for (idx, elem) in defs.iter().copied().enumerate() {
        let parent = elem.parent_name.as_deref().filter(|_| elem.depth > 0).and_then(|name| {
            defs.iter().position(|top| {
                top.depth == 0
                    && top.display_name() == name
                    && top.line_start <= elem.line_start
                    && elem.line_end <= top.line_end
            })
        });
        match parent {
            Some(top) if top != idx => children.entry(top).or_default().push(elem),
            _ => top_level.push(idx),
        }
    }

    if !top_level.is_empty() {
        out.push("## Definitions".to_string());
        out.push(String::new());
        for idx in top_level {
            let kids = children.get(&idx).map(Vec::as_slice).unwrap_or(&[]);
            render_definition(&mut out, defs[idx], kids, &maps, &decorators);
        }
    }

    // Standalone comments, grouped when within two lines of each other
    if !maps.standalone.is_empty() {
        out.push("## Comments".to_string());
        let mut groups: Vec<Vec<&Element>> = Vec::new();
        for &comment in &maps.standalone {
            let continues = groups
                .last()
                .and_then(|group| group.last())
                .map_or(false, |prev| comment.line_start <= prev.line_end + 2);
            if continues {
                if let Some(group) = groups.last_mut() {
                    group.push(comment);
                    continue;
                }
            }
            groups.push(vec![comment]);
        }
        for group in groups {
            if let [single] = group.as_slice() {
                let text = comment_text(single, 150);
                if !text.is_empty() {
                    out.push(format!("- L{}: {}", single.line_start, text));
                }
                continue;
            }
            let texts: Vec<String> = group
                .iter()
                .map(|c| comment_text(c, 100))
                .filter(|t| !t.is_empty())
                .collect();
            if let (Some(first), Some(last), false) = (group.first(), group.last(), texts.is_empty())
            {
                out.push(format!(
                    "- L{}-{}: {}",
                    first.line_start,
                    last.line_end,
                    texts.join(" | ")
                ));
            }
        }
        out.push(String::new());
    }

    // Symbol index
    if !defs.is_empty() {
        out.push("## Symbol Index".to_string());
        out.push("|Symbol|Kind|Vis|Lines|Sig|".to_string());
        out.push("|---|---|---|---|---|".to_string());
        for elem in &defs {
            let mut name = elem.name.clone().unwrap_or_else(|| "?".to_string());
            if let Some(parent) = &elem.parent_name {
                name = format!("{}.{}", parent, name);
            }
            let vis = elem.visibility.map(|v| v.as_str()).unwrap_or("");
            let lines = if elem.line_start == elem.line_end {
                elem.line_start.to_string()
            } else {
                format!("{}-{}", elem.line_start, elem.line_end)
            };
            let sig = match &elem.signature {
                Some(sig) if shows_signature(elem.kind) && Some(sig) != elem.name.as_ref() => {
                    truncate(sig, 60)
                }
                _ => String::new(),
            };
            out.push(format!(
                "|`{}`|{}|{}|{}|{}|",
                name,
                elem.kind.short_label(),
                vis,
                lines,
                sig
            ));
        }
        out.push(String::new());
    }

    out.join("\n")
}

fn shows_signature(kind: ElementKind) -> bool {
    matches!(
        kind,
        ElementKind::Function
            | ElementKind::Method
            | ElementKind::Class
            | ElementKind::Struct
            | ElementKind::Trait
            | ElementKind::Interface
            | ElementKind::Impl
            | ElementKind::Enum
    )
}

fn render_definition(
    out: &mut Vec<String>,
    elem: &Element,
    kids: &[&Element],
    maps: &CommentMaps<'_>,
    decorators: &HashMap<usize, &str>,
) {
    let kind = elem.kind.short_label();
    let vis = visibility_suffix(elem.visibility);
    let doc_bullets = format_doc_fields_markdown(&elem.doc_fields);

    // tagged documentation wins over the raw comment above the definition
    let (doc_text, doc_lines, doc_line) = if let Some(brief) = elem
        .doc_fields
        .get("brief")
        .and_then(|values| values.first())
    {
        (truncate(brief, 150), Vec::new(), 0)
    } else if !doc_bullets.is_empty() {
        (String::new(), Vec::new(), 0)
    } else {
        match maps
            .doc_for_def
            .get(&elem.line_start)
            .and_then(|docs| docs.first())
        {
            Some(doc) => {
                let lines = comment_lines(doc);
                (truncate(&lines.join(" "), 150), lines, doc.line_start)
            }
            None => (String::new(), Vec::new(), 0),
        }
    };

    if elem.kind.is_single_line() || elem.line_start == elem.line_end {
        let mut line = format!(
            "- {} `{}`{} (L{})",
            kind,
            elem.first_line().trim(),
            vis,
            elem.line_start
        );
        if !doc_text.is_empty() {
            line.push_str(&format!(" - {}", doc_text));
        }
        out.push(line);
        out.extend(doc_bullets);
        return;
    }

    let sig = if elem.kind == ElementKind::Impl {
        elem.first_line()
            .trim()
            .trim_end_matches(|c: char| c == ' ' || c == '{')
            .to_string()
    } else {
        elem.signature
            .clone()
            .or_else(|| elem.name.clone())
            .unwrap_or_default()
    };
    let inherits = elem
        .inherits
        .as_deref()
        .map(|i| format!(" : {}", i))
        .unwrap_or_default();
    let decorator = elem
        .line_start
        .checked_sub(1)
        .and_then(|line| decorators.get(&line))
        .map(|d| format!(" `{}`", d))
        .unwrap_or_default();
    out.push(format!(
        "### {} `{}`{}{}{} ({})",
        kind,
        sig,
        inherits,
        vis,
        decorator,
        elem.location()
    ));

    if !doc_bullets.is_empty() {
        out.extend(doc_bullets);
    } else if doc_lines.len() > 1 {
        for (offset, line) in doc_lines.iter().take(5).enumerate() {
            out.push(format!("L{}> {}", doc_line + offset, line));
        }
        if doc_lines.len() > 5 {
            out.push(format!("L{}> ...", doc_line + 5));
        }
    } else if !doc_text.is_empty() && doc_line > 0 {
        out.push(format!("L{}> {}", doc_line, doc_text));
    }

    // a child's range covers the comment directly above it
    let child_ranges: Vec<(usize, usize)> = kids
        .iter()
        .map(|child| {
            let start = maps
                .doc_for_def
                .get(&child.line_start)
                .and_then(|docs| docs.first())
                .map_or(child.line_start, |doc| doc.line_start.min(child.line_start));
            (start, child.line_end)
        })
        .collect();
    render_body_annotations(out, elem, "", &child_ranges);

    for child in kids {
        let child_sig = child
            .signature
            .as_deref()
            .or(child.name.as_deref())
            .unwrap_or("");
        let child_bullets = format_doc_fields_markdown(&child.doc_fields);
        let mut line = format!(
            "- {} `{}`{} ({})",
            child.kind.short_label(),
            child_sig,
            visibility_suffix(child.visibility),
            child.location()
        );
        if child_bullets.is_empty() {
            if let Some(doc) = maps
                .doc_for_def
                .get(&child.line_start)
                .and_then(|docs| docs.first())
            {
                let text = comment_text(doc, 100);
                if !text.is_empty() {
                    line.push_str(&format!(" L{}> {}", doc.line_start, text));
                }
            }
        }
        out.push(line);
        out.extend(child_bullets.iter().map(|b| format!("  {}", b)));
        render_body_annotations(out, child, "  ", &[]);
    }

    out.push(String::new());
}

/// Cut `text` to `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

// =============================================================================
// Markdown Pack
// =============================================================================

/// Outcome of rendering several files into one Markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownPack {
    pub output: String,
    pub ok: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Analyze `paths` in parallel and join their Markdown in input order.
///
/// Missing files and unknown extensions are skipped, other failures are
/// counted. Errors when no file could be rendered.
pub fn generate_markdown(
    ctx: &AnalysisContext,
    paths: &[PathBuf],
    progress: bool,
) -> anyhow::Result<MarkdownPack> {
    let mut pack = MarkdownPack::default();
    let mut parts = Vec::new();

    for outcome in ctx.analyze_files_parallel(paths) {
        match &outcome.result {
            Ok(analysis) => {
                parts.push(render_markdown(analysis));
                pack.ok += 1;
                if progress {
                    write_status(FileStatus::Ok, &outcome.path, None);
                }
            }
            Err(AnalyzerError::FileNotFound(_)) => {
                pack.skipped += 1;
                if progress {
                    write_status(FileStatus::Skip, &outcome.path, Some("file not found"));
                }
            }
            Err(_) if outcome.is_skipped() => {
                pack.skipped += 1;
                if progress {
                    write_status(FileStatus::Skip, &outcome.path, Some("unsupported extension"));
                }
            }
            Err(e) => {
                pack.failed += 1;
                if progress {
                    write_status(FileStatus::Fail, &outcome.path, Some(&e.to_string()));
                }
            }
        }
    }

    if parts.is_empty() {
        anyhow::bail!("No valid source files processed");
    }
    if progress {
        write_batch_summary("Processed", pack.ok, pack.failed);
    }
    pack.output = parts.join("\n\n---\n\n");
    Ok(pack)
}

// =============================================================================
// Progress Lines
// =============================================================================

/// Per-file status in batch commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Ok,
    Skip,
    Fail,
}

/// Print a status line for one file to stderr.
pub fn write_status(status: FileStatus, path: &Path, detail: Option<&str>) {
    let tag = match status {
        FileStatus::Ok => "OK   ".green(),
        FileStatus::Skip => "SKIP ".yellow(),
        FileStatus::Fail => "FAIL ".red(),
    };
    let detail = detail
        .map(|d| format!(" {}", format!("({})", d).dimmed()))
        .unwrap_or_default();
    eprintln!("  {} {}{}", tag, path.display(), detail);
}

/// Print the closing `label: N ok, M failed` line of a batch to stderr.
pub fn write_batch_summary(label: &str, ok: usize, failed: usize) {
    let failed_text = format!("{} failed", failed);
    let failed_text = if failed > 0 {
        failed_text.red()
    } else {
        failed_text.dimmed()
    };
    eprintln!(
        "\n  {}: {} ok, {}",
        label.bold(),
        ok.to_string().green(),
        failed_text
    );
}
