//! Source compression for tight context windows.
//!
//! Removes comments, blank lines and surrounding whitespace while keeping
//! the code readable: indentation survives for languages where it carries
//! meaning, and a shebang on the first line is kept. Comment detection goes
//! through the same [`Lexer`] as the scanner, so both agree on what is a
//! comment in every dialect.

use std::path::{Path, PathBuf};

use crate::analysis::languages::{detect_language, language_table, LanguageSpec};
use crate::analysis::lexer::{Lexer, Segment};
use crate::analysis::read_source;
use crate::error::AnalyzerError;
use crate::report::{write_batch_summary, write_status, FileStatus};

/// One kept line: original line number and compressed text.
type Entry = (usize, String);

/// Compress `source`, optionally prefixing each kept line with `N: `.
pub fn compress_source(
    source: &str,
    language: &str,
    line_numbers: bool,
) -> Result<String, AnalyzerError> {
    let spec = language_table().resolve(language)?;
    Ok(format_entries(&compress_entries(source, &spec), line_numbers))
}

/// Compress a file, detecting the language from its extension unless given.
pub fn compress_file<P: AsRef<Path>>(
    path: P,
    language: Option<&str>,
    line_numbers: bool,
) -> anyhow::Result<String> {
    let path = path.as_ref();
    let language = match language.or_else(|| detect_language(path)) {
        Some(language) => language,
        None => anyhow::bail!(
            "Cannot detect language for '{}'. Use --lang to specify explicitly.",
            path.display()
        ),
    };
    let source = read_source(path)?;
    Ok(compress_source(&source, language, line_numbers)?)
}

/// Outcome of compressing several files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressedBatch {
    /// Concatenated per-file blocks.
    pub output: String,
    pub ok: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Compress several files into one document.
///
/// Each file becomes a block headed by `@@@ {path} | {lang}` and its kept
/// line range. Missing files and unknown extensions are skipped, unreadable
/// files fail; neither stops the batch. Errors when nothing was processed.
pub fn compress_files(
    paths: &[PathBuf],
    line_numbers: bool,
    progress: bool,
) -> anyhow::Result<CompressedBatch> {
    let mut batch = CompressedBatch::default();
    let mut parts = Vec::new();

    for path in paths {
        if !path.is_file() {
            batch.skipped += 1;
            if progress {
                write_status(FileStatus::Skip, path, Some("not found"));
            }
            continue;
        }
        let Some(language) = detect_language(path) else {
            batch.skipped += 1;
            if progress {
                write_status(FileStatus::Skip, path, Some("unsupported extension"));
            }
            continue;
        };

        let compressed = read_source(path).and_then(|source| {
            let spec = language_table().resolve(language)?;
            Ok(compress_entries(&source, &spec))
        });
        match compressed {
            Ok(entries) => {
                let (first, last) = match (entries.first(), entries.last()) {
                    (Some(first), Some(last)) => (first.0, last.0),
                    _ => (0, 0),
                };
                parts.push(format!(
                    "@@@ {} | {}\n> Lines: {}-{}\n```\n{}\n```",
                    path.display(),
                    language,
                    first,
                    last,
                    format_entries(&entries, line_numbers)
                ));
                batch.ok += 1;
                if progress {
                    write_status(FileStatus::Ok, path, None);
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to compress file");
                batch.failed += 1;
                if progress {
                    write_status(FileStatus::Fail, path, Some(&e.to_string()));
                }
            }
        }
    }

    if parts.is_empty() {
        anyhow::bail!("No valid source files processed");
    }
    if progress {
        write_batch_summary("Compressed", batch.ok, batch.failed);
    }
    batch.output = parts.join("\n\n");
    Ok(batch)
}

fn compress_entries(source: &str, spec: &LanguageSpec) -> Vec<Entry> {
    let lines: Vec<&str> = source.lines().collect();
    let mut entries: Vec<Entry> = Vec::new();
    let mut first = 0;

    if let Some(line) = lines.first() {
        if line.trim_start().starts_with("#!") {
            entries.push((1, line.trim().to_string()));
            first = 1;
        }
    }

    // comments can split a line into several code fragments
    let mut current: Option<Entry> = None;
    for segment in Lexer::new(spec).segment(&lines[first..], first + 1) {
        let Segment::Code { line, text } = segment else {
            continue;
        };
        if let Some((number, joined)) = current.as_mut() {
            if *number == line {
                joined.push_str(&text);
                continue;
            }
        }
        if let Some(done) = current.replace((line, text)) {
            push_entry(&mut entries, done, spec.indent_significant);
        }
    }
    if let Some(done) = current {
        push_entry(&mut entries, done, spec.indent_significant);
    }
    entries
}

fn push_entry(entries: &mut Vec<Entry>, (line, text): Entry, keep_indent: bool) {
    let text = if keep_indent {
        text.trim_end()
    } else {
        text.trim()
    };
    if !text.is_empty() {
        entries.push((line, text.to_string()));
    }
}

fn format_entries(entries: &[Entry], line_numbers: bool) -> String {
    entries
        .iter()
        .map(|(line, text)| {
            if line_numbers {
                format!("{}: {}", line, text)
            } else {
                text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
