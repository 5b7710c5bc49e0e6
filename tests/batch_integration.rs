//! Integration tests for the multi-file tools: compression, construct
//! search and the Markdown pack.

use std::fs;
use std::path::PathBuf;

use srclens::analysis::AnalysisContext;
use srclens::cli::collect_files;
use srclens::compress::{compress_file, compress_files};
use srclens::report::generate_markdown;
use srclens::search::find_constructs;
use srclens::AnalyzerConfig;
use tempfile::TempDir;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn fixture(name: &str) -> PathBuf {
    testdata_path().join("fixtures").join(name)
}

// =============================================================================
// Compression
// =============================================================================

#[test]
fn test_compress_python_fixture() {
    let out = compress_file(fixture("fixture_python.py"), None, true).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        &lines[..4],
        &[
            "1: #!/usr/bin/env python3",
            "7: import os",
            "8: import sys",
            "9: from pathlib import Path"
        ]
    );
    assert!(lines.contains(&"44:         if key in self.values:"));
    assert!(!out.contains("Check primary values first"));
    assert!(!out.contains("@param"));
    assert!(out.ends_with("448: MAX_USERS = 500"));
}

#[test]
fn test_compress_go_fixture_trims_and_strips() {
    let out = compress_file(fixture("fixture_go.go"), None, false).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "package main");
    assert!(lines.contains(&"type Server struct {"));
    assert!(lines.contains(&"Port int"));
    assert!(!out.contains("//"));
    assert!(lines.iter().all(|l| !l.is_empty() && l.trim() == *l));
}

#[test]
fn test_compress_files_mixed_batch() {
    let dir = TempDir::new().unwrap();
    let notes = dir.path().join("notes.txt");
    fs::write(&notes, "nothing here\n").unwrap();

    let paths = vec![
        fixture("fixture_rust.rs"),
        notes,
        dir.path().join("missing.py"),
        fixture("fixture_c.c"),
    ];
    let batch = compress_files(&paths, false, false).unwrap();
    assert_eq!((batch.ok, batch.skipped, batch.failed), (2, 2, 0));

    let headers: Vec<&str> = batch
        .output
        .lines()
        .filter(|l| l.starts_with("@@@ "))
        .collect();
    assert_eq!(headers.len(), 2);
    assert!(headers[0].ends_with("fixture_rust.rs | rust"));
    assert!(headers[1].ends_with("fixture_c.c | c"));
}

// =============================================================================
// Construct Search
// =============================================================================

#[test]
fn test_find_classes_across_languages() {
    let ctx = AnalysisContext::default();
    let paths = vec![fixture("fixture_python.py"), fixture("fixture_go.go")];
    let result = find_constructs(&ctx, &paths, "class", "Processor$", true, false).unwrap();

    assert_eq!(result.matches, 2);
    assert_eq!((result.ok, result.skipped, result.failed), (1, 1, 0));
    assert!(result.output.contains("### CLASS: `AbstractProcessor`"));
    assert!(result.output.contains("### CLASS: `ConcreteProcessor`"));
    assert!(result.output.contains("- Lines: 191-"));
    assert!(result.output.contains("206:             text = data.decode(\"utf-8\")"));
}

#[test]
fn test_find_go_structs() {
    let ctx = AnalysisContext::default();
    let result = find_constructs(
        &ctx,
        &[fixture("fixture_go.go")],
        "STRUCT",
        "^Server$",
        false,
        false,
    )
    .unwrap();
    assert_eq!(result.matches, 1);
    assert!(result
        .output
        .contains("### STRUCT: `Server`\n- Signature: `type Server struct`\n- Lines: 39-44\n```\ntype Server struct {"));
}

#[test]
fn test_find_nothing_matched() {
    let ctx = AnalysisContext::default();
    let err = find_constructs(
        &ctx,
        &[fixture("fixture_go.go")],
        "FUNCTION",
        "^NoSuchFunction$",
        false,
        false,
    )
    .unwrap_err();
    assert!(err.to_string().contains("No constructs found"));
    assert!(err.to_string().contains("- Go: "));
}

// =============================================================================
// Markdown Pack
// =============================================================================

#[test]
fn test_pack_keeps_input_order() {
    let ctx = AnalysisContext::default();
    let paths = vec![
        fixture("fixture_java.java"),
        PathBuf::from("/nonexistent/gone.rs"),
        fixture("fixture_go.go"),
    ];
    let pack = generate_markdown(&ctx, &paths, false).unwrap();

    assert_eq!((pack.ok, pack.skipped, pack.failed), (2, 1, 0));
    let parts: Vec<&str> = pack.output.split("\n\n---\n\n").collect();
    assert_eq!(parts.len(), 2);
    assert!(parts[0].starts_with("# fixture_java.java | Java | 380L |"));
    assert!(parts[1].starts_with("# fixture_go.go | Go | 278L |"));
    assert!(parts[1].contains("## Symbol Index"));
}

#[test]
fn test_pack_nothing_processed() {
    let ctx = AnalysisContext::default();
    let err = generate_markdown(&ctx, &[PathBuf::from("/nonexistent/a.go")], false).unwrap_err();
    assert!(err.to_string().contains("No valid source files processed"));
}

// =============================================================================
// Directory Expansion
// =============================================================================

#[test]
fn test_collect_fixture_directory() {
    let files = collect_files(&[testdata_path().join("fixtures")], &AnalyzerConfig::default())
        .unwrap();
    let names: Vec<String> = files
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "fixture_c.c",
            "fixture_cpp.cpp",
            "fixture_go.go",
            "fixture_java.java",
            "fixture_python.py",
            "fixture_rust.rs"
        ]
    );
}
