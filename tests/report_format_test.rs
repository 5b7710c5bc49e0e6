//! Tests for the plain, JSON and Markdown output formats.
//!
//! These run the full analysis of a fixture and check the rendered text,
//! so a change in either the analyzer or a renderer shows up here.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use srclens::analysis::{AnalysisContext, FileAnalysis};
use srclens::report::{render_json, render_markdown, render_plain, ListingFilter};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn analyzed(name: &str) -> Arc<FileAnalysis> {
    let ctx = AnalysisContext::default();
    ctx.analyze_file(testdata_path().join("fixtures").join(name), None)
        .expect("fixture should analyze")
}

// =============================================================================
// Plain Format
// =============================================================================

#[test]
fn test_plain_comments_only() {
    let analysis = analyzed("fixture_go.go");
    let out = render_plain(&analysis.elements, ListingFilter::CommentsOnly);
    assert!(out.starts_with(
        "     1 | [COMMENT] L1\n       | // Single line comment\n     2 | [COMMENT] L2-3\n"
    ));
    assert!(!out.contains("[STRUCT]"));
}

#[test]
fn test_plain_definitions_only() {
    let analysis = analyzed("fixture_go.go");
    let out = render_plain(&analysis.elements, ListingFilter::DefinitionsOnly);
    assert!(out.contains("    39 | [STRUCT] Server L39-44\n       | type Server struct {"));
    assert!(!out.contains("[COMMENT]"));
}

// =============================================================================
// JSON Format
// =============================================================================

#[test]
fn test_json_structure() {
    let analysis = analyzed("fixture_go.go");
    let json = render_json(&analysis, ListingFilter::DefinitionsOnly).unwrap();
    let report: Value = serde_json::from_str(&json).expect("should be valid JSON");

    assert_eq!(report["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(report["language"], "go");
    assert_eq!(report["total_lines"], 278);
    assert!(report["file"].as_str().unwrap().ends_with("fixture_go.go"));

    let elements = report["elements"].as_array().unwrap();
    assert!(elements
        .iter()
        .all(|e| !e["kind"].as_str().unwrap().starts_with("comment")));

    let server = elements
        .iter()
        .find(|e| e["name"] == "Server")
        .expect("Server in JSON");
    assert_eq!(server["kind"], "struct");
    assert_eq!(server["line_start"], 39);
    assert_eq!(server["line_end"], 44);
    assert_eq!(server["visibility"], "public");
    assert_eq!(server["signature"], "type Server struct");
    assert!(server.get("rule").is_none());
}

// =============================================================================
// Markdown Format
// =============================================================================

#[test]
fn test_markdown_header_and_imports() {
    let analysis = analyzed("fixture_go.go");
    let md = render_markdown(&analysis);
    let lines: Vec<&str> = md.lines().collect();

    assert!(lines[0].starts_with("# fixture_go.go | Go | 278L | "));
    assert!(lines[1].starts_with("> Path: `"));
    assert_eq!(lines[2], "> Single line comment");
    assert!(md.contains("## Imports\n```\nimport (\n```"));
}

#[test]
fn test_markdown_definitions_and_annotations() {
    let analysis = analyzed("fixture_go.go");
    let md = render_markdown(&analysis);

    assert!(md.contains(
        "### struct `type Server struct` (L39-44)\nL37> Server represents an HTTP server with host and port configuration."
    ));
    assert!(md.contains("### method `func (s *Server) Start() error` (L119-128)"));
    assert!(md.contains("L122> Validate port before binding"));
    assert!(md.contains("L127> `return nil`"));
}

#[test]
fn test_markdown_symbol_index() {
    let analysis = analyzed("fixture_go.go");
    let md = render_markdown(&analysis);

    assert!(md.contains("## Symbol Index\n|Symbol|Kind|Vis|Lines|Sig|\n|---|---|---|---|---|"));
    assert!(md.contains("|`Server`|struct|pub|39-44|type Server struct|"));
    assert!(md.contains("|`Divide`|fn|pub|176-181|func Divide(a, b int) (int, int, error)|"));
}

#[test]
fn test_markdown_python_children() {
    let analysis = analyzed("fixture_python.py");
    let md = render_markdown(&analysis);

    assert!(md.contains("### class `class ConcreteProcessor(AbstractProcessor)` : AbstractProcessor"));
    assert!(md.contains("|`Config.get`|fn|pub|36-48|def get(self, key: str, default: str = \"\") -> str|"));
}
