//! Integration tests for the analyzer against real source fixtures.
//!
//! These tests run the scanner and the enrichment pipeline end to end on
//! the files under `testdata/fixtures/` and on small inline sources.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use srclens::analysis::{language_table, TRUNCATION_MARKER};
use srclens::{
    analyze, enrich, parse_doc_comment, supported_languages, AnalyzerError, Element,
    ElementKind, SourceAnalyzer, Visibility,
};
use tempfile::TempDir;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn fixture(name: &str) -> PathBuf {
    testdata_path().join("fixtures").join(name)
}

const FIXTURES: &[(&str, &str)] = &[
    ("fixture_c.c", "c"),
    ("fixture_cpp.cpp", "cpp"),
    ("fixture_go.go", "go"),
    ("fixture_java.java", "java"),
    ("fixture_python.py", "python"),
    ("fixture_rust.rs", "rust"),
];

fn enriched_fixture(name: &str, language: &str) -> Vec<Element> {
    let path = fixture(name);
    let mut elements = analyze(&path, language).expect("fixture should analyze");
    enrich(&mut elements, language, Some(path.as_path())).expect("fixture should enrich");
    elements
}

fn named<'e>(elements: &'e [Element], kind: ElementKind, name: &str) -> &'e Element {
    elements
        .iter()
        .find(|e| e.kind == kind && e.name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("no {} named {}", kind, name))
}

// =============================================================================
// Language Table
// =============================================================================

#[test]
fn test_aliases_share_spec_with_canonical_key() {
    let table = language_table();
    for spec in table.languages() {
        for alias in spec.aliases {
            let aliased = table.get(alias).expect("alias should resolve");
            assert!(
                Arc::ptr_eq(aliased, &spec),
                "alias {} is not the {} spec",
                alias,
                spec.name
            );
        }
    }
}

#[test]
fn test_supported_languages_sorted_and_unique() {
    let keys = supported_languages();
    assert!(keys.len() >= 20);
    let mut sorted = keys.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(keys, sorted);
    assert!(keys.contains(&"python"));
    assert!(!keys.contains(&"py"));
}

#[test]
fn test_empty_and_whitespace_files_for_every_key() {
    let dir = TempDir::new().unwrap();
    let empty = dir.path().join("empty");
    let blank = dir.path().join("blank");
    fs::write(&empty, "").unwrap();
    fs::write(&blank, "  \n\t\n\n").unwrap();

    for key in language_table().keys() {
        assert!(analyze(&empty, key).unwrap().is_empty(), "{} on empty", key);
        assert!(analyze(&blank, key).unwrap().is_empty(), "{} on blank", key);
    }
}

#[test]
fn test_unsupported_language_error() {
    let err = analyze(fixture("fixture_go.go"), "fortran").unwrap_err();
    let AnalyzerError::UnsupportedLanguage { language, supported } = &err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(language, "fortran");
    assert_eq!(supported.len(), supported_languages().len());
}

// =============================================================================
// Scanner Invariants
// =============================================================================

#[test]
fn test_fixture_elements_sorted_and_bounded() {
    for (name, language) in FIXTURES {
        let path = fixture(name);
        let total = fs::read_to_string(&path).unwrap().lines().count();
        let elements = analyze(&path, language).unwrap();
        assert!(!elements.is_empty(), "{} produced nothing", name);

        for pair in elements.windows(2) {
            assert!(pair[0].line_start <= pair[1].line_start, "{} not sorted", name);
        }
        for elem in &elements {
            assert!(elem.line_start >= 1, "{}: {:?}", name, elem);
            assert!(elem.line_end >= elem.line_start, "{}: {:?}", name, elem);
            assert!(elem.line_end <= total, "{}: {:?}", name, elem);
            assert!(!elem.extract.is_empty(), "{}: {:?}", name, elem);
        }
    }
}

#[test]
fn test_fixture_long_extracts_are_marked() {
    for (name, language) in FIXTURES {
        for elem in analyze(fixture(name), language).unwrap() {
            let lines: Vec<&str> = elem.extract.lines().collect();
            assert!(lines.len() <= 5, "{}: {:?}", name, elem);
            if elem.line_count() > 5 {
                assert_eq!(lines.last().copied(), Some(TRUNCATION_MARKER), "{}: {:?}", name, elem);
            }
        }
    }
}

#[test]
fn test_single_line_inputs() {
    let dir = TempDir::new().unwrap();

    let comment = dir.path().join("only.sh");
    fs::write(&comment, "# Just a comment\n").unwrap();
    let elements = analyze(&comment, "shell").unwrap();
    assert_eq!(elements.len(), 1);
    assert!(elements[0].kind.is_comment());
    assert_eq!((elements[0].line_start, elements[0].line_end), (1, 1));

    let decl = dir.path().join("hello.c");
    fs::write(&decl, "void hello() {}\n").unwrap();
    let elements = analyze(&decl, "c").unwrap();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].kind, ElementKind::Function);
    assert!(elements[0].name.as_deref().unwrap_or_default().contains("hello"));
    assert_eq!(elements[0].line_end, elements[0].line_start);
}

#[test]
fn test_prototype_without_brace_ends_on_its_line() {
    let analyzer = SourceAnalyzer::new();
    let elements = analyzer
        .analyze_source("void f();\n\nint main(void) {\n    return 0;\n}\n", "c")
        .unwrap();
    let proto = &elements[0];
    assert_eq!(proto.kind, ElementKind::Function);
    assert_eq!((proto.line_start, proto.line_end), (1, 1));
    assert_eq!((elements[1].line_start, elements[1].line_end), (3, 5));
}

// =============================================================================
// Go Fixture
// =============================================================================

#[test]
fn test_go_types_and_methods() {
    let elements = enriched_fixture("fixture_go.go", "go");

    let server = named(&elements, ElementKind::Struct, "Server");
    assert_eq!((server.line_start, server.line_end), (39, 44));
    assert_eq!(server.visibility, Some(Visibility::Public));

    let handler = named(&elements, ElementKind::Interface, "Handler");
    assert_eq!((handler.line_start, handler.line_end), (67, 70));

    let my_int = named(&elements, ElementKind::TypeAlias, "MyInt");
    assert_eq!(my_int.line_start, 82);

    let start = named(&elements, ElementKind::Method, "Start");
    assert_eq!((start.line_start, start.line_end), (119, 128));
    assert_eq!(start.signature.as_deref(), Some("func (s *Server) Start() error"));
    assert!(start.parent_name.is_none());
}

#[test]
fn test_go_body_scan() {
    let elements = enriched_fixture("fixture_go.go", "go");
    let start = named(&elements, ElementKind::Method, "Start");

    let exits: Vec<usize> = start.exit_points.iter().map(|e| e.line).collect();
    assert_eq!(exits, vec![124, 127]);
    assert_eq!(start.exit_points[1].text, "return nil");
    assert!(start
        .body_comments
        .iter()
        .any(|c| c.line_start == 122 && c.text == "Validate port before binding"));
}

#[test]
fn test_go_doc_from_nearest_preceding_comment() {
    let elements = enriched_fixture("fixture_go.go", "go");
    let divide = named(&elements, ElementKind::Function, "Divide");
    assert_eq!(divide.signature.as_deref(), Some("func Divide(a, b int) (int, int, error)"));
    assert_eq!(
        divide.doc_fields["return"],
        vec!["Quotient and remainder, or error if b is zero."]
    );
    assert!(!divide.doc_fields.contains_key("param"));
}

// =============================================================================
// Python Fixture
// =============================================================================

#[test]
fn test_python_classes_and_methods() {
    let elements = enriched_fixture("fixture_python.py", "python");

    let decorator = named(&elements, ElementKind::Decorator, "dataclass");
    assert_eq!(decorator.line_start, 25);
    let config = named(&elements, ElementKind::Class, "Config");
    assert_eq!(config.line_start, 26);

    let get = named(&elements, ElementKind::Function, "get");
    assert_eq!(get.parent_name.as_deref(), Some("Config"));
    assert_eq!(get.depth, 1);
    let exits: Vec<&str> = get.exit_points.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(exits, vec!["return self.values[key]", "return default"]);

    let concrete = named(&elements, ElementKind::Class, "ConcreteProcessor");
    assert_eq!(concrete.inherits.as_deref(), Some("AbstractProcessor"));
    assert_eq!(concrete.depth, 0);

    let inner = named(&elements, ElementKind::Function, "describe");
    assert_eq!(inner.parent_name.as_deref(), Some("InnerHelper"));
}

#[test]
fn test_python_docstring_and_process_exit() {
    let elements = enriched_fixture("fixture_python.py", "python");

    let module_doc = elements
        .iter()
        .find(|e| e.line_start == 3)
        .expect("module docstring");
    assert_eq!(module_doc.kind, ElementKind::CommentMulti);
    assert_eq!(module_doc.line_end, 6);

    let handler = named(&elements, ElementKind::Function, "exception_handling_example");
    assert!(handler
        .exit_points
        .iter()
        .any(|e| e.line == 436 && e.text == "sys.exit(1)"));
    assert!(handler
        .body_comments
        .iter()
        .any(|c| c.text == "File does not exist"));
}

#[test]
fn test_python_visibility_conventions() {
    let elements = enriched_fixture("fixture_python.py", "python");
    let post_init = named(&elements, ElementKind::Function, "__post_init__");
    assert_eq!(post_init.visibility, Some(Visibility::Public));
    let max_batch = named(&elements, ElementKind::Variable, "MAX_BATCH");
    assert_eq!(max_batch.line_start, 444);
    assert_eq!(max_batch.extract, "MAX_BATCH = 64");
}

// =============================================================================
// Documentation Association
// =============================================================================

#[test]
fn test_inline_postfix_doc_wins_over_preceding() {
    let analyzer = SourceAnalyzer::new();
    let src = "/** @brief Preceding. */\nint depth; /**< @brief Inline. */\n";
    let mut elements = analyzer.analyze_source(src, "c").unwrap();
    analyzer.enrich_source(&mut elements, "c", src).unwrap();

    let depth = named(&elements, ElementKind::Variable, "depth");
    assert_eq!(depth.doc_fields["brief"], vec!["Inline."]);
}

#[test]
fn test_doc_parser_contract() {
    assert!(parse_doc_comment("").is_empty());
    assert!(parse_doc_comment("/* just words */").is_empty());

    let fields = parse_doc_comment("/**\n * @brief Opens   a file.\n * @param path Where to look.\n */");
    assert_eq!(fields.len(), 2);
    assert_eq!(fields["brief"], vec!["Opens a file."]);
    assert_eq!(fields["param"], vec!["path Where to look."]);
}

// =============================================================================
// Hierarchy
// =============================================================================

#[test]
fn test_nested_containers_pick_tightest_parent() {
    let analyzer = SourceAnalyzer::new();
    let src = "\
namespace app {
class Outer {
    class Inner {
        void run() {
        }
    };
};
}
";
    let mut elements = analyzer.analyze_source(src, "cpp").unwrap();
    analyzer.enrich_source(&mut elements, "cpp", src).unwrap();

    let run = named(&elements, ElementKind::Function, "run");
    assert_eq!(run.parent_name.as_deref(), Some("Inner"));
    assert_eq!(run.depth, 1);

    let containers: HashSet<&str> = elements
        .iter()
        .filter(|e| e.kind.is_container())
        .filter_map(|e| e.name.as_deref())
        .collect();
    assert_eq!(containers, HashSet::from(["app", "Outer", "Inner"]));
}
