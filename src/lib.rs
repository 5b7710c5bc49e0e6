//! Srclens - lightweight multi-language source analyzer.
//!
//! Srclens finds the structure of a source file (functions, classes,
//! imports, comments and friends) with per-language line rules instead of
//! a parser, then enriches each element with names, signatures,
//! documentation and nesting. The result is meant to be cheap to produce
//! and cheap to read, for people and for language models alike.
//!
//! # Architecture
//!
//! - `analysis`: language tables, scanner, block resolver and enrichment
//! - `compress`: comment and blank-line stripping
//! - `search`: construct search by kind and name
//! - `report`: plain, Markdown and JSON rendering
//! - `config`: YAML configuration
//! - `cli`: command-line front end
//!
//! # Adding a New Language
//!
//! See `src/analysis/languages/` for examples. Add a module whose `spec()`
//! returns a `LanguageSpec` and list it in `build_language_specs`.
//!
//! # Example
//!
//! ```no_run
//! let mut elements = srclens::analyze("src/main.rs", "rust")?;
//! srclens::enrich(&mut elements, "rust", Some(std::path::Path::new("src/main.rs")))?;
//! for elem in &elements {
//!     println!("{} {} {}", elem.kind.label(), elem.display_name(), elem.location());
//! }
//! # Ok::<(), srclens::AnalyzerError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod compress;
pub mod config;
pub mod error;
pub mod report;
pub mod search;

pub use analysis::{
    analyze, enrich, parse_doc_comment, supported_languages, AnalysisContext, DocFields,
    Element, ElementKind, FileAnalysis, LanguageSpec, SourceAnalyzer, Visibility,
};
pub use compress::{compress_file, compress_source};
pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
