//! Regex-driven source analysis.
//!
//! This module turns a source file into an ordered list of [`Element`]s
//! without building a syntax tree. Each language is a table of comment and
//! string delimiters plus recognition rules; everything downstream works
//! from that table.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────┐    ┌─────────────┐    ┌──────────────┐
//! │ Source text │───▶│ Lexer   │───▶│ LineScanner │───▶│ Element list │
//! └─────────────┘    │(comment │    │ + Block     │    └──────────────┘
//!                    │ /code)  │    │   Resolver  │           │
//!                    └─────────┘    └─────────────┘           ▼
//!                                                     ┌──────────────┐
//!                                                     │ Enricher     │
//!                                                     │ (names, docs,│
//!                                                     │  hierarchy)  │
//!                                                     └──────────────┘
//! ```
//!
//! The language table is built once and shared; every analysis call owns its
//! element list, so files can be analyzed in parallel without coordination.

pub mod blocks;
mod context;
pub mod doc;
pub mod element;
pub mod enrich;
pub mod languages;
pub mod lexer;
pub mod scanner;

use std::fs;
use std::path::Path;
use std::sync::Arc;

pub use context::{AnalysisContext, FileAnalysis, FileOutcome};
pub use doc::{format_doc_fields_markdown, parse_doc_comment, DocFields};
pub use element::{
    format_location, BodyComment, Element, ElementKind, ExitPoint, Visibility, TRUNCATION_MARKER,
};
pub use enrich::Enricher;
pub use languages::{
    detect_language, language_for_extension, language_table, supported_languages, LanguageSpec,
};
pub use scanner::LineScanner;

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;

/// Entry point for analyzing and enriching source files.
#[derive(Debug, Clone, Default)]
pub struct SourceAnalyzer {
    config: AnalyzerConfig,
}

impl SourceAnalyzer {
    /// Create an analyzer with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Resolve a language key, failing with the supported list.
    pub fn language(&self, key: &str) -> Result<Arc<LanguageSpec>, AnalyzerError> {
        language_table().resolve(key)
    }

    /// Sorted canonical language keys.
    pub fn supported_languages(&self) -> Vec<&'static str> {
        supported_languages()
    }

    /// Scan a file into raw elements.
    ///
    /// The language is resolved before the file is touched, so an unknown
    /// key is reported even for a missing file.
    pub fn analyze<P: AsRef<Path>>(
        &self,
        path: P,
        language: &str,
    ) -> Result<Vec<Element>, AnalyzerError> {
        let path = path.as_ref();
        let spec = self.language(language)?;
        let source = read_source(path)?;
        let elements = self.scan(&spec, &source);
        tracing::debug!(
            path = %path.display(),
            language = spec.name,
            elements = elements.len(),
            "analyzed file"
        );
        Ok(elements)
    }

    /// Scan in-memory source text into raw elements.
    pub fn analyze_source(
        &self,
        source: &str,
        language: &str,
    ) -> Result<Vec<Element>, AnalyzerError> {
        let spec = self.language(language)?;
        Ok(self.scan(&spec, source))
    }

    /// Run the enrichment passes over `elements`.
    ///
    /// Without `path`, body scanning and documentation association are
    /// skipped. An unreadable `path` skips them too, with a warning.
    pub fn enrich(
        &self,
        elements: &mut [Element],
        language: &str,
        path: Option<&Path>,
    ) -> Result<(), AnalyzerError> {
        let spec = self.language(language)?;
        let enricher = Enricher::new(&spec, &self.config);

        let source = match path {
            Some(path) => match read_source(path) {
                Ok(source) => Some(source),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping body and doc passes");
                    None
                }
            },
            None => None,
        };

        match source {
            Some(source) => {
                let lines: Vec<&str> = source.lines().collect();
                enricher.run(elements, Some(&lines[..]));
            }
            None => enricher.run::<&str>(elements, None),
        }
        Ok(())
    }

    /// Run every enrichment pass against in-memory source text.
    pub fn enrich_source(
        &self,
        elements: &mut [Element],
        language: &str,
        source: &str,
    ) -> Result<(), AnalyzerError> {
        let spec = self.language(language)?;
        let lines: Vec<&str> = source.lines().collect();
        Enricher::new(&spec, &self.config).run(elements, Some(&lines[..]));
        Ok(())
    }

    /// Analyze and fully enrich a file, reading it once.
    pub fn analyze_enriched<P: AsRef<Path>>(
        &self,
        path: P,
        language: &str,
    ) -> Result<Vec<Element>, AnalyzerError> {
        let path = path.as_ref();
        let spec = self.language(language)?;
        let source = read_source(path)?;
        let mut elements = self.scan(&spec, &source);
        let lines: Vec<&str> = source.lines().collect();
        Enricher::new(&spec, &self.config).run(&mut elements, Some(&lines[..]));
        tracing::debug!(
            path = %path.display(),
            language = spec.name,
            elements = elements.len(),
            "analyzed and enriched file"
        );
        Ok(elements)
    }

    fn scan(&self, spec: &LanguageSpec, source: &str) -> Vec<Element> {
        if source.trim().is_empty() {
            return Vec::new();
        }
        let lines: Vec<&str> = source.lines().collect();
        LineScanner::new(spec, &self.config).scan(&lines)
    }
}

/// Read a file as text, replacing invalid UTF-8 instead of failing.
pub fn read_source(path: &Path) -> Result<String, AnalyzerError> {
    if path.is_dir() {
        return Err(AnalyzerError::IsADirectory(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|e| AnalyzerError::from_io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Analyze `path` with the default configuration.
pub fn analyze<P: AsRef<Path>>(path: P, language: &str) -> Result<Vec<Element>, AnalyzerError> {
    SourceAnalyzer::default().analyze(path, language)
}

/// Enrich `elements` with the default configuration.
pub fn enrich(
    elements: &mut [Element],
    language: &str,
    path: Option<&Path>,
) -> Result<(), AnalyzerError> {
    SourceAnalyzer::default().enrich(elements, language, path)
}
