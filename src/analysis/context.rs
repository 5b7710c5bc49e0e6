//! Analysis context for batches of files.
//!
//! The AnalysisContext provides:
//! - Language detection from file extensions
//! - Caching of enriched results, keyed by path
//! - Parallel analysis with per-file outcomes in input order

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::analysis::languages::detect_language;
use crate::analysis::{read_source, Element, SourceAnalyzer};
use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;

/// The enriched analysis of one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileAnalysis {
    /// Path as given by the caller.
    pub path: PathBuf,
    /// Canonical language key.
    pub language: &'static str,
    /// Display name of the language.
    pub title: &'static str,
    /// Physical line count of the source.
    pub total_lines: usize,
    pub elements: Vec<Element>,
    /// Source text the elements were taken from.
    #[serde(skip)]
    pub source: String,
}

impl FileAnalysis {
    /// Source lines, 0-indexed.
    pub fn lines(&self) -> Vec<&str> {
        self.source.lines().collect()
    }

    /// The file name, or the whole path when there is none.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Result of analyzing one file within a batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<Arc<FileAnalysis>, AnalyzerError>,
}

impl FileOutcome {
    /// The file was not attempted because its language is unknown.
    pub fn is_skipped(&self) -> bool {
        matches!(self.result, Err(AnalyzerError::UnsupportedLanguage { .. }))
    }
}

/// Analysis context for a set of files.
///
/// Results are cached so that a file referenced twice in a batch is read
/// and scanned once.
pub struct AnalysisContext {
    analyzer: SourceAnalyzer,
    /// Cached analyses, keyed by the path as given.
    cache: RwLock<HashMap<PathBuf, Arc<FileAnalysis>>>,
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl AnalysisContext {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            analyzer: SourceAnalyzer::with_config(config),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn analyzer(&self) -> &SourceAnalyzer {
        &self.analyzer
    }

    /// Analyze and enrich a file, returning the cached result when present.
    ///
    /// `language` overrides extension-based detection.
    pub fn analyze_file<P: AsRef<Path>>(
        &self,
        path: P,
        language: Option<&str>,
    ) -> Result<Arc<FileAnalysis>, AnalyzerError> {
        let path = path.as_ref();

        if let Ok(cache) = self.cache.read() {
            if let Some(analysis) = cache.get(path) {
                return Ok(Arc::clone(analysis));
            }
        }

        // an undetectable extension still goes through resolve() so the
        // error lists the supported languages
        let key = match language.or_else(|| detect_language(path)) {
            Some(key) => key.to_string(),
            None => path
                .extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
        };

        let spec = self.analyzer.language(&key)?;
        let source = read_source(path)?;
        let mut elements = self.analyzer.analyze_source(&source, spec.name)?;
        self.analyzer
            .enrich_source(&mut elements, spec.name, &source)?;

        let analysis = Arc::new(FileAnalysis {
            path: path.to_path_buf(),
            language: spec.name,
            title: spec.title,
            total_lines: source.lines().count(),
            elements,
            source,
        });
        tracing::debug!(
            path = %path.display(),
            language = analysis.language,
            elements = analysis.elements.len(),
            "analyzed file"
        );

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(path.to_path_buf(), Arc::clone(&analysis));
        }
        Ok(analysis)
    }

    /// Analyze multiple files in parallel.
    ///
    /// Uses rayon for parallel processing. Outcomes come back in input order;
    /// failures are logged and returned alongside successes.
    pub fn analyze_files_parallel(&self, paths: &[PathBuf]) -> Vec<FileOutcome> {
        use rayon::prelude::*;

        paths
            .par_iter()
            .map(|path| {
                let result = self.analyze_file(path, None);
                if let Err(e) = &result {
                    tracing::warn!(path = %path.display(), error = %e, "failed to analyze file");
                }
                FileOutcome {
                    path: path.clone(),
                    result,
                }
            })
            .collect()
    }

    /// Cached analysis for a file, if it has been analyzed.
    pub fn cached<P: AsRef<Path>>(&self, path: P) -> Option<Arc<FileAnalysis>> {
        let cache = self.cache.read().ok()?;
        cache.get(path.as_ref()).cloned()
    }

    /// Get all analyzed file paths, sorted.
    pub fn analyzed_files(&self) -> Vec<PathBuf> {
        let Ok(cache) = self.cache.read() else {
            return Vec::new();
        };
        let mut files: Vec<_> = cache.keys().cloned().collect();
        files.sort();
        files
    }

    /// Clear the cache.
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ElementKind;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_analyze_go_file() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("main.go");
        fs::write(
            &file_path,
            r#"package main

// main starts the program.
func main() {
    println("hello")
}

func helper() int {
    return 42
}
"#,
        )
        .unwrap();

        let ctx = AnalysisContext::default();
        let analysis = ctx.analyze_file(&file_path, None).unwrap();

        assert_eq!(analysis.language, "go");
        assert_eq!(analysis.title, "Go");
        assert_eq!(analysis.total_lines, 10);
        let functions: Vec<_> = analysis
            .elements
            .iter()
            .filter(|e| e.kind == ElementKind::Function)
            .collect();
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[1].exit_points[0].text, "return 42");
    }

    #[test]
    fn test_caching() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("main.go");
        fs::write(&file_path, "package main\nfunc main() {}").unwrap();

        let ctx = AnalysisContext::default();
        let first = ctx.analyze_file(&file_path, None).unwrap();
        let second = ctx.analyze_file(&file_path, None).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(ctx.analyzed_files(), vec![file_path.clone()]);

        ctx.clear_cache();
        assert!(ctx.cached(&file_path).is_none());
    }

    #[test]
    fn test_language_override() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("script");
        fs::write(&file_path, "def run():\n    pass\n").unwrap();

        let ctx = AnalysisContext::default();
        assert!(ctx.analyze_file(&file_path, None).is_err());
        let analysis = ctx.analyze_file(&file_path, Some("python")).unwrap();
        assert_eq!(analysis.language, "python");
    }

    #[test]
    fn test_parallel_keeps_order_and_failures() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.py");
        let b = temp.path().join("b.unknown");
        let c = temp.path().join("missing.rs");
        fs::write(&a, "X = 1\n").unwrap();
        fs::write(&b, "whatever\n").unwrap();

        let ctx = AnalysisContext::default();
        let outcomes = ctx.analyze_files_parallel(&[a.clone(), b.clone(), c.clone()]);

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].path, a);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].is_skipped());
        assert!(matches!(
            outcomes[2].result,
            Err(AnalyzerError::FileNotFound(_))
        ));
        assert!(!outcomes[2].is_skipped());
    }
}
