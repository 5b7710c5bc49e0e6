//! Error types surfaced by the analyzer core.
//!
//! Only invalid *inputs* produce errors: an unknown language key or an
//! unreadable path. Syntactic oddities in the analyzed text never do.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when analyzing a source file.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Language '{language}' not supported.\nSupported languages: {}", .supported.join(", "))]
    UnsupportedLanguage {
        language: String,
        supported: Vec<String>,
    },
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("path is a directory: {}", .0.display())]
    IsADirectory(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AnalyzerError {
    /// Classify an I/O failure for `path` into the matching variant.
    pub fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => AnalyzerError::FileNotFound(path),
            _ if path.is_dir() => AnalyzerError::IsADirectory(path),
            _ => AnalyzerError::Io { path, source: err },
        }
    }
}
