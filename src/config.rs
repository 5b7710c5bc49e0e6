//! Analyzer configuration.
//!
//! Configuration is an optional YAML file. Every field has a default, so an
//! empty file (or no file at all) gives the stock behavior.

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["srclens.yaml", ".srclens.yaml"];

fn default_indent_lookahead() -> usize {
    200
}

fn default_brace_lookahead() -> usize {
    300
}

fn default_terminator_lookahead() -> usize {
    200
}

fn default_max_extract_lines() -> usize {
    5
}

fn default_doc_gap() -> usize {
    2
}

/// Tunable limits and file selection.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Lines scanned ahead when tracking indentation blocks.
    #[serde(default = "default_indent_lookahead")]
    pub indent_lookahead: usize,
    /// Lines scanned ahead when counting braces.
    #[serde(default = "default_brace_lookahead")]
    pub brace_lookahead: usize,
    /// Lines scanned ahead when looking for a terminator keyword.
    #[serde(default = "default_terminator_lookahead")]
    pub terminator_lookahead: usize,
    /// Extracts longer than this are cut and marked.
    #[serde(default = "default_max_extract_lines")]
    pub max_extract_lines: usize,
    /// Maximum blank distance between a documentation comment and its element.
    #[serde(default = "default_doc_gap")]
    pub doc_gap: usize,
    /// Glob patterns for paths to skip when expanding directories (e.g., "**/vendor/**")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Whether to descend into hidden directories (default: false)
    #[serde(default)]
    pub include_hidden: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            indent_lookahead: default_indent_lookahead(),
            brace_lookahead: default_brace_lookahead(),
            terminator_lookahead: default_terminator_lookahead(),
            max_extract_lines: default_max_extract_lines(),
            doc_gap: default_doc_gap(),
            excluded_paths: Vec::new(),
            include_hidden: false,
        }
    }
}

impl AnalyzerConfig {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        Self::parse_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse a configuration from YAML text. Empty text yields the defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AnalyzerConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the analyzer useless.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_extract_lines < 2 {
            anyhow::bail!(
                "max_extract_lines must be at least 2, got {}",
                self.max_extract_lines
            );
        }
        for (name, value) in [
            ("indent_lookahead", self.indent_lookahead),
            ("brace_lookahead", self.brace_lookahead),
            ("terminator_lookahead", self.terminator_lookahead),
        ] {
            if value == 0 {
                anyhow::bail!("{} must be positive", name);
            }
        }
        for pattern in &self.excluded_paths {
            Glob::new(pattern).with_context(|| format!("invalid excluded path {:?}", pattern))?;
        }
        Ok(())
    }

    /// Compile `excluded_paths` into a matcher.
    pub fn exclusion_set(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            builder.add(Glob::new(pattern)?);
        }
        Ok(builder.build()?)
    }

    /// Check if a path should be excluded based on excluded_paths patterns.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }
        match self.exclusion_set() {
            Ok(set) => set.is_match(path),
            Err(_) => false,
        }
    }
}

/// Locate a configuration file.
///
/// Looks in the working directory first, then in the per-user config
/// directory. Returns `None` when nothing is found.
pub fn discover_config() -> Option<PathBuf> {
    for name in DEFAULT_CONFIG_NAMES {
        let path = PathBuf::from(name);
        if path.is_file() {
            return Some(path);
        }
    }
    let dirs = directories::ProjectDirs::from("", "", "srclens")?;
    let user = dirs.config_dir().join("config.yaml");
    user.is_file().then_some(user)
}

/// Load the configuration from `explicit`, or discover one, or fall back to
/// the defaults.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<AnalyzerConfig> {
    match explicit {
        Some(path) => AnalyzerConfig::parse_file(path),
        None => match discover_config() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using discovered config");
                AnalyzerConfig::parse_file(&path)
            }
            None => Ok(AnalyzerConfig::default()),
        },
    }
}
