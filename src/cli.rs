//! Command-line interface for srclens.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::analysis::{language_table, AnalysisContext, Element};
use crate::compress;
use crate::config::{self, AnalyzerConfig};
use crate::report::{self, ListingFilter};
use crate::search;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["vendor", "node_modules", "target", "__pycache__"];

/// Lightweight multi-language source analyzer.
///
/// Srclens recognizes functions, classes, imports, comments and other
/// constructs in over twenty languages with line-oriented pattern rules,
/// and renders them as compact listings, Markdown summaries or JSON.
#[derive(Parser)]
#[command(name = "srclens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single file and print its elements
    Analyze(AnalyzeArgs),
    /// List supported languages
    Languages,
    /// Strip comments and blank lines from source files
    Compress(CompressArgs),
    /// Find constructs by kind and name across files
    #[command(visible_alias = "search")]
    Find(FindArgs),
    /// Render a Markdown summary of several files
    Pack(PackArgs),
}

/// Output format for the analyze command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Markdown,
    Json,
}

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// File to analyze
    pub file: PathBuf,

    /// Language key (default: detect from extension)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Show only definitions
    #[arg(long, conflicts_with = "comments_only")]
    pub definitions_only: bool,

    /// Show only comments
    #[arg(long)]
    pub comments_only: bool,
}

impl AnalyzeArgs {
    fn filter(&self) -> ListingFilter {
        if self.definitions_only {
            ListingFilter::DefinitionsOnly
        } else if self.comments_only {
            ListingFilter::CommentsOnly
        } else {
            ListingFilter::All
        }
    }
}

/// Arguments for the compress command.
#[derive(Args)]
pub struct CompressArgs {
    /// Files or directories to compress
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Prefix each kept line with its original line number
    #[arg(short = 'n', long)]
    pub line_numbers: bool,

    /// Language key for a single file (default: detect from extension)
    #[arg(short, long)]
    pub lang: Option<String>,
}

/// Arguments for the find command.
#[derive(Args)]
pub struct FindArgs {
    /// Kind tags separated by '|', e.g. "CLASS|FUNCTION"
    pub tags: String,

    /// Regular expression searched in construct names
    pub pattern: String,

    /// Files or directories to search
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Prefix each code line with its line number
    #[arg(short = 'n', long)]
    pub line_numbers: bool,
}

/// Arguments for the pack command.
#[derive(Args)]
pub struct PackArgs {
    /// Files or directories to summarize
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Expand `paths` into the files to process.
///
/// Files are kept as given so that unsupported ones are reported. Directories
/// are walked recursively and only files of a known language are collected;
/// hidden and dependency directories are skipped, as are paths matched by
/// the configured exclusions.
pub fn collect_files(paths: &[PathBuf], config: &AnalyzerConfig) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for root in paths {
        if !root.is_dir() {
            files.push(root.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }
                let name = e.file_name().to_string_lossy();
                if name.starts_with('.') && !config.include_hidden {
                    return false;
                }
                !SKIPPED_DIRS.contains(&name.as_ref())
            })
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !is_supported_file(path) {
                continue;
            }
            if config.is_path_excluded(path) {
                tracing::debug!(path = %path.display(), "excluded by config");
                continue;
            }
            found.push(path.to_path_buf());
        }
        found.sort();
        files.extend(found);
    }

    Ok(files)
}

/// Load the configuration named on the command line, or discover one.
pub fn load_config(cli: &Cli) -> anyhow::Result<AnalyzerConfig> {
    config::load(cli.config.as_deref())
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs, config: AnalyzerConfig) -> anyhow::Result<i32> {
    let ctx = AnalysisContext::new(config);
    let analysis = match ctx.analyze_file(&args.file, args.lang.as_deref()) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    let filter = args.filter();

    let output = match args.format {
        OutputFormat::Plain => report::render_plain(&analysis.elements, filter),
        OutputFormat::Json => report::render_json(&analysis, filter)?,
        OutputFormat::Markdown => {
            let elements: Vec<Element> = analysis
                .elements
                .iter()
                .filter(|e| filter.keeps(e))
                .cloned()
                .collect();
            report::markdown_for(
                &elements,
                &analysis.path,
                analysis.title,
                analysis.total_lines,
            )
        }
    };
    println!("{}", output);

    if analysis.elements.is_empty() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the languages command.
pub fn run_languages() -> anyhow::Result<i32> {
    println!("Supported languages:");
    println!();
    for spec in language_table().languages() {
        println!("  {:<14} ({})", spec.name, spec.title);
    }
    Ok(EXIT_SUCCESS)
}

/// Run the compress command.
pub fn run_compress(args: &CompressArgs, config: &AnalyzerConfig) -> anyhow::Result<i32> {
    if let [single] = args.paths.as_slice() {
        if single.is_file() {
            let output = compress::compress_file(single, args.lang.as_deref(), args.line_numbers)?;
            println!("{}", output);
            return Ok(EXIT_SUCCESS);
        }
    }
    if args.lang.is_some() {
        eprintln!("Error: --lang applies to a single file only");
        return Ok(EXIT_ERROR);
    }

    let files = collect_files(&args.paths, config)?;
    match compress::compress_files(&files, args.line_numbers, true) {
        Ok(batch) => {
            println!("{}", batch.output);
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(EXIT_FAILED)
        }
    }
}

/// Run the find command.
pub fn run_find(args: &FindArgs, config: AnalyzerConfig) -> anyhow::Result<i32> {
    if search::parse_tag_filter(&args.tags).is_empty() {
        eprintln!("Error: no valid tags in {:?}", args.tags);
        eprintln!();
        eprintln!("Available tags by language:");
        eprintln!("{}", search::format_available_tags());
        return Ok(EXIT_ERROR);
    }

    let files = collect_files(&args.paths, &config)?;
    let ctx = AnalysisContext::new(config);
    match search::find_constructs(
        &ctx,
        &files,
        &args.tags,
        &args.pattern,
        args.line_numbers,
        true,
    ) {
        Ok(result) => {
            println!("{}", result.output);
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(EXIT_FAILED)
        }
    }
}

/// Run the pack command.
pub fn run_pack(args: &PackArgs, config: AnalyzerConfig) -> anyhow::Result<i32> {
    let files = collect_files(&args.paths, &config)?;
    let ctx = AnalysisContext::new(config);
    match report::generate_markdown(&ctx, &files, true) {
        Ok(pack) => {
            println!("{}", pack.output);
            if pack.failed > 0 {
                Ok(EXIT_FAILED)
            } else {
                Ok(EXIT_SUCCESS)
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(EXIT_FAILED)
        }
    }
}

/// Check whether a path has an extension srclens understands.
pub fn is_supported_file(path: &Path) -> bool {
    crate::analysis::detect_language(path).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_files_walks_directories() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("src/b.py"), "X = 1\n").unwrap();
        fs::write(root.join("src/nested/a.go"), "package a\n").unwrap();
        fs::write(root.join("src/readme.txt"), "text\n").unwrap();
        fs::write(root.join(".git/hook.sh"), "echo\n").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "x\n").unwrap();

        let files = collect_files(&[root.to_path_buf()], &AnalyzerConfig::default()).unwrap();
        assert_eq!(
            files,
            vec![root.join("src/b.py"), root.join("src/nested/a.go")]
        );
    }

    #[test]
    fn test_collect_files_hidden_and_excluded() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".tools")).unwrap();
        fs::create_dir_all(root.join("gen")).unwrap();
        fs::write(root.join(".tools/run.sh"), "echo\n").unwrap();
        fs::write(root.join("gen/api.rs"), "fn a() {}\n").unwrap();

        let config = AnalyzerConfig {
            include_hidden: true,
            excluded_paths: vec!["**/gen/**".to_string()],
            ..AnalyzerConfig::default()
        };
        let files = collect_files(&[root.to_path_buf()], &config).unwrap();
        assert_eq!(files, vec![root.join(".tools/run.sh")]);
    }

    #[test]
    fn test_collect_files_keeps_explicit_files() {
        let explicit = PathBuf::from("/nonexistent/notes.txt");
        let files = collect_files(&[explicit.clone()], &AnalyzerConfig::default()).unwrap();
        assert_eq!(files, vec![explicit]);
    }

    #[test]
    fn test_analyze_filter_flags() {
        let cli = Cli::try_parse_from(["srclens", "analyze", "a.py", "--comments-only"]).unwrap();
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.filter(), ListingFilter::CommentsOnly);
                assert_eq!(args.format, OutputFormat::Plain);
            }
            _ => panic!("expected analyze"),
        }
        assert!(Cli::try_parse_from([
            "srclens",
            "analyze",
            "a.py",
            "--comments-only",
            "--definitions-only"
        ])
        .is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["srclens", "pack", "src", "--verbose", "-c", "x.yaml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.yaml")));
    }

    #[test]
    fn test_is_supported_file() {
        assert!(is_supported_file(Path::new("a/b.tsx")));
        assert!(!is_supported_file(Path::new("a/b.md")));
    }
}
