pub mod args;
pub mod bridge;
pub mod cache;
pub mod diagnostics;
pub mod errors;
pub mod linter;
pub mod markup;
pub mod matcher;
pub mod options;
pub mod rewriter;
pub mod rules;
pub mod tokenizer;

pub use args::{CheckArgs, Cli, Commands, WorkerArgs};
pub use bridge::{ConfigWarning, OrderEntry, TailwindBridge, TailwindVersion};
pub use diagnostics::{apply_fixes, line_col, Fix, LintDiagnostic, Severity};
pub use errors::{LinterError, Result};
pub use linter::{FileReport, Linter};
pub use matcher::{LiteralSpan, MatcherSet, SourceKind};
pub use options::LintOptions;
pub use tokenizer::{tokenize, ClassList, ClassToken};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Aggregate outcome of a check run.
#[derive(Debug)]
pub struct CheckResult {
    pub files_processed: usize,
    pub files_with_violations: usize,
    pub total_diagnostics: usize,
    pub total_fixes: usize,
}

/// Run the check command end to end: collect files, lint them in parallel,
/// write fixed files back, and print diagnostics.
///
/// Bridge requests go to per-version worker processes spawned from the
/// current executable.
pub fn check(args: CheckArgs) -> Result<CheckResult> {
    let program = std::env::current_exe()?;
    check_with_bridge(args, TailwindBridge::with_workers(program))
}

/// Like `check`, but with a caller-supplied bridge.
pub fn check_with_bridge(args: CheckArgs, bridge: TailwindBridge) -> Result<CheckResult> {
    let start_time = Instant::now();

    args.validate().map_err(LinterError::InvalidInput)?;

    if let Some(jobs) = args.jobs {
        let _ = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global();
    }

    let options = match &args.config {
        Some(path) => LintOptions::from_file(path)?,
        None => LintOptions::default(),
    };

    if args.verbose {
        eprintln!("Starting lint run...");
        eprintln!("Input patterns: {:?}", args.input);
        if let Some(config) = &args.config {
            eprintln!("Options file: {}", config.display());
        }
        eprintln!("Fix mode: {}", args.fix);
    }

    let files = collect_files(&args.input, &args.exclude)?;
    if files.is_empty() {
        return Err(LinterError::NoFilesFound);
    }

    if args.verbose {
        eprintln!("Found {} files to lint", files.len());
    }

    let progress_bar = if !args.verbose {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({msg})")
                .unwrap()
                .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        pb.set_message("Linting...");
        Some(pb)
    } else {
        None
    };

    let linter = Linter::with_rules(options, bridge, &args.rule)?;

    let reports: Result<Vec<FileReport>> = files
        .par_iter()
        .map(|path| {
            let report = linter.lint_file(path, args.fix);
            if let Some(pb) = &progress_bar {
                pb.inc(1);
                pb.set_message(format!(
                    "{}",
                    path.file_name().unwrap_or_default().to_string_lossy()
                ));
            }
            report
        })
        .collect();
    let reports = reports?;

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    let mut result = CheckResult {
        files_processed: reports.len(),
        files_with_violations: 0,
        total_diagnostics: 0,
        total_fixes: 0,
    };

    for report in &reports {
        if let Some(fixed) = &report.fixed_source {
            write_atomic(&report.path, fixed).map_err(|e| LinterError::OutputError {
                path: report.path.display().to_string(),
                message: e.to_string(),
            })?;
            result.total_fixes += report.fixes_applied;
        }

        if !report.diagnostics.is_empty() {
            result.files_with_violations += 1;
        }
        result.total_diagnostics += report.diagnostics.len();

        let source = report
            .fixed_source
            .clone()
            .or_else(|| fs::read_to_string(&report.path).ok())
            .unwrap_or_default();
        for diagnostic in &report.diagnostics {
            let (line, col) = line_col(&source, diagnostic.start);
            println!(
                "{}:{}:{}: {} [{}]",
                report.path.display(),
                line,
                col,
                diagnostic.message,
                diagnostic.rule
            );
        }
    }

    if args.verbose {
        eprintln!("\nLint complete:");
        eprintln!("  - Checked {} files", result.files_processed);
        eprintln!(
            "  - {} violations in {} files",
            result.total_diagnostics, result.files_with_violations
        );
        if args.fix {
            eprintln!("  - Applied {} fixes", result.total_fixes);
        }
        eprintln!(
            "  - Total time: {:.2}s",
            start_time.elapsed().as_secs_f64()
        );
    }

    Ok(result)
}

/// Collect lintable files matching the given patterns.
fn collect_files(patterns: &[String], exclude_patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for pattern in patterns {
        for entry in glob::glob(pattern)? {
            let path = entry?;

            if should_exclude(&path, exclude_patterns)? {
                continue;
            }
            if path.is_dir() {
                continue;
            }
            if Linter::source_kind(&path).is_none() {
                continue;
            }

            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

/// Check if a path should be excluded
fn should_exclude(path: &Path, exclude_patterns: &[String]) -> Result<bool> {
    for pattern in exclude_patterns {
        let pattern = glob::Pattern::new(pattern)?;
        if pattern.matches_path(path) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Write file atomically by writing to temp file then renaming
fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> std::io::Result<()> {
    use std::io::Write;

    let path = path.as_ref();
    let temp_path = path.with_extension(".tmp");

    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_files_filters_and_dedupes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jsx"), "x").unwrap();
        fs::write(dir.path().join("b.html"), "x").unwrap();
        fs::write(dir.path().join("notes.md"), "x").unwrap();

        let everything = format!("{}/*", dir.path().display());
        let jsx_again = format!("{}/*.jsx", dir.path().display());
        let files = collect_files(&[everything, jsx_again], &[]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_collect_files_respects_excludes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jsx"), "x").unwrap();
        fs::write(dir.path().join("a.test.jsx"), "x").unwrap();

        let pattern = format!("{}/*.jsx", dir.path().display());
        let exclude = format!("{}/*.test.jsx", dir.path().display());
        let files = collect_files(&[pattern], &[exclude]).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].to_string_lossy().ends_with("a.jsx"));
    }

    #[test]
    fn test_write_atomic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jsx");
        write_atomic(&path, "fixed").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "fixed");
        assert!(!path.with_extension(".tmp").exists());
    }
}
