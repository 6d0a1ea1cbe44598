//! Per-file lint orchestration: detect the syntax, collect class-list spans,
//! run the rules, and iterate fixes until the file is stable.

use std::path::{Path, PathBuf};

use crate::bridge::{detect_version, TailwindBridge, TailwindVersion};
use crate::diagnostics::{apply_fixes, LintDiagnostic};
use crate::errors::{LinterError, Result};
use crate::markup::find_attribute_spans;
use crate::matcher::{find_class_spans, MatcherSet, SourceKind};
use crate::options::LintOptions;
use crate::rules::{all_rules, rules_by_name, Rule, RuleContext};

/// Fix passes cap: every pass strictly shrinks the set of violations, so the
/// cap only guards against a rule oscillating between two forms.
const MAX_FIX_PASSES: usize = 10;

pub struct Linter {
    options: LintOptions,
    matchers: MatcherSet,
    bridge: TailwindBridge,
    rules: Vec<Box<dyn Rule>>,
}

/// Outcome of linting one file.
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<LintDiagnostic>,
    /// The rewritten source, present only when fixes were applied
    pub fixed_source: Option<String>,
    pub fixes_applied: usize,
}

impl Linter {
    pub fn new(options: LintOptions, bridge: TailwindBridge) -> Result<Self> {
        let matchers = options.matcher_set()?;
        Ok(Self {
            options,
            matchers,
            bridge,
            rules: all_rules(),
        })
    }

    /// Restrict the linter to specific rules (names as the user writes them).
    pub fn with_rules(
        options: LintOptions,
        bridge: TailwindBridge,
        names: &[String],
    ) -> Result<Self> {
        let matchers = options.matcher_set()?;
        let rules = if names.is_empty() {
            all_rules()
        } else {
            rules_by_name(names)?
        };
        Ok(Self {
            options,
            matchers,
            bridge,
            rules,
        })
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Classify a path by extension. `None` means the file is not lintable.
    pub fn source_kind(path: &Path) -> Option<(SourceKind, bool)> {
        let name = path.file_name()?.to_str()?;
        let ext = path.extension()?.to_str()?;
        match ext {
            "js" | "jsx" | "mjs" | "cjs" => Some((SourceKind::Jsx, false)),
            "ts" | "tsx" | "mts" | "cts" => Some((SourceKind::Jsx, true)),
            "html" | "htm" => {
                if name.ends_with(".component.html") {
                    Some((SourceKind::Angular, false))
                } else {
                    Some((SourceKind::Html, false))
                }
            }
            "vue" => Some((SourceKind::Vue, false)),
            "svelte" => Some((SourceKind::Svelte, false)),
            _ => None,
        }
    }

    /// Run every rule once over a source string.
    pub fn lint_source(&self, source: &str, path: &Path) -> Result<Vec<LintDiagnostic>> {
        let Some((kind, typescript)) = Self::source_kind(path) else {
            return Err(LinterError::InvalidInput(format!(
                "unsupported file type: {}",
                path.display()
            )));
        };

        let spans = match kind {
            SourceKind::Jsx => find_class_spans(
                source,
                &path.display().to_string(),
                typescript,
                &self.matchers,
            )?,
            _ => find_attribute_spans(source, kind, &self.matchers.attributes),
        };

        let cwd = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let (version, config_path) = self.resolve_target();

        let ctx = RuleContext {
            options: &self.options,
            bridge: &self.bridge,
            version,
            cwd: &cwd,
            config_path,
            source,
            kind,
        };

        let mut diagnostics = Vec::new();
        for rule in &self.rules {
            diagnostics.extend(rule.check(&spans, &ctx)?);
        }
        diagnostics.sort_by_key(|d| (d.start, d.end));
        Ok(diagnostics)
    }

    /// Lint one file; with `fix` set, apply fixes repeatedly until the file
    /// is clean or stable.
    pub fn lint_file(&self, path: &Path, fix: bool) -> Result<FileReport> {
        let original = std::fs::read_to_string(path)?;
        let mut source = original.clone();
        let mut total_applied = 0usize;
        let mut diagnostics = self.lint_source(&source, path)?;

        if fix {
            for _ in 0..MAX_FIX_PASSES {
                let (next, applied) = apply_fixes(&source, &diagnostics);
                if applied == 0 {
                    break;
                }
                total_applied += applied;
                source = next;
                diagnostics = self.lint_source(&source, path)?;
            }
        }

        Ok(FileReport {
            path: path.to_path_buf(),
            diagnostics,
            fixed_source: (source != original).then_some(source),
            fixes_applied: total_applied,
        })
    }

    /// The framework version and config path the bridge should use for files
    /// under `cwd`.
    fn resolve_target(&self) -> (TailwindVersion, Option<&Path>) {
        let version = detect_version(
            self.options.tailwind_config.as_deref(),
            self.options.entry_point.as_deref(),
        );
        let config_path = match version {
            TailwindVersion::V4 => self
                .options
                .entry_point
                .as_deref()
                .or(self.options.tailwind_config.as_deref()),
            TailwindVersion::V3 => self.options.tailwind_config.as_deref(),
        };
        (version, config_path)
    }
}
