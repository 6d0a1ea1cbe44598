//! Diagnostic and fix types, plus the span-replacement engine that applies
//! fixes back to a source string.

/// A replacement of the byte range `start..end` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl Fix {
    pub fn replace(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One reported violation, optionally carrying an auto-fix.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// Rule id, e.g. `no-unnecessary-whitespace`
    pub rule: &'static str,
    pub message: String,
    pub severity: Severity,
    /// Byte range of the offending text in the source file
    pub start: usize,
    pub end: usize,
    pub fix: Option<Fix>,
}

impl LintDiagnostic {
    pub fn warn(rule: &'static str, message: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            rule,
            message: message.into(),
            severity: Severity::Warning,
            start,
            end,
            fix: None,
        }
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    pub fn has_fix(&self) -> bool {
        self.fix.is_some()
    }
}

/// Apply all non-overlapping fixes to `source`, returning the fixed text and
/// the number of fixes applied.
///
/// Fixes are applied in span order; a fix overlapping an already applied one
/// is skipped (it will be picked up on a subsequent pass, the usual fixer
/// convention).
pub fn apply_fixes(source: &str, diagnostics: &[LintDiagnostic]) -> (String, usize) {
    let mut fixes: Vec<&Fix> = diagnostics.iter().filter_map(|d| d.fix.as_ref()).collect();
    fixes.sort_by_key(|f| (f.start, f.end));

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;
    let mut applied = 0usize;

    for fix in fixes {
        if fix.start < cursor || fix.end > source.len() || fix.start > fix.end {
            continue;
        }
        out.push_str(&source[cursor..fix.start]);
        out.push_str(&fix.replacement);
        cursor = fix.end;
        applied += 1;
    }
    out.push_str(&source[cursor..]);
    (out, applied)
}

/// Translate a byte offset to a 1-based line and column for reporting.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let clamped = offset.min(source.len());
    let before = &source[..clamped];
    let line = before.matches('\n').count() + 1;
    let col = before
        .rfind('\n')
        .map(|idx| clamped - idx - 1)
        .unwrap_or(clamped)
        + 1;
    (line, col)
}
