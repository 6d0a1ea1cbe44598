//! The rule set: each rule inspects class-list literal spans and reports
//! diagnostics, attaching a fix when one exists.

pub mod line_wrapping;
pub mod no_conflicting_classes;
pub mod no_duplicate_classes;
pub mod no_unnecessary_whitespace;
pub mod no_unregistered_classes;
pub mod sort_classes;

use std::path::Path;

use crate::bridge::{TailwindBridge, TailwindVersion};
use crate::diagnostics::LintDiagnostic;
use crate::errors::{LinterError, Result};
use crate::matcher::{LiteralSpan, SourceKind};
use crate::options::LintOptions;
use crate::rewriter::{escape_nested_quotes, Quote};
use crate::tokenizer::ClassList;

/// Static facts about a rule.
pub struct RuleMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub fixable: bool,
}

/// Everything a rule needs to check one file.
pub struct RuleContext<'a> {
    pub options: &'a LintOptions,
    pub bridge: &'a TailwindBridge,
    pub version: TailwindVersion,
    pub cwd: &'a Path,
    pub config_path: Option<&'a Path>,
    pub source: &'a str,
    pub kind: SourceKind,
}

pub trait Rule: Send + Sync {
    fn meta(&self) -> RuleMeta;

    /// Check the matched spans of one file.
    fn check(&self, spans: &[LiteralSpan], ctx: &RuleContext) -> Result<Vec<LintDiagnostic>>;
}

/// Every rule, in fix-application order: structural normalization first so
/// later rules see clean input on the next pass.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(no_unnecessary_whitespace::NoUnnecessaryWhitespace),
        Box::new(no_duplicate_classes::NoDuplicateClasses),
        Box::new(sort_classes::SortClasses),
        Box::new(line_wrapping::LineWrapping),
        Box::new(no_unregistered_classes::NoUnregisteredClasses),
        Box::new(no_conflicting_classes::NoConflictingClasses),
    ]
}

/// Resolve rule names to rule instances. `multiline` is the historical name
/// of `enforce-consistent-line-wrapping` and selects the same rule.
pub fn rules_by_name(names: &[String]) -> Result<Vec<Box<dyn Rule>>> {
    let mut rules: Vec<Box<dyn Rule>> = Vec::new();
    for name in names {
        let rule: Box<dyn Rule> = match name.as_str() {
            "no-unnecessary-whitespace" => {
                Box::new(no_unnecessary_whitespace::NoUnnecessaryWhitespace)
            }
            "no-duplicate-classes" => Box::new(no_duplicate_classes::NoDuplicateClasses),
            "sort-classes" => Box::new(sort_classes::SortClasses),
            "enforce-consistent-line-wrapping" | "multiline" => {
                Box::new(line_wrapping::LineWrapping)
            }
            "no-unregistered-classes" => Box::new(no_unregistered_classes::NoUnregisteredClasses),
            "no-conflicting-classes" => Box::new(no_conflicting_classes::NoConflictingClasses),
            other => {
                return Err(LinterError::InvalidInput(format!(
                    "unknown rule: {other}"
                )))
            }
        };
        rules.push(rule);
    }
    Ok(rules)
}

/// The tokens of a span that are safe to reorder or dedup: a token touching
/// a template expression may be a fragment of a larger class name, so the
/// first token after a leading expression and the last token before a
/// trailing one are off limits unless whitespace separates them from the
/// boundary.
pub fn stable_token_range(span: &LiteralSpan, list: &ClassList) -> std::ops::Range<usize> {
    let mut start = 0usize;
    let mut end = list.tokens.len();
    if span.leading_expr {
        if let Some(first) = list.tokens.first() {
            if first.leading.is_empty() {
                start = 1;
            }
        }
    }
    if span.trailing_expr && end > start && list.trailing.is_empty() {
        end -= 1;
    }
    start..end
}

/// Render a token sequence back into the span's whitespace skeleton: each
/// slot keeps its original leading whitespace, only the names move.
pub fn render_into_skeleton(list: &ClassList, names: &[&str]) -> String {
    debug_assert_eq!(list.tokens.len(), names.len());
    let mut out = String::new();
    for (token, name) in list.tokens.iter().zip(names) {
        out.push_str(&token.leading);
        out.push_str(name);
    }
    out.push_str(&list.trailing);
    out
}

/// Prepare replacement content for a quoted literal: occurrences of the
/// surrounding quote character get escaped, everything else passes through.
/// Raw source text keeps its existing escapes, so this is idempotent.
pub fn escape_for_quote(content: String, quote: Quote) -> String {
    match quote.ch() {
        Some(ch) if content.contains(ch) => escape_nested_quotes(&content, ch),
        _ => content,
    }
}
