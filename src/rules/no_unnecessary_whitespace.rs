//! Collapses whitespace runs inside class lists and trims the ends.
//!
//! Boundaries next to template expressions are special: `${cond} flex` needs
//! its separating space, so a non-empty boundary run next to an expression
//! collapses to a single space instead of disappearing.

use crate::diagnostics::{Fix, LintDiagnostic};
use crate::errors::Result;
use crate::matcher::LiteralSpan;
use crate::rewriter::render_single_space;
use crate::rules::{escape_for_quote, Rule, RuleContext, RuleMeta};
use crate::tokenizer::tokenize;

pub struct NoUnnecessaryWhitespace;

const RULE_NAME: &str = "no-unnecessary-whitespace";

impl Rule for NoUnnecessaryWhitespace {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            name: RULE_NAME,
            description: "Collapse repeated whitespace and trim class lists",
            fixable: true,
        }
    }

    fn check(&self, spans: &[LiteralSpan], ctx: &RuleContext) -> Result<Vec<LintDiagnostic>> {
        let mut diagnostics = Vec::new();
        for span in spans {
            let desired = escape_for_quote(normalized(span, ctx.options.trim), span.quote);
            if desired != span.text {
                diagnostics.push(
                    LintDiagnostic::warn(
                        RULE_NAME,
                        "Unnecessary whitespace in class list",
                        span.start,
                        span.end,
                    )
                    .with_fix(Fix::replace(span.start, span.end, desired)),
                );
            }
        }
        Ok(diagnostics)
    }
}

fn normalized(span: &LiteralSpan, trim: bool) -> String {
    let list = tokenize(&span.text);

    if list.is_empty() {
        // Whitespace-only content: a run between two expressions still
        // separates them.
        if span.text.is_empty() {
            return String::new();
        }
        if span.leading_expr || span.trailing_expr {
            return " ".to_string();
        }
        return if trim { String::new() } else { span.text.clone() };
    }

    let leading_ws = &list.tokens[0].leading;
    let leading = boundary(leading_ws, span.leading_expr, trim);
    let trailing = boundary(&list.trailing, span.trailing_expr, trim);
    render_single_space(&list, leading, trailing)
}

fn boundary<'a>(run: &'a str, at_expr: bool, trim: bool) -> &'a str {
    if run.is_empty() {
        ""
    } else if at_expr {
        " "
    } else if trim {
        ""
    } else {
        run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{TailwindBridge, TailwindVersion};
    use crate::matcher::SourceKind;
    use crate::options::LintOptions;
    use crate::rewriter::Quote;

    fn span(text: &str, leading: bool, trailing: bool) -> LiteralSpan {
        LiteralSpan {
            text: text.to_string(),
            start: 10,
            end: 10 + text.len(),
            quote: Quote::Double,
            leading_expr: leading,
            trailing_expr: trailing,
        }
    }

    fn check(spans: &[LiteralSpan], options: &LintOptions) -> Vec<LintDiagnostic> {
        let bridge = TailwindBridge::in_process();
        let dir = tempfile::tempdir().unwrap();
        let ctx = RuleContext {
            options,
            bridge: &bridge,
            version: TailwindVersion::V3,
            cwd: dir.path(),
            config_path: None,
            source: "",
            kind: SourceKind::Jsx,
        };
        NoUnnecessaryWhitespace.check(spans, &ctx).unwrap()
    }

    #[test]
    fn test_trims_and_collapses() {
        let options = LintOptions::default();
        let diags = check(&[span(" lint ", false, false)], &options);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].fix.as_ref().unwrap().replacement, "lint");
    }

    #[test]
    fn test_inner_runs_collapse() {
        let options = LintOptions::default();
        let diags = check(&[span("p-4   m-2", false, false)], &options);
        assert_eq!(diags[0].fix.as_ref().unwrap().replacement, "p-4 m-2");
    }

    #[test]
    fn test_clean_span_reports_nothing() {
        let options = LintOptions::default();
        assert!(check(&[span("p-4 m-2", false, false)], &options).is_empty());
    }

    #[test]
    fn test_expression_boundary_keeps_one_space() {
        let options = LintOptions::default();
        // `${cond}  flex  ` inside a template literal
        let diags = check(&[span("  flex  ", true, false)], &options);
        assert_eq!(diags[0].fix.as_ref().unwrap().replacement, " flex");
    }

    #[test]
    fn test_whitespace_between_expressions() {
        let options = LintOptions::default();
        let diags = check(&[span("   ", true, true)], &options);
        assert_eq!(diags[0].fix.as_ref().unwrap().replacement, " ");
    }

    #[test]
    fn test_trim_disabled_keeps_ends() {
        let options = LintOptions {
            trim: false,
            ..Default::default()
        };
        let diags = check(&[span(" p-4   m-2 ", false, false)], &options);
        assert_eq!(diags[0].fix.as_ref().unwrap().replacement, " p-4 m-2 ");
    }

    #[test]
    fn test_boundary_without_whitespace_untouched() {
        let options = LintOptions::default();
        // `${base}flex`: "flex" may complete a class from the expression, but
        // there is no whitespace to normalize either way
        assert!(check(&[span("flex", true, false)], &options).is_empty());
    }
}
