//! Removes repeated class names, keeping the first occurrence.

use std::collections::HashSet;

use crate::diagnostics::{Fix, LintDiagnostic};
use crate::errors::Result;
use crate::matcher::LiteralSpan;
use crate::rules::{escape_for_quote, stable_token_range, Rule, RuleContext, RuleMeta};
use crate::tokenizer::tokenize;

pub struct NoDuplicateClasses;

const RULE_NAME: &str = "no-duplicate-classes";

impl Rule for NoDuplicateClasses {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            name: RULE_NAME,
            description: "Remove duplicate class names from class lists",
            fixable: true,
        }
    }

    fn check(&self, spans: &[LiteralSpan], _ctx: &RuleContext) -> Result<Vec<LintDiagnostic>> {
        let mut diagnostics = Vec::new();
        for span in spans {
            let list = tokenize(&span.text);
            let range = stable_token_range(span, &list);

            let mut seen: HashSet<&str> = HashSet::new();
            let mut removed: Vec<usize> = Vec::new();
            for i in range {
                let name = list.tokens[i].name.as_str();
                if !seen.insert(name) {
                    removed.push(i);
                }
            }
            if removed.is_empty() {
                continue;
            }

            let mut fixed = String::new();
            for (i, token) in list.tokens.iter().enumerate() {
                if removed.contains(&i) {
                    continue;
                }
                fixed.push_str(&token.leading);
                fixed.push_str(&token.name);
            }
            fixed.push_str(&list.trailing);
            let fixed = escape_for_quote(fixed, span.quote);

            // One fix per span; further duplicates in the same span are
            // report-only so applied fixes never overlap.
            for (n, &i) in removed.iter().enumerate() {
                let token = &list.tokens[i];
                let mut diagnostic = LintDiagnostic::warn(
                    RULE_NAME,
                    format!("Duplicate class \"{}\"", token.name),
                    span.start + token.start,
                    span.start + token.end,
                );
                if n == 0 {
                    diagnostic =
                        diagnostic.with_fix(Fix::replace(span.start, span.end, fixed.clone()));
                }
                diagnostics.push(diagnostic);
            }
        }
        Ok(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{TailwindBridge, TailwindVersion};
    use crate::diagnostics::apply_fixes;
    use crate::matcher::SourceKind;
    use crate::options::LintOptions;
    use crate::rewriter::Quote;

    fn span(text: &str, leading: bool, trailing: bool) -> LiteralSpan {
        LiteralSpan {
            text: text.to_string(),
            start: 0,
            end: text.len(),
            quote: Quote::Double,
            leading_expr: leading,
            trailing_expr: trailing,
        }
    }

    fn check(spans: &[LiteralSpan]) -> Vec<LintDiagnostic> {
        let options = LintOptions::default();
        let bridge = TailwindBridge::in_process();
        let dir = tempfile::tempdir().unwrap();
        let ctx = RuleContext {
            options: &options,
            bridge: &bridge,
            version: TailwindVersion::V3,
            cwd: dir.path(),
            config_path: None,
            source: "",
            kind: SourceKind::Jsx,
        };
        NoDuplicateClasses.check(spans, &ctx).unwrap()
    }

    #[test]
    fn test_duplicate_removed_keeping_first() {
        let s = span("p-4 m-2 p-4", false, false);
        let diags = check(std::slice::from_ref(&s));
        assert_eq!(diags.len(), 1);
        let (fixed, _) = apply_fixes(&s.text, &diags);
        assert_eq!(fixed, "p-4 m-2");
    }

    #[test]
    fn test_no_duplicates_reports_nothing() {
        assert!(check(&[span("p-4 m-2", false, false)]).is_empty());
    }

    #[test]
    fn test_variant_forms_are_distinct() {
        assert!(check(&[span("p-4 hover:p-4", false, false)]).is_empty());
    }

    #[test]
    fn test_multiple_duplicates_single_fix() {
        let s = span("a b a b a", false, false);
        let diags = check(std::slice::from_ref(&s));
        assert_eq!(diags.len(), 3);
        assert_eq!(diags.iter().filter(|d| d.has_fix()).count(), 1);
        let (fixed, _) = apply_fixes(&s.text, &diags);
        assert_eq!(fixed, "a b");
    }

    #[test]
    fn test_expression_fragments_not_deduped() {
        // `${base}a b a`: the first "a" may complete an interpolated class
        let diags = check(&[span("a b a", true, false)]);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_diagnostic_points_at_duplicate() {
        let s = span("p-4 m-2 p-4", false, false);
        let diags = check(std::slice::from_ref(&s));
        assert_eq!(&s.text[diags[0].start..diags[0].end], "p-4");
        assert_eq!(diags[0].start, 8);
    }
}
