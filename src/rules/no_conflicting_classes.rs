//! Reports classes in one list that set the same property under the same
//! variants; only one of them wins in the cascade. Report-only, since
//! deciding which class to keep is the author's call.

use crate::diagnostics::LintDiagnostic;
use crate::errors::Result;
use crate::matcher::LiteralSpan;
use crate::rules::{stable_token_range, Rule, RuleContext, RuleMeta};
use crate::tokenizer::tokenize;

pub struct NoConflictingClasses;

const RULE_NAME: &str = "no-conflicting-classes";

impl Rule for NoConflictingClasses {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            name: RULE_NAME,
            description: "Report classes that assign the same property twice",
            fixable: false,
        }
    }

    fn check(&self, spans: &[LiteralSpan], ctx: &RuleContext) -> Result<Vec<LintDiagnostic>> {
        let mut diagnostics = Vec::new();
        for span in spans {
            let list = tokenize(&span.text);
            let range = stable_token_range(span, &list);
            if range.len() < 2 {
                continue;
            }

            let names: Vec<String> = range.clone().map(|i| list.tokens[i].name.clone()).collect();
            let (conflicts, warnings) = ctx.bridge.get_conflicting_classes(
                ctx.version,
                &names,
                ctx.cwd,
                ctx.config_path,
            )?;
            for warning in ctx.bridge.fresh_warnings(warnings) {
                diagnostics.push(LintDiagnostic::warn(
                    RULE_NAME,
                    format!("{} ({})", warning.title, warning.option),
                    span.start,
                    span.start,
                ));
            }

            for group in conflicts {
                // Report at the last class of the group, the one that wins
                let offender = group.last().cloned().unwrap_or_default();
                let (start, end) = range
                    .clone()
                    .map(|i| &list.tokens[i])
                    .find(|t| t.name == offender)
                    .map(|t| (span.start + t.start, span.start + t.end))
                    .unwrap_or((span.start, span.end));
                diagnostics.push(LintDiagnostic::warn(
                    RULE_NAME,
                    format!("Conflicting classes: {}", group.join(", ")),
                    start,
                    end,
                ));
            }
        }
        Ok(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{TailwindBridge, TailwindVersion};
    use crate::matcher::SourceKind;
    use crate::options::LintOptions;
    use crate::rewriter::Quote;

    fn span(text: &str) -> LiteralSpan {
        LiteralSpan {
            text: text.to_string(),
            start: 0,
            end: text.len(),
            quote: Quote::Double,
            leading_expr: false,
            trailing_expr: false,
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
        NoConflictingClasses.check(spans, &ctx).unwrap()
    }

    fn violations(diags: &[LintDiagnostic]) -> Vec<&LintDiagnostic> {
        diags
            .iter()
            .filter(|d| d.message.starts_with("Conflicting"))
            .collect()
    }

    #[test]
    fn test_same_property_conflicts() {
        let diags = check(&[span("p-2 p-4")]);
        let v = violations(&diags);
        assert_eq!(v.len(), 1);
        assert!(v[0].message.contains("p-2"));
        assert!(v[0].message.contains("p-4"));
    }

    #[test]
    fn test_different_properties_pass() {
        let diags = check(&[span("p-2 m-2 flex")]);
        assert!(violations(&diags).is_empty());
    }

    #[test]
    fn test_variant_scopes_conflicts() {
        // hover:p-2 applies under a different variant than p-4
        let diags = check(&[span("hover:p-2 p-4")]);
        assert!(violations(&diags).is_empty());
        let diags = check(&[span("hover:p-2 hover:p-4")]);
        assert_eq!(violations(&diags).len(), 1);
    }

    #[test]
    fn test_diagnostic_points_at_winner() {
        let text = "p-2 m-1 p-4";
        let diags = check(&[span(text)]);
        let v = violations(&diags);
        assert_eq!(&text[v[0].start..v[0].end], "p-4");
    }
}
