//! Reports classes the framework configuration does not define.
//!
//! Report-only: there is no safe automatic fix for a class the framework
//! does not know about.

use crate::diagnostics::LintDiagnostic;
use crate::errors::Result;
use crate::matcher::LiteralSpan;
use crate::rules::{stable_token_range, Rule, RuleContext, RuleMeta};
use crate::tokenizer::tokenize;

pub struct NoUnregisteredClasses;

const RULE_NAME: &str = "no-unregistered-classes";

impl Rule for NoUnregisteredClasses {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            name: RULE_NAME,
            description: "Report classes unknown to the framework configuration",
            fixable: false,
        }
    }

    fn check(&self, spans: &[LiteralSpan], ctx: &RuleContext) -> Result<Vec<LintDiagnostic>> {
        let mut diagnostics = Vec::new();
        for span in spans {
            let list = tokenize(&span.text);
            let range = stable_token_range(span, &list);
            if range.is_empty() {
                continue;
            }

            let names: Vec<String> = range.clone().map(|i| list.tokens[i].name.clone()).collect();
            let (unregistered, warnings) = ctx.bridge.get_unregistered_classes(
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

            for i in range {
                let token = &list.tokens[i];
                if unregistered.contains(&token.name) {
                    diagnostics.push(LintDiagnostic::warn(
                        RULE_NAME,
                        format!("Unregistered class \"{}\"", token.name),
                        span.start + token.start,
                        span.start + token.end,
                    ));
                }
            }
        }
        Ok(diagnostics)
    }
}
