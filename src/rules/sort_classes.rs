//! Orders classes by the framework's precedence ranking.
//!
//! The bridge supplies an order number per class; tokens are stable-sorted on
//! it so equal-order classes keep their relative position. Classes the
//! framework does not recognize either move to the end or stay put, per the
//! `unregisteredPosition` option.

use crate::diagnostics::{Fix, LintDiagnostic};
use crate::errors::Result;
use crate::matcher::LiteralSpan;
use crate::options::{SortDirection, UnregisteredPosition};
use crate::rules::{
    escape_for_quote, render_into_skeleton, stable_token_range, Rule, RuleContext, RuleMeta,
};
use crate::tokenizer::tokenize;

pub struct SortClasses;

const RULE_NAME: &str = "sort-classes";

impl Rule for SortClasses {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            name: RULE_NAME,
            description: "Order classes by framework precedence",
            fixable: true,
        }
    }

    fn check(&self, spans: &[LiteralSpan], ctx: &RuleContext) -> Result<Vec<LintDiagnostic>> {
        let Some(direction) = ctx.options.sort.direction(ctx.options.order) else {
            return Ok(Vec::new());
        };

        let mut diagnostics = Vec::new();
        for span in spans {
            let list = tokenize(&span.text);
            let range = stable_token_range(span, &list);
            if range.len() < 2 {
                continue;
            }

            let names: Vec<String> = range.clone().map(|i| list.tokens[i].name.clone()).collect();
            let (entries, warnings) = ctx.bridge.get_class_order(
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

            let orders: Vec<Option<u64>> = entries.iter().map(|e| e.order).collect();
            let sorted = sorted_names(
                &names,
                &orders,
                direction,
                ctx.options.unregistered_position,
            );
            if sorted == names {
                continue;
            }

            let mut all_names: Vec<&str> = list.tokens.iter().map(|t| t.name.as_str()).collect();
            for (slot, name) in range.clone().zip(&sorted) {
                all_names[slot] = name;
            }
            let fixed = escape_for_quote(render_into_skeleton(&list, &all_names), span.quote);
            diagnostics.push(
                LintDiagnostic::warn(RULE_NAME, "Invalid class order", span.start, span.end)
                    .with_fix(Fix::replace(span.start, span.end, fixed)),
            );
        }
        Ok(diagnostics)
    }
}

/// Stable-sort the names on their order numbers.
fn sorted_names(
    names: &[String],
    orders: &[Option<u64>],
    direction: SortDirection,
    unregistered: UnregisteredPosition,
) -> Vec<String> {
    let mut ranked: Vec<usize> = (0..names.len()).filter(|&i| orders[i].is_some()).collect();
    ranked.sort_by_key(|&i| {
        let order = orders[i].unwrap();
        match direction {
            SortDirection::Asc => order,
            SortDirection::Desc => u64::MAX - order,
        }
    });

    let unranked: Vec<usize> = (0..names.len()).filter(|&i| orders[i].is_none()).collect();

    match unregistered {
        UnregisteredPosition::End => ranked
            .into_iter()
            .chain(unranked)
            .map(|i| names[i].clone())
            .collect(),
        UnregisteredPosition::Keep => {
            // Ranked names flow through the slots that held ranked names;
            // unranked slots keep their occupant.
            let mut out = names.to_vec();
            let mut next = ranked.into_iter();
            for (i, slot) in out.iter_mut().enumerate() {
                if orders[i].is_some() {
                    *slot = names[next.next().unwrap()].clone();
                }
            }
            out
        }
    }
}
