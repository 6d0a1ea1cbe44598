//! Enforces a consistent multiline layout for long class lists.
//!
//! Template-literal chunks and quoted markup attributes are wrapped in place
//! when they exceed the configured limits, and unwrapped when the limits no
//! longer demand multiple lines. Plain JSX string literals cannot hold
//! newlines, so an over-long one is converted to a backtick template
//! (brace-wrapped when it sits in attribute position) and wrapped there.

use crate::diagnostics::{Fix, LintDiagnostic};
use crate::errors::Result;
use crate::matcher::{LiteralSpan, SourceKind};
use crate::options::GroupStyle;
use crate::rewriter::{needs_wrap, render_single_space, render_wrapped, Quote, WrapStyle};
use crate::rules::{escape_for_quote, Rule, RuleContext, RuleMeta};
use crate::tokenizer::{tokenize, ClassList};

pub struct LineWrapping;

const RULE_NAME: &str = "enforce-consistent-line-wrapping";

impl Rule for LineWrapping {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            name: RULE_NAME,
            description: "Wrap long class lists across lines consistently",
            fixable: true,
        }
    }

    fn check(&self, spans: &[LiteralSpan], ctx: &RuleContext) -> Result<Vec<LintDiagnostic>> {
        let mut diagnostics = Vec::new();
        for span in spans {
            if span.leading_expr || span.trailing_expr {
                continue;
            }
            let list = tokenize(&span.text);
            if list.is_empty() {
                continue;
            }
            let group = ctx.options.group.style();

            // Plain JSX strings cannot hold newlines; wrapping one means
            // rewriting the whole literal as a template.
            if ctx.kind == SourceKind::Jsx
                && matches!(span.quote, Quote::Single | Quote::Double)
            {
                if group == GroupStyle::Never {
                    continue;
                }
                if let Some(content) = wrapped_form(span, &list, group, ctx) {
                    let content = escape_for_quote(content, Quote::Backtick);
                    let replacement = if is_attr_value(ctx.source, span.start) {
                        format!("{{`{content}`}}")
                    } else {
                        format!("`{content}`")
                    };
                    diagnostics.push(
                        LintDiagnostic::warn(
                            RULE_NAME,
                            "Class list exceeds the wrapping limits",
                            span.start,
                            span.end,
                        )
                        // The replacement swallows the surrounding quotes
                        .with_fix(Fix::replace(span.start - 1, span.end + 1, replacement)),
                    );
                }
                continue;
            }

            if !wrappable(span, ctx.kind) {
                continue;
            }

            let desired = if group == GroupStyle::Never {
                // Wrapping disabled: everything on one line
                if span.text.contains('\n') {
                    Some(render_single_space(&list, "", ""))
                } else {
                    None
                }
            } else {
                wrapped_form(span, &list, group, ctx)
            };

            if let Some(desired) = desired.map(|d| escape_for_quote(d, span.quote)) {
                if desired != span.text {
                    diagnostics.push(
                        LintDiagnostic::warn(
                            RULE_NAME,
                            "Inconsistent line wrapping in class list",
                            span.start,
                            span.end,
                        )
                        .with_fix(Fix::replace(span.start, span.end, desired)),
                    );
                }
            }
        }
        Ok(diagnostics)
    }
}

/// Whether the literal at `content_start` is a JSX attribute value, which
/// needs braces around the template it becomes.
fn is_attr_value(source: &str, content_start: usize) -> bool {
    content_start >= 2 && source.as_bytes().get(content_start - 2) == Some(&b'=')
}

/// Whether the literal may hold newlines as written, so wrapping happens in
/// place without rewriting its delimiters.
fn wrappable(span: &LiteralSpan, kind: SourceKind) -> bool {
    match kind {
        SourceKind::Jsx => matches!(span.quote, Quote::Backtick | Quote::None),
        // Quoted attribute values may span lines; unquoted ones cannot
        SourceKind::Html | SourceKind::Angular | SourceKind::Svelte | SourceKind::Vue => {
            matches!(span.quote, Quote::Single | Quote::Double)
        }
    }
}

fn wrapped_form(
    span: &LiteralSpan,
    list: &ClassList,
    group: GroupStyle,
    ctx: &RuleContext,
) -> Option<String> {
    let line_start = ctx.source[..span.start.min(ctx.source.len())]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    let line = &ctx.source[line_start..span.start.min(ctx.source.len())];
    let base_indent: String = line
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();

    let style = WrapStyle {
        indent: format!("{base_indent}  "),
        closing_indent: base_indent,
        classes_per_line: ctx.options.classes_per_line,
        print_width: ctx.options.print_width,
        blank_line_between_groups: group == GroupStyle::EmptyLine,
    };

    // Width of the whole line if the literal were rendered on one line
    let single_line = render_single_space(list, "", "");
    let current_width = (span.start - line_start) + single_line.len() + 1;

    if needs_wrap(list, &style, current_width) {
        Some(render_wrapped(&split_groups(list, group), &style))
    } else if span.text.contains('\n') {
        // Previously wrapped but no longer over the limits
        Some(single_line)
    } else {
        None
    }
}

/// Partition token names into groups. With `emptyLine` grouping, a blank
/// line in the original content starts a new group; otherwise everything is
/// one group.
fn split_groups(list: &ClassList, group: GroupStyle) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = vec![Vec::new()];
    for token in &list.tokens {
        let blank_line = token.leading.matches('\n').count() >= 2;
        if group == GroupStyle::EmptyLine && blank_line && !groups.last().unwrap().is_empty() {
            groups.push(Vec::new());
        }
        groups.last_mut().unwrap().push(token.name.clone());
    }
    groups
}
