//! Locates class-bearing literals in JavaScript/TypeScript/JSX sources.
//!
//! Matching is configuration-driven: callee matchers describe which function
//! calls carry class lists and where in the argument list they live, variable
//! matchers catch `const classes = "..."` declarations, and attribute matchers
//! cover JSX attributes. The engine produces `LiteralSpan`s (raw literal
//! content plus byte offsets) which the tokenizer and rules consume.

use regex::Regex;
use swc_core::common::{BytePos, FileName, Globals, SourceMap, GLOBALS};
use swc_core::ecma::ast::*;
use swc_core::ecma::parser::{parse_file_as_module, EsSyntax, Syntax, TsSyntax};
use swc_core::ecma::visit::{Visit, VisitWith};
use std::sync::Arc;

use crate::errors::{LinterError, Result};
use crate::rewriter::Quote;

/// Source syntaxes attribute matchers can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Jsx,
    Html,
    Angular,
    Svelte,
    Vue,
}

/// Where inside a matched call's arguments class lists appear.
#[derive(Debug, Clone)]
pub enum ArgumentRule {
    /// Bare string arguments and string elements of array arguments
    Strings,
    /// Object keys, optionally restricted to paths matching a pattern
    ObjectKeys { path: Option<Regex> },
    /// Object values at paths matching a pattern
    ObjectValues { path: Option<Regex> },
}

/// A callee name plus its ordered argument rules.
///
/// Callee names match exactly; a spec with a single rule applies that rule to
/// every argument, otherwise rule `i` governs argument `i` and the final rule
/// governs any surplus arguments.
#[derive(Debug, Clone)]
pub struct MatcherSpec {
    pub callee: String,
    pub rules: Vec<ArgumentRule>,
}

/// A markup attribute matcher: literal name first, anchored regex second.
#[derive(Debug, Clone)]
pub struct AttributeMatcher {
    pub pattern: String,
    pub regex: Regex,
    /// `None` means all syntaxes
    pub syntaxes: Option<Vec<SourceKind>>,
}

impl AttributeMatcher {
    pub fn new(pattern: &str, syntaxes: Option<Vec<SourceKind>>) -> Result<Self> {
        Ok(Self {
            pattern: pattern.to_string(),
            regex: anchored(pattern)?,
            syntaxes,
        })
    }

    pub fn matches(&self, name: &str, kind: SourceKind) -> bool {
        if self.pattern == name {
            return true;
        }
        self.applies_to(kind) && self.regex.is_match(name)
    }

    fn applies_to(&self, kind: SourceKind) -> bool {
        match &self.syntaxes {
            None => true,
            Some(kinds) => kinds.contains(&kind),
        }
    }
}

/// The full matcher configuration for one lint run.
#[derive(Debug, Clone, Default)]
pub struct MatcherSet {
    pub callees: Vec<MatcherSpec>,
    pub attributes: Vec<AttributeMatcher>,
    pub variables: Vec<Regex>,
}

/// One recognized class-list literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSpan {
    /// Raw content between the quotes, exactly as written in the source
    pub text: String,
    /// Byte offset of the content start in the file
    pub start: usize,
    /// Byte offset one past the content end
    pub end: usize,
    pub quote: Quote,
    /// A template expression sits immediately before this chunk
    pub leading_expr: bool,
    /// A template expression sits immediately after this chunk
    pub trailing_expr: bool,
}

/// Compile a user pattern into an anchored regex so partial names never match.
pub fn anchored(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(&format!("^(?:{pattern})$"))?)
}

/// Find all class-list literal spans in a JS/TS/JSX source.
pub fn find_class_spans(
    content: &str,
    source_name: &str,
    typescript: bool,
    matchers: &MatcherSet,
) -> Result<Vec<LiteralSpan>> {
    let source_map = Arc::new(SourceMap::default());
    let source_file = source_map.new_source_file(
        FileName::Custom(source_name.to_string()).into(),
        content.to_string(),
    );

    let syntax = if typescript {
        Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: false,
            dts: false,
            no_early_errors: true,
            disallow_ambiguous_jsx_like: false,
        })
    } else {
        Syntax::Es(EsSyntax {
            jsx: true,
            decorators: false,
            decorators_before_export: false,
            export_default_from: false,
            import_attributes: false,
            allow_super_outside_method: false,
            allow_return_outside_function: false,
            auto_accessors: false,
            explicit_resource_management: false,
            fn_bind: false,
        })
    };

    let module = GLOBALS.set(&Globals::new(), || {
        parse_file_as_module(&source_file, syntax, EsVersion::latest(), None, &mut vec![]).map_err(
            |e| LinterError::ParseError {
                path: source_name.to_string(),
                message: format!("Failed to parse JavaScript/TypeScript: {:?}", e),
            },
        )
    })?;

    let mut collector = SpanCollector {
        matchers,
        base: source_file.start_pos,
        spans: Vec::new(),
    };
    module.visit_with(&mut collector);

    let mut spans = collector.spans;
    spans.sort_by_key(|s| s.start);
    Ok(spans)
}

struct SpanCollector<'a> {
    matchers: &'a MatcherSet,
    base: BytePos,
    spans: Vec<LiteralSpan>,
}

impl SpanCollector<'_> {
    fn offset(&self, pos: BytePos) -> usize {
        (pos.0 - self.base.0) as usize
    }

    /// Record a string literal. The span covers the quotes; the recorded
    /// content excludes them.
    fn push_str(&mut self, node: &Str) {
        let (text, quote) = match &node.raw {
            Some(raw) if raw.len() >= 2 => {
                let quote = match raw.as_bytes()[0] {
                    b'\'' => Quote::Single,
                    b'`' => Quote::Backtick,
                    _ => Quote::Double,
                };
                (raw[1..raw.len() - 1].to_string(), quote)
            }
            _ => (node.value.to_string(), Quote::Double),
        };
        self.spans.push(LiteralSpan {
            text,
            start: self.offset(node.span.lo) + 1,
            end: self.offset(node.span.hi) - 1,
            quote,
            leading_expr: false,
            trailing_expr: false,
        });
    }

    /// Record the static chunks of a template literal, one span per quasi.
    /// Interpolated expressions are opaque separators.
    fn push_tpl(&mut self, node: &Tpl) {
        let expr_count = node.exprs.len();
        for (i, quasi) in node.quasis.iter().enumerate() {
            self.spans.push(LiteralSpan {
                text: quasi.raw.to_string(),
                start: self.offset(quasi.span.lo),
                end: self.offset(quasi.span.hi),
                quote: Quote::None,
                leading_expr: i > 0,
                trailing_expr: i < expr_count,
            });
        }
    }

    /// Collect literals reachable from an expression in "string position":
    /// plain strings, template chunks, array elements, both arms of a
    /// conditional.
    fn collect_strings(&mut self, expr: &Expr) {
        match expr {
            Expr::Lit(Lit::Str(s)) => self.push_str(s),
            Expr::Tpl(tpl) => self.push_tpl(tpl),
            Expr::Paren(p) => self.collect_strings(&p.expr),
            Expr::Cond(cond) => {
                self.collect_strings(&cond.cons);
                self.collect_strings(&cond.alt);
            }
            Expr::Array(arr) => {
                for el in arr.elems.iter().flatten() {
                    if el.spread.is_none() {
                        self.collect_strings(&el.expr);
                    }
                }
            }
            _ => {}
        }
    }

    fn apply_rule(&mut self, expr: &Expr, rule: &ArgumentRule) {
        match rule {
            ArgumentRule::Strings => self.collect_strings(expr),
            ArgumentRule::ObjectKeys { .. } | ArgumentRule::ObjectValues { .. } => {
                self.walk_paths(expr, "", rule)
            }
        }
    }

    /// Walk objects and arrays, building canonical path strings (`a.b[0]`)
    /// and testing them against the rule's pattern.
    fn walk_paths(&mut self, expr: &Expr, path: &str, rule: &ArgumentRule) {
        match expr {
            Expr::Object(obj) => {
                for prop in &obj.props {
                    let PropOrSpread::Prop(prop) = prop else {
                        continue;
                    };
                    let Prop::KeyValue(kv) = &**prop else {
                        continue;
                    };
                    let Some(key) = prop_key_name(&kv.key) else {
                        continue;
                    };
                    let child = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    match rule {
                        ArgumentRule::ObjectKeys { path: pattern } => {
                            if pattern_matches(pattern, &child) {
                                // Only quoted keys are rewritable literals
                                if let PropName::Str(s) = &kv.key {
                                    self.push_str(s);
                                }
                            }
                            self.walk_paths(&kv.value, &child, rule);
                        }
                        ArgumentRule::ObjectValues { path: pattern } => {
                            if pattern_matches(pattern, &child) {
                                self.collect_strings(&kv.value);
                            }
                            self.walk_paths(&kv.value, &child, rule);
                        }
                        ArgumentRule::Strings => {}
                    }
                }
            }
            Expr::Array(arr) => {
                for (i, el) in arr.elems.iter().enumerate() {
                    if let Some(el) = el {
                        if el.spread.is_none() {
                            self.walk_paths(&el.expr, &format!("{path}[{i}]"), rule);
                        }
                    }
                }
            }
            Expr::Paren(p) => self.walk_paths(&p.expr, path, rule),
            _ => {}
        }
    }
}

fn pattern_matches(pattern: &Option<Regex>, path: &str) -> bool {
    match pattern {
        None => true,
        Some(re) => re.is_match(path),
    }
}

fn prop_key_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(id) => Some(id.sym.to_string()),
        PropName::Str(s) => Some(s.value.to_string()),
        PropName::Num(n) => Some(n.value.to_string()),
        _ => None,
    }
}

impl Visit for SpanCollector<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(callee) = &node.callee {
            if let Expr::Ident(ident) = &**callee {
                let name = ident.sym.as_ref();
                if let Some(spec) = self.matchers.callees.iter().find(|s| s.callee == name) {
                    for (i, arg) in node.args.iter().enumerate() {
                        if arg.spread.is_some() {
                            continue;
                        }
                        let rule = if spec.rules.len() <= 1 {
                            spec.rules.first()
                        } else {
                            Some(&spec.rules[i.min(spec.rules.len() - 1)])
                        };
                        if let Some(rule) = rule {
                            self.apply_rule(&arg.expr, rule);
                        }
                    }
                }
            }
        }
        node.visit_children_with(self);
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        if let Pat::Ident(ident) = &node.name {
            let name = ident.id.sym.as_ref();
            if self.matchers.variables.iter().any(|re| re.is_match(name)) {
                if let Some(init) = &node.init {
                    self.collect_strings(init);
                }
            }
        }
        node.visit_children_with(self);
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        let JSXAttrName::Ident(ident) = &node.name else {
            node.visit_children_with(self);
            return;
        };
        let name = ident.sym.as_ref();
        let matched = self
            .matchers
            .attributes
            .iter()
            .any(|m| m.matches(name, SourceKind::Jsx));
        if matched {
            match &node.value {
                Some(JSXAttrValue::Lit(Lit::Str(s))) => self.push_str(s),
                Some(JSXAttrValue::JSXExprContainer(container)) => {
                    if let JSXExpr::Expr(expr) = &container.expr {
                        self.collect_strings(expr);
                    }
                }
                _ => {}
            }
        }
        node.visit_children_with(self);
    }
}
