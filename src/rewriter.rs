//! Produces replacement text for class-list literals.
//!
//! Rules decide on a token sequence and a join policy; this module turns that
//! decision into the literal content that goes back into the source, including
//! quote escaping and multiline wrapping.

use crate::tokenizer::ClassList;

/// The quote character surrounding a literal, if any.
///
/// Template-literal chunks and unquoted HTML attribute values carry `None`
/// (for quasis the backtick belongs to the enclosing template, not the chunk).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
    Backtick,
    None,
}

impl Quote {
    pub fn ch(self) -> Option<char> {
        match self {
            Quote::Single => Some('\''),
            Quote::Double => Some('"'),
            Quote::Backtick => Some('`'),
            Quote::None => None,
        }
    }
}

/// Join class names with single spaces, with explicit boundary whitespace.
///
/// `leading` and `trailing` let the caller keep a separating space next to a
/// template-literal expression while trimming everything else.
pub fn render_single_space(list: &ClassList, leading: &str, trailing: &str) -> String {
    let mut out = String::with_capacity(list.reconstruct().len());
    out.push_str(leading);
    for (i, token) in list.tokens.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&token.name);
    }
    out.push_str(trailing);
    out
}

/// Escape occurrences of the surrounding quote character inside literal
/// content. Only the matching quote kind is touched: content containing `"`
/// stays unescaped when the surrounding quote is `'`, and vice versa. Already
/// escaped occurrences are left alone.
pub fn escape_nested_quotes(content: &str, quote: char) -> String {
    let mut out = String::with_capacity(content.len());
    let mut prev_backslash = false;
    for ch in content.chars() {
        if ch == quote && !prev_backslash {
            out.push('\\');
        }
        prev_backslash = ch == '\\' && !prev_backslash;
        out.push(ch);
    }
    out
}

/// Layout parameters for multiline wrapping.
#[derive(Debug, Clone)]
pub struct WrapStyle {
    /// Indentation for each wrapped line of classes
    pub indent: String,
    /// Indentation of the line holding the closing quote
    pub closing_indent: String,
    /// Maximum classes per line (0 disables the limit)
    pub classes_per_line: usize,
    /// Maximum rendered line width (0 disables the limit)
    pub print_width: usize,
    /// Insert a blank line between groups
    pub blank_line_between_groups: bool,
}

/// Whether a literal should be wrapped under the given limits.
///
/// `current_width` is the width the literal's line would have in single-line
/// form (indentation plus surrounding markup included by the caller).
pub fn needs_wrap(list: &ClassList, style: &WrapStyle, current_width: usize) -> bool {
    if list.tokens.len() < 2 {
        return false;
    }
    if style.classes_per_line > 0 && list.tokens.len() > style.classes_per_line {
        return true;
    }
    style.print_width > 0 && current_width > style.print_width
}

/// Render groups of class names as multiline literal content.
///
/// The result starts with a newline, each line carries `indent`, and the
/// content ends with a newline plus `closing_indent` so the closing quote
/// lands under the opening construct.
pub fn render_wrapped(groups: &[Vec<String>], style: &WrapStyle) -> String {
    let mut out = String::new();
    for (gi, group) in groups.iter().enumerate() {
        if gi > 0 && style.blank_line_between_groups {
            out.push('\n');
        }
        let mut line: Vec<&str> = Vec::new();
        let mut line_width = style.indent.len();
        for name in group {
            let exceeded_count =
                style.classes_per_line > 0 && line.len() >= style.classes_per_line;
            let exceeded_width = style.print_width > 0
                && !line.is_empty()
                && line_width + 1 + name.len() > style.print_width;
            if exceeded_count || exceeded_width {
                out.push('\n');
                out.push_str(&style.indent);
                out.push_str(&line.join(" "));
                line.clear();
                line_width = style.indent.len();
            }
            line_width += if line.is_empty() { 0 } else { 1 } + name.len();
            line.push(name);
        }
        if !line.is_empty() {
            out.push('\n');
            out.push_str(&style.indent);
            out.push_str(&line.join(" "));
        }
    }
    out.push('\n');
    out.push_str(&style.closing_indent);
    out
}
