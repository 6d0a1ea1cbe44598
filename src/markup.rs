//! Attribute scanner for HTML-family templates (HTML, Vue, Svelte, Angular).
//!
//! A small byte state machine walks tags and their attributes; attribute
//! names are tested against the configured attribute matchers and matching
//! values become `LiteralSpan`s. No template AST is built here; the linter
//! only needs the literal content and its offsets.

use crate::matcher::{AttributeMatcher, LiteralSpan, SourceKind};
use crate::rewriter::Quote;

/// Scan a markup source for class-bearing attribute values.
pub fn find_attribute_spans(
    source: &str,
    kind: SourceKind,
    matchers: &[AttributeMatcher],
) -> Vec<LiteralSpan> {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut spans = Vec::new();
    let mut i = 0usize;

    while i < len {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }

        // Comments are opaque
        if source[i..].starts_with("<!--") {
            i = match source[i + 4..].find("-->") {
                Some(pos) => i + 4 + pos + 3,
                None => len,
            };
            continue;
        }

        // Closing tags carry no attributes
        if i + 1 < len && bytes[i + 1] == b'/' {
            while i < len && bytes[i] != b'>' {
                i += 1;
            }
            continue;
        }

        // Skip the tag name
        i += 1;
        while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
            i += 1;
        }

        // Attribute loop
        while i < len {
            while i < len && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= len || bytes[i] == b'>' {
                i += 1;
                break;
            }
            if bytes[i] == b'/' {
                i += 1;
                continue;
            }

            // Attribute name: anything up to whitespace, '=', '>' or '/'.
            // Angular bindings like [ngClass] and Vue shorthands like :class
            // are plain name characters here.
            let name_start = i;
            while i < len
                && !bytes[i].is_ascii_whitespace()
                && bytes[i] != b'='
                && bytes[i] != b'>'
                && bytes[i] != b'/'
            {
                i += 1;
            }
            let name = &source[name_start..i];

            while i < len && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= len || bytes[i] != b'=' {
                continue; // bare attribute, no value
            }
            i += 1;
            while i < len && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= len {
                break;
            }

            let (value_start, value_end, quote) = if bytes[i] == b'"' || bytes[i] == b'\'' {
                let q = bytes[i];
                i += 1;
                let start = i;
                while i < len && bytes[i] != q {
                    i += 1;
                }
                let end = i;
                if i < len {
                    i += 1;
                }
                (
                    start,
                    end,
                    if q == b'"' { Quote::Double } else { Quote::Single },
                )
            } else {
                let start = i;
                while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                (start, i, Quote::None)
            };

            if matchers.iter().any(|m| m.matches(name, kind)) {
                spans.push(LiteralSpan {
                    text: source[value_start..value_end].to_string(),
                    start: value_start,
                    end: value_end,
                    quote,
                    leading_expr: false,
                    trailing_expr: false,
                });
            }
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_matchers() -> Vec<AttributeMatcher> {
        vec![AttributeMatcher::new("^class$", None).unwrap()]
    }

    #[test]
    fn test_basic_class_attribute() {
        let spans = find_attribute_spans(
            r#"<div class="p-4 m-2">Hello</div>"#,
            SourceKind::Html,
            &class_matchers(),
        );
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "p-4 m-2");
        assert_eq!(spans[0].quote, Quote::Double);
    }

    #[test]
    fn test_single_quotes() {
        let spans = find_attribute_spans(
            "<div class='c b a'>x</div>",
            SourceKind::Html,
            &class_matchers(),
        );
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].quote, Quote::Single);
    }

    #[test]
    fn test_classname_not_matched_by_exact_pattern() {
        let spans = find_attribute_spans(
            r#"<div className="p-4">x</div>"#,
            SourceKind::Html,
            &class_matchers(),
        );
        assert!(spans.is_empty());
    }

    #[test]
    fn test_multiple_elements_and_offsets() {
        let source = r#"<div class="p-4"><span class="m-2 p-1">t</span></div>"#;
        let spans = find_attribute_spans(source, SourceKind::Html, &class_matchers());
        assert_eq!(spans.len(), 2);
        for span in &spans {
            assert_eq!(&source[span.start..span.end], span.text);
        }
    }

    #[test]
    fn test_other_attributes_ignored() {
        let source = r#"<div id="main" class="p-4" data-x="a b">x</div>"#;
        let spans = find_attribute_spans(source, SourceKind::Html, &class_matchers());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "p-4");
    }

    #[test]
    fn test_comments_skipped() {
        let source = r#"<!-- <div class="a  b"> --><div class="c">x</div>"#;
        let spans = find_attribute_spans(source, SourceKind::Html, &class_matchers());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "c");
    }

    #[test]
    fn test_angular_binding_attribute() {
        let matchers = vec![AttributeMatcher::new(
            r"\[class\]",
            Some(vec![SourceKind::Angular]),
        )
        .unwrap()];
        let source = r#"<div [class]="'a b'">x</div>"#;
        let spans = find_attribute_spans(source, SourceKind::Angular, &matchers);
        assert_eq!(spans.len(), 1);
        // Syntax filter keeps the same matcher away from plain HTML
        let html_spans = find_attribute_spans(source, SourceKind::Html, &matchers);
        assert!(html_spans.is_empty());
    }

    #[test]
    fn test_unquoted_value() {
        let spans =
            find_attribute_spans("<div class=p-4>x</div>", SourceKind::Html, &class_matchers());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "p-4");
        assert_eq!(spans[0].quote, Quote::None);
    }

    #[test]
    fn test_bare_attribute_without_value() {
        let spans = find_attribute_spans(
            r#"<input disabled class="a">"#,
            SourceKind::Html,
            &class_matchers(),
        );
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "a");
    }
}
