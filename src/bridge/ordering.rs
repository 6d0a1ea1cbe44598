//! Deterministic class ordering and registration tables.
//!
//! This is the concrete stand-in for the framework's internal precedence
//! resolution: a fixed utility-group table assigns every recognized class a
//! monotonically increasing order number, stable for a given configuration.
//! Variant splitting respects bracket nesting so arbitrary values like
//! `bg-[url('/a.png')]` or `lg:hover:text-left` parse correctly.

use std::collections::HashSet;

/// A utility group: classes in the same group target the same CSS concern.
struct UtilityGroup {
    name: &'static str,
    /// Tokens matched exactly (`flex`, `block`)
    exact: &'static [&'static str],
    /// Roots matched as `root` or `root-*`
    roots: &'static [&'static str],
}

/// Ordered by the framework's layer precedence: layout first, interactivity
/// last. The table index is the group's order rank.
static GROUPS: &[UtilityGroup] = &[
    UtilityGroup { name: "container", exact: &["container"], roots: &[] },
    UtilityGroup { name: "box-sizing", exact: &["box-border", "box-content"], roots: &[] },
    UtilityGroup { name: "display", exact: &["block", "inline-block", "inline", "flex", "inline-flex", "table", "grid", "inline-grid", "contents", "flow-root", "hidden"], roots: &[] },
    UtilityGroup { name: "float", exact: &[], roots: &["float"] },
    UtilityGroup { name: "clear", exact: &[], roots: &["clear"] },
    UtilityGroup { name: "object-fit", exact: &["object-contain", "object-cover", "object-fill", "object-none", "object-scale-down"], roots: &[] },
    UtilityGroup { name: "object-position", exact: &[], roots: &["object"] },
    UtilityGroup { name: "overflow", exact: &[], roots: &["overflow", "overflow-x", "overflow-y"] },
    UtilityGroup { name: "position", exact: &["static", "fixed", "absolute", "relative", "sticky"], roots: &[] },
    UtilityGroup { name: "inset", exact: &[], roots: &["inset", "inset-x", "inset-y"] },
    UtilityGroup { name: "top", exact: &[], roots: &["top"] },
    UtilityGroup { name: "right", exact: &[], roots: &["right"] },
    UtilityGroup { name: "bottom", exact: &[], roots: &["bottom"] },
    UtilityGroup { name: "left", exact: &[], roots: &["left"] },
    UtilityGroup { name: "visibility", exact: &["visible", "invisible", "collapse"], roots: &[] },
    UtilityGroup { name: "z-index", exact: &[], roots: &["z"] },
    UtilityGroup { name: "flex-basis", exact: &[], roots: &["basis"] },
    UtilityGroup { name: "flex-direction", exact: &["flex-row", "flex-row-reverse", "flex-col", "flex-col-reverse"], roots: &[] },
    UtilityGroup { name: "flex-wrap", exact: &["flex-wrap", "flex-wrap-reverse", "flex-nowrap"], roots: &[] },
    UtilityGroup { name: "flex", exact: &["flex-1", "flex-auto", "flex-initial", "flex-none"], roots: &["flex"] },
    UtilityGroup { name: "grow", exact: &[], roots: &["grow"] },
    UtilityGroup { name: "shrink", exact: &[], roots: &["shrink"] },
    UtilityGroup { name: "order", exact: &[], roots: &["order"] },
    UtilityGroup { name: "grid-cols", exact: &[], roots: &["grid-cols"] },
    UtilityGroup { name: "col", exact: &[], roots: &["col", "col-span", "col-start", "col-end"] },
    UtilityGroup { name: "grid-rows", exact: &[], roots: &["grid-rows"] },
    UtilityGroup { name: "row", exact: &[], roots: &["row", "row-span", "row-start", "row-end"] },
    UtilityGroup { name: "gap", exact: &[], roots: &["gap", "gap-x", "gap-y"] },
    UtilityGroup { name: "justify-content", exact: &[], roots: &["justify"] },
    UtilityGroup { name: "justify-items", exact: &[], roots: &["justify-items"] },
    UtilityGroup { name: "justify-self", exact: &[], roots: &["justify-self"] },
    UtilityGroup { name: "align-content", exact: &[], roots: &["content"] },
    UtilityGroup { name: "align-items", exact: &[], roots: &["items"] },
    UtilityGroup { name: "align-self", exact: &[], roots: &["self"] },
    UtilityGroup { name: "place-content", exact: &[], roots: &["place-content"] },
    UtilityGroup { name: "place-items", exact: &[], roots: &["place-items"] },
    UtilityGroup { name: "place-self", exact: &[], roots: &["place-self"] },
    UtilityGroup { name: "space-x", exact: &[], roots: &["space-x"] },
    UtilityGroup { name: "space-y", exact: &[], roots: &["space-y"] },
    UtilityGroup { name: "margin", exact: &[], roots: &["m"] },
    UtilityGroup { name: "margin-x", exact: &[], roots: &["mx"] },
    UtilityGroup { name: "margin-y", exact: &[], roots: &["my"] },
    UtilityGroup { name: "margin-top", exact: &[], roots: &["mt"] },
    UtilityGroup { name: "margin-right", exact: &[], roots: &["mr"] },
    UtilityGroup { name: "margin-bottom", exact: &[], roots: &["mb"] },
    UtilityGroup { name: "margin-left", exact: &[], roots: &["ml"] },
    UtilityGroup { name: "padding", exact: &[], roots: &["p"] },
    UtilityGroup { name: "padding-x", exact: &[], roots: &["px"] },
    UtilityGroup { name: "padding-y", exact: &[], roots: &["py"] },
    UtilityGroup { name: "padding-top", exact: &[], roots: &["pt"] },
    UtilityGroup { name: "padding-right", exact: &[], roots: &["pr"] },
    UtilityGroup { name: "padding-bottom", exact: &[], roots: &["pb"] },
    UtilityGroup { name: "padding-left", exact: &[], roots: &["pl"] },
    UtilityGroup { name: "width", exact: &[], roots: &["w"] },
    UtilityGroup { name: "min-width", exact: &[], roots: &["min-w"] },
    UtilityGroup { name: "max-width", exact: &[], roots: &["max-w"] },
    UtilityGroup { name: "height", exact: &[], roots: &["h"] },
    UtilityGroup { name: "min-height", exact: &[], roots: &["min-h"] },
    UtilityGroup { name: "max-height", exact: &[], roots: &["max-h"] },
    UtilityGroup { name: "size", exact: &[], roots: &["size"] },
    UtilityGroup { name: "font-family", exact: &["font-sans", "font-serif", "font-mono"], roots: &[] },
    UtilityGroup { name: "font-size", exact: &[], roots: &["text-xs", "text-sm", "text-base", "text-lg", "text-xl", "text-2xl", "text-3xl", "text-4xl", "text-5xl", "text-6xl", "text-7xl", "text-8xl", "text-9xl"] },
    UtilityGroup { name: "font-style", exact: &["italic", "not-italic"], roots: &[] },
    UtilityGroup { name: "font-weight", exact: &["font-thin", "font-extralight", "font-light", "font-normal", "font-medium", "font-semibold", "font-bold", "font-extrabold", "font-black"], roots: &[] },
    UtilityGroup { name: "tracking", exact: &[], roots: &["tracking"] },
    UtilityGroup { name: "leading", exact: &[], roots: &["leading"] },
    UtilityGroup { name: "list-style", exact: &["list-none", "list-disc", "list-decimal"], roots: &[] },
    UtilityGroup { name: "text-align", exact: &["text-left", "text-center", "text-right", "text-justify", "text-start", "text-end"], roots: &[] },
    UtilityGroup { name: "text-color", exact: &[], roots: &["text"] },
    UtilityGroup { name: "text-decoration", exact: &["underline", "overline", "line-through", "no-underline"], roots: &[] },
    UtilityGroup { name: "text-transform", exact: &["uppercase", "lowercase", "capitalize", "normal-case"], roots: &[] },
    UtilityGroup { name: "text-overflow", exact: &["truncate", "text-ellipsis", "text-clip"], roots: &[] },
    UtilityGroup { name: "whitespace", exact: &[], roots: &["whitespace"] },
    UtilityGroup { name: "break", exact: &["break-normal", "break-words", "break-all", "break-keep"], roots: &[] },
    UtilityGroup { name: "bg-attachment", exact: &["bg-fixed", "bg-local", "bg-scroll"], roots: &[] },
    UtilityGroup { name: "bg-repeat", exact: &["bg-repeat", "bg-no-repeat", "bg-repeat-x", "bg-repeat-y", "bg-repeat-round", "bg-repeat-space"], roots: &[] },
    UtilityGroup { name: "bg-position", exact: &["bg-bottom", "bg-center", "bg-left", "bg-right", "bg-top"], roots: &[] },
    UtilityGroup { name: "bg-size", exact: &["bg-auto", "bg-cover", "bg-contain"], roots: &[] },
    UtilityGroup { name: "bg-color", exact: &[], roots: &["bg"] },
    UtilityGroup { name: "border-radius", exact: &["rounded"], roots: &["rounded"] },
    UtilityGroup { name: "border-width", exact: &["border"], roots: &["border-0", "border-2", "border-4", "border-8", "border-x", "border-y", "border-t", "border-r", "border-b", "border-l"] },
    UtilityGroup { name: "border-style", exact: &["border-solid", "border-dashed", "border-dotted", "border-double", "border-hidden", "border-none"], roots: &[] },
    UtilityGroup { name: "border-color", exact: &[], roots: &["border"] },
    UtilityGroup { name: "divide", exact: &[], roots: &["divide-x", "divide-y"] },
    UtilityGroup { name: "ring", exact: &["ring"], roots: &["ring", "ring-offset"] },
    UtilityGroup { name: "shadow", exact: &["shadow"], roots: &["shadow"] },
    UtilityGroup { name: "opacity", exact: &[], roots: &["opacity"] },
    UtilityGroup { name: "mix-blend", exact: &[], roots: &["mix-blend"] },
    UtilityGroup { name: "blur", exact: &["blur"], roots: &["blur"] },
    UtilityGroup { name: "brightness", exact: &[], roots: &["brightness"] },
    UtilityGroup { name: "contrast", exact: &[], roots: &["contrast"] },
    UtilityGroup { name: "grayscale", exact: &["grayscale"], roots: &["grayscale"] },
    UtilityGroup { name: "backdrop", exact: &[], roots: &["backdrop-blur", "backdrop-brightness", "backdrop-opacity"] },
    UtilityGroup { name: "transition", exact: &["transition"], roots: &["transition"] },
    UtilityGroup { name: "duration", exact: &[], roots: &["duration"] },
    UtilityGroup { name: "ease", exact: &[], roots: &["ease"] },
    UtilityGroup { name: "delay", exact: &[], roots: &["delay"] },
    UtilityGroup { name: "animate", exact: &[], roots: &["animate"] },
    UtilityGroup { name: "scale", exact: &[], roots: &["scale", "scale-x", "scale-y"] },
    UtilityGroup { name: "rotate", exact: &[], roots: &["rotate"] },
    UtilityGroup { name: "translate", exact: &[], roots: &["translate-x", "translate-y"] },
    UtilityGroup { name: "skew", exact: &[], roots: &["skew-x", "skew-y"] },
    UtilityGroup { name: "transform-origin", exact: &[], roots: &["origin"] },
    UtilityGroup { name: "cursor", exact: &[], roots: &["cursor"] },
    UtilityGroup { name: "pointer-events", exact: &["pointer-events-none", "pointer-events-auto"], roots: &[] },
    UtilityGroup { name: "resize", exact: &["resize", "resize-none", "resize-x", "resize-y"], roots: &[] },
    UtilityGroup { name: "select", exact: &[], roots: &["select"] },
    UtilityGroup { name: "scroll", exact: &[], roots: &["scroll-m", "scroll-p", "scroll-smooth", "scroll-auto"] },
    UtilityGroup { name: "touch", exact: &[], roots: &["touch"] },
    UtilityGroup { name: "will-change", exact: &[], roots: &["will-change"] },
    UtilityGroup { name: "fill", exact: &[], roots: &["fill"] },
    UtilityGroup { name: "stroke", exact: &[], roots: &["stroke"] },
    UtilityGroup { name: "sr", exact: &["sr-only", "not-sr-only"], roots: &[] },
];

/// Recognized variant prefixes, in precedence order. Classes with variants
/// sort after their unprefixed counterparts.
static VARIANTS: &[&str] = &[
    "sm", "md", "lg", "xl", "2xl", "first", "last", "odd", "even", "visited", "checked",
    "empty", "read-only", "group-hover", "group-focus", "focus-within", "hover", "focus",
    "focus-visible", "active", "disabled", "motion-safe", "motion-reduce", "dark", "print",
    "rtl", "ltr", "before", "after", "placeholder", "selection", "marker", "file",
];

/// A class split into its variant chain and base utility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedClass<'a> {
    pub variants: Vec<&'a str>,
    pub base: &'a str,
    pub important: bool,
    pub negative: bool,
}

/// Split `lg:hover:-translate-x-1/2` into variants and base. Separators
/// inside `[...]` are ignored, so `bg-[url('a:b')]` stays whole.
pub fn parse_class(class: &str) -> ParsedClass<'_> {
    let mut variants = Vec::new();
    let mut depth = 0usize;
    let mut seg_start = 0usize;
    let mut base_start = 0usize;

    for (i, ch) in class.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => {
                variants.push(&class[seg_start..i]);
                seg_start = i + 1;
                base_start = i + 1;
            }
            _ => {}
        }
    }

    let mut base = &class[base_start..];
    let important = base.starts_with('!');
    if important {
        base = &base[1..];
    }
    let negative = base.starts_with('-') && base.len() > 1;
    if negative {
        base = &base[1..];
    }

    ParsedClass {
        variants,
        base,
        important,
        negative,
    }
}

fn root_matches(base: &str, root: &str) -> bool {
    base == root || (base.starts_with(root) && base.as_bytes().get(root.len()) == Some(&b'-'))
}

/// Find the utility group index for a base utility, preferring the most
/// specific (longest) root.
fn group_index(base: &str) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None; // (root length, group index)
    for (gi, group) in GROUPS.iter().enumerate() {
        if group.exact.iter().any(|e| *e == base) {
            // Exact tokens always beat prefix matches
            return Some(gi);
        }
        for root in group.roots {
            if root_matches(base, root) {
                let len = root.len();
                if best.map(|(l, _)| len > l).unwrap_or(true) {
                    best = Some((len, gi));
                }
            }
        }
    }
    best.map(|(_, gi)| gi)
}

fn variant_weight(variants: &[&str]) -> u64 {
    match variants.first() {
        None => 0,
        Some(first) => {
            let base = first.trim_start_matches('[');
            VARIANTS
                .iter()
                .position(|v| v == first || *v == base)
                .map(|p| p as u64 + 1)
                .unwrap_or(VARIANTS.len() as u64 + 1)
        }
    }
}

fn value_rank(base: &str) -> u64 {
    let digits: String = base
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if let Ok(n) = digits.parse::<u64>() {
        return n.min(998);
    }
    // Deterministic non-numeric rank from the first byte
    base.bytes().next().map(|b| b as u64).unwrap_or(0)
}

/// Strip the configured prefix from the base utility. Returns `None` when a
/// prefix is configured but absent, which marks the class as unrecognized.
fn strip_prefix<'a>(base: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(base);
    }
    base.strip_prefix(prefix)
}

/// The order number the framework stand-in assigns to `class`, or `None` for
/// classes it does not recognize. Stable for a given prefix and custom set.
pub fn class_order(class: &str, prefix: &str, custom: &HashSet<String>) -> Option<u64> {
    if custom.contains(class) {
        // Custom component classes sort before utilities
        return Some(0);
    }
    let parsed = parse_class(class);
    let base = strip_prefix(parsed.base, prefix)?;
    let gi = group_index(base)?;
    Some(variant_weight(&parsed.variants) * 1_000_000 + (gi as u64 + 1) * 1000 + value_rank(base))
}

/// Whether the framework recognizes this class at all. Arbitrary properties
/// (`[mask-type:luminance]`) always count as registered.
pub fn is_registered(class: &str, prefix: &str, custom: &HashSet<String>) -> bool {
    if custom.contains(class) {
        return true;
    }
    let parsed = parse_class(class);
    if parsed.base.starts_with('[') && parsed.base.ends_with(']') {
        return true;
    }
    match strip_prefix(parsed.base, prefix) {
        Some(base) => group_index(base).is_some() || custom.contains(base),
        None => false,
    }
}

/// Conflict key: two classes with the same key target the same declaration
/// under the same variant chain. Different names with equal keys conflict.
pub fn conflict_key(class: &str, prefix: &str) -> Option<String> {
    let parsed = parse_class(class);
    let base = strip_prefix(parsed.base, prefix)?;
    let gi = group_index(base)?;
    let mut key = parsed.variants.join(":");
    key.push('|');
    key.push_str(GROUPS[gi].name);
    Some(key)
}
