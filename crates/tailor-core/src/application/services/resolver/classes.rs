//! Utility-class merging by property group.
//!
//! `<tw/>` resolution concatenates class sets from several sources (theme
//! base, element context, generated content). Naively joining them yields
//! contradictions like `bg-red-500 bg-blue-500`. Merging groups tokens by
//! the CSS property they target and keeps the **last** token per group, so
//! later sources override earlier ones exactly like inline CSS would.
//!
//! Tokens whose group is unknown pass through untouched (deduplicated
//! verbatim). Malformed tokens with a doubled prefix (`bg-bg-blue-500`)
//! are dropped.

/// Property group a utility token targets. Variant prefixes
/// (`hover:`, `focus:`, breakpoints) are kept as part of the group key so
/// `bg-…` and `hover:bg-…` never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Group {
    BackgroundColor,
    TextColor,
    TextSize,
    FontWeight,
    FontFamily,
    PaddingX,
    PaddingY,
    PaddingAll,
    Margin,
    Radius,
    Shadow,
    Layout,
    Width,
    Height,
    /// Unrecognized tokens: keyed by their own text, i.e. deduplicated
    /// verbatim but never overridden by a different token.
    Verbatim(String),
}

const TEXT_SIZES: &[&str] = &[
    "xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl", "7xl", "8xl", "9xl",
];

const FONT_WEIGHTS: &[&str] = &[
    "thin", "extralight", "light", "normal", "medium", "semibold", "bold", "extrabold", "black",
];

const LAYOUT_TOKENS: &[&str] = &[
    "flex", "inline-flex", "grid", "inline-grid", "block", "inline-block", "inline", "hidden",
];

/// Split a token into variant prefix ("hover:", "md:", possibly stacked)
/// and the bare utility.
fn split_variant(token: &str) -> (&str, &str) {
    match token.rfind(':') {
        Some(idx) => (&token[..=idx], &token[idx + 1..]),
        None => ("", token),
    }
}

/// A doubled leading prefix (`bg-bg-…`, `text-text-…`) marks a mangled
/// token; these are dropped entirely.
fn is_malformed(bare: &str) -> bool {
    match bare.split_once('-') {
        Some((head, tail)) => tail.starts_with(head) && tail[head.len()..].starts_with('-'),
        None => false,
    }
}

fn group_of(bare: &str) -> Group {
    if bare.starts_with("bg-") {
        return Group::BackgroundColor;
    }
    if let Some(rest) = bare.strip_prefix("text-") {
        if TEXT_SIZES.contains(&rest) {
            return Group::TextSize;
        }
        return Group::TextColor;
    }
    if let Some(rest) = bare.strip_prefix("font-") {
        if FONT_WEIGHTS.contains(&rest) {
            return Group::FontWeight;
        }
        return Group::FontFamily;
    }
    if bare.starts_with("px-") {
        return Group::PaddingX;
    }
    if bare.starts_with("py-") {
        return Group::PaddingY;
    }
    if bare.starts_with("p-") {
        return Group::PaddingAll;
    }
    if bare.starts_with("m-")
        || bare.starts_with("mx-")
        || bare.starts_with("my-")
        || bare.starts_with("mt-")
        || bare.starts_with("mb-")
        || bare.starts_with("ml-")
        || bare.starts_with("mr-")
    {
        return Group::Margin;
    }
    if bare == "rounded" || bare.starts_with("rounded-") {
        return Group::Radius;
    }
    if bare == "shadow" || bare.starts_with("shadow-") {
        return Group::Shadow;
    }
    if LAYOUT_TOKENS.contains(&bare) {
        return Group::Layout;
    }
    if bare.starts_with("w-") {
        return Group::Width;
    }
    if bare.starts_with("h-") {
        return Group::Height;
    }
    Group::Verbatim(bare.to_string())
}

/// Merge any number of class strings, later sources winning per group.
///
/// Output order is first-appearance order of each group, which keeps the
/// result stable across runs.
pub fn merge_classes(sources: &[&str]) -> String {
    // (group key incl. variant, token) in first-seen order
    let mut ordered: Vec<((String, Group), String)> = Vec::new();

    for source in sources {
        for token in source.split_whitespace() {
            let (variant, bare) = split_variant(token);
            if is_malformed(bare) {
                continue;
            }
            let key = (variant.to_string(), group_of(bare));
            match ordered.iter_mut().find(|(k, _)| *k == key) {
                Some((_, existing)) => *existing = token.to_string(),
                None => ordered.push((key, token.to_string())),
            }
        }
    }

    ordered
        .into_iter()
        .map(|(_, token)| token)
        .collect::<Vec<_>>()
        .join(" ")
}
