//! Placeholder scanning and tokenization.
//!
//! Template source text carries exactly five literal marker forms:
//!
//! | Form                  | Kind   | Captures        |
//! |-----------------------|--------|-----------------|
//! | `<tw/>`               | `Tw`   | —               |
//! | `<text/>`             | `Text` | —               |
//! | `<img/>`              | `Img`  | —               |
//! | `<data key="K"/>`     | `Data` | key `K`         |
//! | `{{ dotted.path }}`   | `Slot` | the dotted path |
//!
//! No other syntax is recognized. The scanner tokenizes a file **once**
//! into a sequence of literal and marker segments; substitution rebuilds
//! the file from those segments, so a resolved value can never be
//! re-scanned and double-substituted.
//!
//! For each marker, the enclosing markup context is inferred by scanning
//! the preceding text for the nearest unclosed opening tag. The tag name
//! and any complete `class`/`className` attribute value feed the
//! context-sensitive styling of `<tw/>` resolution.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The five marker kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderKind {
    Tw,
    Text,
    Img,
    Data,
    Slot,
}

impl PlaceholderKind {
    pub const ALL: [PlaceholderKind; 5] = [
        Self::Tw,
        Self::Text,
        Self::Img,
        Self::Data,
        Self::Slot,
    ];

    /// Canonical literal form, for messages and reports.
    pub fn literal(&self) -> &'static str {
        match self {
            Self::Tw => "<tw/>",
            Self::Text => "<text/>",
            Self::Img => "<img/>",
            Self::Data => "<data key=\"…\"/>",
            Self::Slot => "{{ … }}",
        }
    }
}

impl std::fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tw => write!(f, "tw"),
            Self::Text => write!(f, "text"),
            Self::Img => write!(f, "img"),
            Self::Data => write!(f, "data"),
            Self::Slot => write!(f, "slot"),
        }
    }
}

/// Markup context inferred around a marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MarkerContext {
    /// Name of the nearest unclosed tag before the marker.
    pub tag_name: Option<String>,

    /// Value of a complete `class`/`className` attribute on that tag.
    pub class_hint: Option<String>,
}

/// One marker occurrence in one file. Transient: recomputed per scan,
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub kind: PlaceholderKind,

    /// Captured key: dotted path for `data`/`slot`, `None` otherwise.
    pub key: Option<String>,

    /// Byte offset of the marker in its file.
    pub offset: usize,

    pub context: MarkerContext,
}

impl Placeholder {
    /// Resolution identity: markers of the same kind, key and context
    /// resolve once and share the value; differing context means an
    /// independent resolution.
    pub fn resolution_key(&self) -> (PlaceholderKind, Option<&str>, &MarkerContext) {
        (self.kind, self.key.as_deref(), &self.context)
    }
}

/// A tokenized slice of a source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    /// Text passed through untouched.
    Literal(&'a str),
    /// A marker to be replaced with resolved content.
    Marker { raw: &'a str, placeholder: Placeholder },
}

/// Compiled marker scanner.
///
/// Construct once and share by reference; an explicit object rather than
/// process-wide statics so concurrent pipelines cannot interfere.
#[derive(Debug)]
pub struct PlaceholderScanner {
    tw: Regex,
    text: Regex,
    img: Regex,
    data: Regex,
    slot: Regex,
    any_tag: Regex,
    class_attr: Regex,
}

/// Tags that never wrap content, so they can never be the enclosing
/// context of a marker.
const VOID_TAGS: &[&str] = &["img", "br", "hr", "input", "meta", "link", "source"];

impl PlaceholderScanner {
    pub fn new() -> Self {
        Self {
            tw: Regex::new(r"<tw\s*/>").expect("tw marker regex"),
            text: Regex::new(r"<text\s*/>").expect("text marker regex"),
            img: Regex::new(r"<img\s*/>").expect("img marker regex"),
            data: Regex::new(r#"<data\s+key="([^"]*)"\s*/>"#).expect("data marker regex"),
            slot: Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+)*)\s*\}\}")
                .expect("slot marker regex"),
            any_tag: Regex::new(r#"<(/?)([A-Za-z][A-Za-z0-9-]*)((?:[^<>"]|"[^"]*")*?)(/?)>"#)
                .expect("tag regex"),
            class_attr: Regex::new(r#"(?:className|class)\s*=\s*"([^"]*)""#)
                .expect("class attribute regex"),
        }
    }

    /// Tokenize a source file into literal and marker segments.
    pub fn tokenize<'a>(&self, source: &'a str) -> Vec<Segment<'a>> {
        let mut matches: Vec<(usize, usize, PlaceholderKind, Option<String>)> = Vec::new();

        for m in self.tw.find_iter(source) {
            matches.push((m.start(), m.end(), PlaceholderKind::Tw, None));
        }
        for m in self.text.find_iter(source) {
            matches.push((m.start(), m.end(), PlaceholderKind::Text, None));
        }
        for m in self.img.find_iter(source) {
            matches.push((m.start(), m.end(), PlaceholderKind::Img, None));
        }
        for c in self.data.captures_iter(source) {
            let whole = c.get(0).expect("whole match");
            matches.push((
                whole.start(),
                whole.end(),
                PlaceholderKind::Data,
                Some(c[1].to_string()),
            ));
        }
        for c in self.slot.captures_iter(source) {
            let whole = c.get(0).expect("whole match");
            matches.push((
                whole.start(),
                whole.end(),
                PlaceholderKind::Slot,
                Some(c[1].to_string()),
            ));
        }

        matches.sort_by_key(|(start, _, _, _)| *start);

        let mut segments = Vec::new();
        let mut cursor = 0usize;
        for (start, end, kind, key) in matches {
            // The five patterns cannot overlap each other, but be defensive
            // about identical scans producing duplicates.
            if start < cursor {
                continue;
            }
            if start > cursor {
                segments.push(Segment::Literal(&source[cursor..start]));
            }
            segments.push(Segment::Marker {
                raw: &source[start..end],
                placeholder: Placeholder {
                    kind,
                    key,
                    offset: start,
                    context: self.infer_context(&source[..start]),
                },
            });
            cursor = end;
        }
        if cursor < source.len() {
            segments.push(Segment::Literal(&source[cursor..]));
        }

        segments
    }

    /// Scan for markers only (no literal segments).
    pub fn scan(&self, source: &str) -> Vec<Placeholder> {
        self.tokenize(source)
            .into_iter()
            .filter_map(|seg| match seg {
                Segment::Marker { placeholder, .. } => Some(placeholder),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Count residual marker occurrences per kind. Used after resolution:
    /// anything non-zero means a placeholder survived the pipeline.
    pub fn residual_counts(&self, text: &str) -> Vec<(PlaceholderKind, usize)> {
        let counts = [
            (PlaceholderKind::Tw, self.tw.find_iter(text).count()),
            (PlaceholderKind::Text, self.text.find_iter(text).count()),
            (PlaceholderKind::Img, self.img.find_iter(text).count()),
            (PlaceholderKind::Data, self.data.find_iter(text).count()),
            (PlaceholderKind::Slot, self.slot.find_iter(text).count()),
        ];
        counts.into_iter().filter(|(_, n)| *n > 0).collect()
    }

    /// Find the nearest unclosed opening tag before a marker.
    ///
    /// Two cases:
    /// 1. The marker sits inside an opening tag's attribute area
    ///    (`<button className="<tw/>"`): the trailing partial tag is the
    ///    context.
    /// 2. The marker sits in element content (`<h1><text/></h1>`): a
    ///    stack scan over the complete tags in the prefix finds the
    ///    innermost element still open.
    fn infer_context(&self, prefix: &str) -> MarkerContext {
        let last_open = prefix.rfind('<');
        let last_close = prefix.rfind('>');

        // Case 1: an unterminated `<tag ...` trails the prefix.
        if let Some(open) = last_open {
            if last_close.map_or(true, |close| close < open) {
                let partial = &prefix[open..];
                if !partial.starts_with("</") {
                    if let Some(name) = partial
                        .strip_prefix('<')
                        .and_then(|rest| {
                            let name: String = rest
                                .chars()
                                .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
                                .collect();
                            (!name.is_empty()).then_some(name)
                        })
                    {
                        return MarkerContext {
                            class_hint: self.extract_class(partial),
                            tag_name: Some(name),
                        };
                    }
                }
                // A stray `<` or closing tag: strip it and fall through to
                // the stack scan.
                return self.stack_context(&prefix[..open]);
            }
        }

        self.stack_context(prefix)
    }

    /// Stack scan over complete tags: push opens, pop closes, skip
    /// self-closing and void tags. The top of the stack is the enclosing
    /// element.
    fn stack_context(&self, prefix: &str) -> MarkerContext {
        let mut stack: Vec<(String, Option<String>)> = Vec::new();

        for c in self.any_tag.captures_iter(prefix) {
            let closing = &c[1] == "/";
            let name = c[2].to_ascii_lowercase();
            let self_closing = &c[4] == "/";

            if closing {
                if let Some(pos) = stack.iter().rposition(|(n, _)| *n == name) {
                    stack.truncate(pos);
                }
            } else if !self_closing && !VOID_TAGS.contains(&name.as_str()) {
                let class_hint = self.extract_class(&c[3]);
                stack.push((name, class_hint));
            }
        }

        match stack.pop() {
            Some((tag_name, class_hint)) => MarkerContext {
                tag_name: Some(tag_name),
                class_hint,
            },
            None => MarkerContext::default(),
        }
    }

    fn extract_class(&self, attrs: &str) -> Option<String> {
        self.class_attr
            .captures(attrs)
            .map(|c| c[1].to_string())
    }
}

impl Default for PlaceholderScanner {
    fn default() -> Self {
        Self::new()
    }
}
