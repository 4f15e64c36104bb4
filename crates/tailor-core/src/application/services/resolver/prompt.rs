//! Brand classification and prompt construction for content generation.
//!
//! The brand name is classified once per run into a business kind via
//! keyword containment over Thai and English lists; the kind fixes the
//! writing tone and target audience embedded into every prompt.
//! Generator responses pass through fence/quote stripping and a per-kind
//! shape check before the resolver accepts them.

use serde::Serialize;

use crate::domain::PlaceholderKind;

/// Business classification derived from the brand name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessKind {
    Food,
    Fashion,
    Technology,
    Health,
    General,
}

/// Writing tone paired to a business kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Warm,
    Trendy,
    Modern,
    Trustworthy,
    Professional,
}

impl Tone {
    fn describe(self) -> &'static str {
        match self {
            Self::Warm => "warm and inviting",
            Self::Trendy => "trendy and confident",
            Self::Modern => "modern and concise",
            Self::Trustworthy => "trustworthy and reassuring",
            Self::Professional => "professional and clear",
        }
    }
}

/// Classified brand, computed once per pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandProfile {
    pub name: String,
    pub business: BusinessKind,
    pub tone: Tone,
    pub audience: &'static str,
}

impl BrandProfile {
    /// Classify a brand name by keyword containment (case-insensitive for
    /// the Latin lists; Thai keywords match as-is).
    pub fn classify(brand_name: &str) -> Self {
        let lowered = brand_name.to_lowercase();
        let business = classify_keywords(&lowered);
        let (tone, audience) = match business {
            BusinessKind::Food => (Tone::Warm, "diners and food lovers"),
            BusinessKind::Fashion => (Tone::Trendy, "style-conscious shoppers"),
            BusinessKind::Technology => (Tone::Modern, "professionals and early adopters"),
            BusinessKind::Health => (Tone::Trustworthy, "patients and wellness seekers"),
            BusinessKind::General => (Tone::Professional, "prospective customers"),
        };
        Self {
            name: brand_name.to_string(),
            business,
            tone,
            audience,
        }
    }
}

const FOOD_KEYWORDS: &[&str] = &[
    "อาหาร", "ร้านอาหาร", "คาเฟ่", "กาแฟ", "เบเกอรี่", "ครัว", "restaurant", "cafe", "coffee",
    "bakery", "food", "kitchen", "bistro", "eatery",
];

const FASHION_KEYWORDS: &[&str] = &[
    "แฟชั่น", "เสื้อผ้า", "บูติก", "เครื่องประดับ", "fashion", "boutique", "clothing", "apparel",
    "style", "wear", "jewelry",
];

const TECHNOLOGY_KEYWORDS: &[&str] = &[
    "เทคโนโลยี", "ซอฟต์แวร์", "แอป", "ดิจิทัล", "tech", "software", "digital", "app", "cloud",
    "data", "labs", "systems",
];

const HEALTH_KEYWORDS: &[&str] = &[
    "สุขภาพ", "คลินิก", "สปา", "ฟิตเนส", "โยคะ", "health", "clinic", "wellness", "spa",
    "fitness", "yoga", "care", "dental",
];

fn classify_keywords(lowered: &str) -> BusinessKind {
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    if contains_any(FOOD_KEYWORDS) {
        BusinessKind::Food
    } else if contains_any(FASHION_KEYWORDS) {
        BusinessKind::Fashion
    } else if contains_any(TECHNOLOGY_KEYWORDS) {
        BusinessKind::Technology
    } else if contains_any(HEALTH_KEYWORDS) {
        BusinessKind::Health
    } else {
        BusinessKind::General
    }
}

/// Build the generation prompt for one marker.
///
/// Each kind gets its own template; `data`/`slot` markers share the
/// structured-value wording. `context_snippet` is the literal text around
/// the marker, giving the model the surrounding copy.
pub fn build_prompt(
    kind: PlaceholderKind,
    profile: &BrandProfile,
    context_snippet: &str,
) -> String {
    let brand = &profile.name;
    let business = format!("{:?}", profile.business).to_lowercase();
    let tone = profile.tone.describe();
    let audience = profile.audience;

    let body = match kind {
        PlaceholderKind::Tw => format!(
            "Produce a single line of Tailwind CSS utility classes styling the element \
             in the markup excerpt below for the brand \"{brand}\" ({business}). \
             Answer with the class list only, no explanation, no quotes."
        ),
        PlaceholderKind::Text => format!(
            "Write one short piece of website copy for the brand \"{brand}\" ({business}). \
             Tone: {tone}. Audience: {audience}. \
             Answer with the sentence only, no quotes, no markdown."
        ),
        PlaceholderKind::Img => format!(
            "Suggest one image URL suitable for the brand \"{brand}\" ({business}) at the \
             position shown in the markup excerpt below. \
             Answer with a bare https URL only."
        ),
        PlaceholderKind::Data | PlaceholderKind::Slot => format!(
            "Provide a realistic value for the marked data field for the brand \
             \"{brand}\" ({business}). Tone: {tone}. \
             Answer with the bare value only, no key, no quotes, no markdown."
        ),
    };

    if context_snippet.trim().is_empty() {
        body
    } else {
        format!("{body}\n\nMarkup excerpt:\n{context_snippet}")
    }
}

/// Strip markdown code fences and one layer of surrounding quotes.
pub fn clean_response(raw: &str) -> String {
    let mut text = raw.trim();

    // Fenced block: keep the inside, drop an optional language tag.
    if let Some(inner) = text
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    {
        let inner = match inner.split_once('\n') {
            Some((first_line, body)) if !first_line.trim().contains(' ') => body,
            _ => inner,
        };
        text = inner.trim();
    }

    for (open, close) in [('"', '"'), ('\'', '\''), ('“', '”')] {
        if text.len() >= 2 && text.starts_with(open) && text.ends_with(close) {
            text = text[open.len_utf8()..text.len() - close.len_utf8()].trim();
            break;
        }
    }

    text.to_string()
}

/// Shape check for a cleaned response. A `false` here counts as a
/// generator failure and the resolver falls through to its deterministic
/// step.
pub fn acceptable_response(kind: PlaceholderKind, cleaned: &str) -> bool {
    if cleaned.is_empty() {
        return false;
    }
    match kind {
        PlaceholderKind::Tw => {
            // One line of class-shaped tokens.
            !cleaned.contains('\n')
                && cleaned.split_whitespace().all(|token| {
                    token
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || ":-/[].#%".contains(c))
                })
        }
        PlaceholderKind::Img => {
            (cleaned.starts_with("https://") || cleaned.starts_with("http://"))
                && !cleaned.contains(char::is_whitespace)
        }
        PlaceholderKind::Text | PlaceholderKind::Data | PlaceholderKind::Slot => {
            // Single-paragraph prose; reject anything that still looks like
            // markup or markdown structure.
            !cleaned.contains("\n\n") && !cleaned.starts_with('{') && !cleaned.starts_with('<')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_english_keywords() {
        assert_eq!(
            BrandProfile::classify("Blue Harbor Cafe").business,
            BusinessKind::Food
        );
        assert_eq!(
            BrandProfile::classify("Nimbus Software").business,
            BusinessKind::Technology
        );
        assert_eq!(
            BrandProfile::classify("Velvet Boutique").business,
            BusinessKind::Fashion
        );
        assert_eq!(
            BrandProfile::classify("Sunrise Clinic").business,
            BusinessKind::Health
        );
    }

    #[test]
    fn classifies_thai_keywords() {
        assert_eq!(
            BrandProfile::classify("ร้านอาหารบ้านสวน").business,
            BusinessKind::Food
        );
        assert_eq!(
            BrandProfile::classify("คลินิกหมอฟัน").business,
            BusinessKind::Health
        );
    }

    #[test]
    fn unknown_brand_is_general_professional() {
        let profile = BrandProfile::classify("Acme Holdings");
        assert_eq!(profile.business, BusinessKind::General);
        assert_eq!(profile.tone, Tone::Professional);
    }

    #[test]
    fn tone_follows_business_kind() {
        assert_eq!(BrandProfile::classify("Corner Bakery").tone, Tone::Warm);
        assert_eq!(BrandProfile::classify("Apex Apparel").tone, Tone::Trendy);
    }

    #[test]
    fn prompts_differ_per_kind() {
        let profile = BrandProfile::classify("Nimbus Software");
        let tw = build_prompt(PlaceholderKind::Tw, &profile, "");
        let text = build_prompt(PlaceholderKind::Text, &profile, "");
        assert_ne!(tw, text);
        assert!(tw.contains("Tailwind"));
        assert!(text.contains("Tone:"));
    }

    #[test]
    fn prompt_embeds_context_snippet() {
        let profile = BrandProfile::classify("x");
        let prompt = build_prompt(PlaceholderKind::Text, &profile, "<h1>…</h1>");
        assert!(prompt.contains("<h1>…</h1>"));
    }

    #[test]
    fn clean_strips_fences_and_quotes() {
        assert_eq!(clean_response("```\nhello\n```"), "hello");
        assert_eq!(clean_response("```text\nhello\n```"), "hello");
        assert_eq!(clean_response("\"hello\""), "hello");
        assert_eq!(clean_response("  plain  "), "plain");
    }

    #[test]
    fn tw_response_shape() {
        assert!(acceptable_response(
            PlaceholderKind::Tw,
            "bg-blue-600 hover:bg-blue-700 px-4"
        ));
        assert!(!acceptable_response(PlaceholderKind::Tw, "line one\nline two"));
        assert!(!acceptable_response(PlaceholderKind::Tw, ""));
    }

    #[test]
    fn img_response_must_be_bare_url() {
        assert!(acceptable_response(
            PlaceholderKind::Img,
            "https://example.com/a.jpg"
        ));
        assert!(!acceptable_response(PlaceholderKind::Img, "a picture of bread"));
        assert!(!acceptable_response(
            PlaceholderKind::Img,
            "https://example.com/a.jpg and more"
        ));
    }

    #[test]
    fn text_response_rejects_markup() {
        assert!(acceptable_response(PlaceholderKind::Text, "Fresh bread daily."));
        assert!(!acceptable_response(PlaceholderKind::Text, "<p>hi</p>"));
        assert!(!acceptable_response(PlaceholderKind::Text, "para one\n\npara two"));
    }
}
