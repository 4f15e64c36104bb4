//! Content resolution: one placeholder in, one string out, no exceptions.
//!
//! Each marker kind owns an explicit ordered chain of resolution steps.
//! A step either resolves, skips (not applicable), or fails (applicable
//! but broken, recorded as a warning); the chain continues until a step
//! resolves. Every chain ends in a total step, so `resolve` cannot fail.
//!
//! ```text
//! tw   : generated → theme classes (total)
//! text : generated → user content → brand default (total)
//! img  : user image → generated → placeholder url (total)
//! data : data lookup → generated → brand default (total)
//! slot : slot lookup → generated → brand default (total)
//! ```
//!
//! The generated step only participates when a [`ContentGenerator`] is
//! wired in; its failures (transport, timeout, unusable shape) never
//! leave this module as errors.

pub mod classes;
pub mod prompt;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::application::ports::{ContentGenerator, GenerationRequest};
use crate::domain::{
    FilledSlot, Placeholder, PlaceholderKind, Theme, UserData, lookup_path,
};

pub use classes::merge_classes;
pub use prompt::{BrandProfile, BusinessKind, Tone, acceptable_response, build_prompt, clean_response};

/// Read-only inputs shared by every resolution in one run.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub theme: &'a Theme,
    pub brand: &'a BrandProfile,
    pub user: &'a UserData,
    pub slots: &'a BTreeMap<String, FilledSlot>,
}

/// One unit of resolution work: the marker plus the literal text around
/// it (fed into generation prompts).
#[derive(Debug, Clone)]
pub struct ResolveJob {
    pub placeholder: Placeholder,
    pub snippet: String,
}

/// The outcome of a full chain run. Total: there is always a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub value: String,
    /// Name of the step that produced the value.
    pub resolved_by: &'static str,
    /// Soft failures encountered on the way (generator errors, missing
    /// data paths).
    pub warnings: Vec<String>,
}

/// Outcome of a single step.
enum StepOutcome {
    Resolved(String),
    /// Step not applicable here (no generator wired, no user override).
    Skipped,
    /// Step applicable but failed; message becomes a warning.
    Failed(String),
}

/// Steps, named for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Generated,
    ThemeClasses,
    UserContent,
    UserImage,
    DataLookup,
    SlotLookup,
    BrandDefault,
    PlaceholderImage,
}

impl Step {
    fn name(self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::ThemeClasses => "theme-classes",
            Self::UserContent => "user-content",
            Self::UserImage => "user-image",
            Self::DataLookup => "data-lookup",
            Self::SlotLookup => "slot-lookup",
            Self::BrandDefault => "brand-default",
            Self::PlaceholderImage => "placeholder-image",
        }
    }
}

/// The ordered chain per marker kind. Structured data always wins over
/// generation: a caller's explicit `dynamicData`/slot value is business
/// truth, not something to paraphrase.
fn chain(kind: PlaceholderKind) -> &'static [Step] {
    match kind {
        PlaceholderKind::Tw => &[Step::Generated, Step::ThemeClasses],
        PlaceholderKind::Text => &[Step::Generated, Step::UserContent, Step::BrandDefault],
        PlaceholderKind::Img => &[Step::UserImage, Step::Generated, Step::PlaceholderImage],
        PlaceholderKind::Data => &[Step::DataLookup, Step::Generated, Step::BrandDefault],
        PlaceholderKind::Slot => &[Step::SlotLookup, Step::Generated, Step::BrandDefault],
    }
}

/// Resolves placeholders through per-kind step chains.
pub struct ContentResolver {
    generator: Option<Arc<dyn ContentGenerator>>,
}

impl ContentResolver {
    /// Resolver without generation: every chain goes straight to its
    /// deterministic steps.
    pub fn new() -> Self {
        Self { generator: None }
    }

    pub fn with_generator(generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Run the chain for one marker. Total: always returns a value.
    pub fn resolve(&self, job: &ResolveJob, cx: &ResolveContext<'_>) -> Resolution {
        let mut warnings = Vec::new();

        for step in chain(job.placeholder.kind) {
            match self.run_step(*step, job, cx) {
                StepOutcome::Resolved(value) => {
                    debug!(
                        kind = %job.placeholder.kind,
                        step = step.name(),
                        "placeholder resolved"
                    );
                    return Resolution {
                        value,
                        resolved_by: step.name(),
                        warnings,
                    };
                }
                StepOutcome::Skipped => {}
                StepOutcome::Failed(reason) => {
                    debug!(
                        kind = %job.placeholder.kind,
                        step = step.name(),
                        %reason,
                        "resolution step failed, falling through"
                    );
                    warnings.push(reason);
                }
            }
        }

        // Every chain ends in a total step; this is unreachable with the
        // chains above, but stay total regardless.
        Resolution {
            value: brand_default(cx.brand),
            resolved_by: Step::BrandDefault.name(),
            warnings,
        }
    }

    fn run_step(&self, step: Step, job: &ResolveJob, cx: &ResolveContext<'_>) -> StepOutcome {
        let placeholder = &job.placeholder;
        match step {
            Step::Generated => self.generated(job, cx),
            Step::ThemeClasses => {
                let context = &placeholder.context;
                let base = cx.theme.base_classes();
                let contextual = cx
                    .theme
                    .context_classes(context.tag_name.as_deref(), context.class_hint.as_deref());
                StepOutcome::Resolved(merge_classes(&[base.as_str(), contextual.as_str()]))
            }
            Step::UserContent => {
                let content = &cx.user.content;
                let by_tag = placeholder
                    .context
                    .tag_name
                    .as_deref()
                    .and_then(|tag| content.get(tag));
                match by_tag.or_else(|| content.get("text")) {
                    Some(value) => StepOutcome::Resolved(value.clone()),
                    None => StepOutcome::Skipped,
                }
            }
            Step::UserImage => {
                let images = &cx.user.images;
                let context = &placeholder.context;
                let found = context
                    .class_hint
                    .as_deref()
                    .and_then(|hint| images.get(hint))
                    .or_else(|| context.tag_name.as_deref().and_then(|tag| images.get(tag)))
                    .or_else(|| images.get("default"));
                match found {
                    Some(url) => StepOutcome::Resolved(url.clone()),
                    None => StepOutcome::Skipped,
                }
            }
            Step::DataLookup => {
                let Some(path) = placeholder.key.as_deref() else {
                    return StepOutcome::Failed("data marker without key".into());
                };
                match cx.user.dynamic_value(path).and_then(value_to_text) {
                    Some(text) => StepOutcome::Resolved(text),
                    None => StepOutcome::Failed(format!("no dynamic data at path '{path}'")),
                }
            }
            Step::SlotLookup => {
                let Some(path) = placeholder.key.as_deref() else {
                    return StepOutcome::Failed("slot marker without key".into());
                };
                match slot_value(cx.slots, path).and_then(value_to_text) {
                    Some(text) => StepOutcome::Resolved(text),
                    None => StepOutcome::Failed(format!("no slot value at path '{path}'")),
                }
            }
            Step::BrandDefault => StepOutcome::Resolved(brand_default(cx.brand)),
            Step::PlaceholderImage => {
                StepOutcome::Resolved(placeholder_image_url(&cx.brand.name))
            }
        }
    }

    /// The generation step: prompt, call, clean, shape-check.
    fn generated(&self, job: &ResolveJob, cx: &ResolveContext<'_>) -> StepOutcome {
        let Some(generator) = self.generator.as_deref() else {
            return StepOutcome::Skipped;
        };

        let kind = job.placeholder.kind;
        let request = GenerationRequest {
            kind,
            prompt: build_prompt(kind, cx.brand, &job.snippet),
            brand: cx.brand.name.clone(),
        };

        match generator.generate(&request) {
            Ok(raw) => {
                let cleaned = clean_response(&raw);
                if acceptable_response(kind, &cleaned) {
                    StepOutcome::Resolved(cleaned)
                } else {
                    StepOutcome::Failed(format!("generator returned unusable {kind} content"))
                }
            }
            Err(e) => StepOutcome::Failed(format!("content generation failed: {e}")),
        }
    }
}

impl Default for ContentResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up `slotName.fieldKey[.deeper]` in the filled slots.
fn slot_value<'a>(
    slots: &'a BTreeMap<String, FilledSlot>,
    path: &str,
) -> Option<&'a Value> {
    let (slot_name, field_path) = path.split_once('.')?;
    let slot = slots.get(slot_name)?;
    let (field_key, rest) = match field_path.split_once('.') {
        Some((head, tail)) => (head, Some(tail)),
        None => (field_path, None),
    };
    let value = slot.get(field_key)?;
    match rest {
        Some(tail) => lookup_path(value, tail),
        None => Some(value),
    }
}

/// Render a JSON value as display text. Objects and nulls count as
/// missing; substituting serialized JSON into copy is never wanted.
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_to_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Null | Value::Object(_) => None,
    }
}

/// Deterministic, brand-derived default copy.
fn brand_default(brand: &BrandProfile) -> String {
    let name = &brand.name;
    match brand.business {
        BusinessKind::Food => format!("Freshly made, every day, at {name}."),
        BusinessKind::Fashion => format!("Discover your style at {name}."),
        BusinessKind::Technology => format!("{name} builds tools that move you forward."),
        BusinessKind::Health => format!("Your wellbeing comes first at {name}."),
        BusinessKind::General => format!("Welcome to {name}, quality you can trust."),
    }
}

/// Deterministic placeholder image, parameterized by brand name.
fn placeholder_image_url(brand_name: &str) -> String {
    let encoded: String = brand_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_string()
            } else {
                c.to_string()
                    .bytes()
                    .map(|b| format!("%{:02X}", b))
                    .collect()
            }
        })
        .collect();
    format!("https://placehold.co/800x600?text={encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{GeneratorError, MockContentGenerator};
    use crate::domain::{MarkerContext, ThemeRegistry};
    use serde_json::json;

    fn job(kind: PlaceholderKind, key: Option<&str>, tag: Option<&str>) -> ResolveJob {
        ResolveJob {
            placeholder: Placeholder {
                kind,
                key: key.map(String::from),
                offset: 0,
                context: MarkerContext {
                    tag_name: tag.map(String::from),
                    class_hint: None,
                },
            },
            snippet: String::new(),
        }
    }

    struct Fixture {
        registry: ThemeRegistry,
        brand: BrandProfile,
        user: UserData,
        slots: BTreeMap<String, FilledSlot>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                registry: ThemeRegistry::with_builtin(),
                brand: BrandProfile::classify("Baan Kaffe Coffee"),
                user: UserData::default(),
                slots: BTreeMap::new(),
            }
        }

        fn cx(&self, theme: &str) -> ResolveContext<'_> {
            ResolveContext {
                theme: self.registry.get(theme).unwrap(),
                brand: &self.brand,
                user: &self.user,
                slots: &self.slots,
            }
        }
    }

    #[test]
    fn tw_without_generator_uses_theme_classes() {
        let fx = Fixture::new();
        let resolver = ContentResolver::new();
        let result = resolver.resolve(
            &job(PlaceholderKind::Tw, None, Some("button")),
            &fx.cx("cozy"),
        );
        assert_eq!(result.resolved_by, "theme-classes");
        assert!(result.value.contains("bg-emerald-600"));
        assert!(result.value.contains("rounded-lg"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn tw_merge_drops_duplicate_groups() {
        let fx = Fixture::new();
        let resolver = ContentResolver::new();
        let result = resolver.resolve(
            &job(PlaceholderKind::Tw, None, Some("button")),
            &fx.cx("cozy"),
        );
        let bg_count = result
            .value
            .split_whitespace()
            .filter(|t| t.starts_with("bg-"))
            .count();
        let px_count = result
            .value
            .split_whitespace()
            .filter(|t| t.starts_with("px-"))
            .count();
        assert_eq!(bg_count, 1);
        assert_eq!(px_count, 1);
    }

    #[test]
    fn text_prefers_user_content_over_default() {
        let mut fx = Fixture::new();
        fx.user.content.insert("h1".into(), "Hand-picked beans".into());
        let resolver = ContentResolver::new();
        let result = resolver.resolve(
            &job(PlaceholderKind::Text, None, Some("h1")),
            &fx.cx("modern"),
        );
        assert_eq!(result.value, "Hand-picked beans");
        assert_eq!(result.resolved_by, "user-content");
    }

    #[test]
    fn text_falls_back_to_brand_default() {
        let fx = Fixture::new();
        let resolver = ContentResolver::new();
        let result = resolver.resolve(
            &job(PlaceholderKind::Text, None, Some("p")),
            &fx.cx("modern"),
        );
        assert_eq!(result.resolved_by, "brand-default");
        assert!(result.value.contains("Baan Kaffe"));
    }

    #[test]
    fn img_fallback_is_deterministic_placeholder() {
        let fx = Fixture::new();
        let resolver = ContentResolver::new();
        let result = resolver.resolve(&job(PlaceholderKind::Img, None, None), &fx.cx("modern"));
        assert_eq!(result.resolved_by, "placeholder-image");
        assert!(result.value.starts_with("https://placehold.co/800x600?text=Baan%20Kaffe"));
    }

    #[test]
    fn img_prefers_user_image() {
        let mut fx = Fixture::new();
        fx.user
            .images
            .insert("default".into(), "https://cdn.example/hero.jpg".into());
        let resolver = ContentResolver::new();
        let result = resolver.resolve(&job(PlaceholderKind::Img, None, None), &fx.cx("modern"));
        assert_eq!(result.value, "https://cdn.example/hero.jpg");
        assert_eq!(result.resolved_by, "user-image");
    }

    #[test]
    fn data_lookup_resolves_dotted_path() {
        let mut fx = Fixture::new();
        fx.user.dynamic_data = json!({"contact": {"email": "hi@kaffe.example"}});
        let resolver = ContentResolver::new();
        let result = resolver.resolve(
            &job(PlaceholderKind::Data, Some("contact.email"), None),
            &fx.cx("modern"),
        );
        assert_eq!(result.value, "hi@kaffe.example");
        assert_eq!(result.resolved_by, "data-lookup");
    }

    #[test]
    fn missing_data_path_warns_and_falls_back() {
        let fx = Fixture::new();
        let resolver = ContentResolver::new();
        let result = resolver.resolve(
            &job(PlaceholderKind::Data, Some("contact.phone"), None),
            &fx.cx("modern"),
        );
        assert_eq!(result.resolved_by, "brand-default");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("contact.phone"));
    }

    #[test]
    fn slot_lookup_reads_filled_slots() {
        let mut fx = Fixture::new();
        let mut slot = FilledSlot::default();
        slot.insert("title", json!("Morning Roast"));
        fx.slots.insert("hero".into(), slot);
        let resolver = ContentResolver::new();
        let result = resolver.resolve(
            &job(PlaceholderKind::Slot, Some("hero.title"), None),
            &fx.cx("modern"),
        );
        assert_eq!(result.value, "Morning Roast");
    }

    #[test]
    fn generator_success_wins_for_text() {
        let fx = Fixture::new();
        let mut generator = MockContentGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Ok("\"Slow mornings, good coffee.\"".into()));
        let resolver = ContentResolver::with_generator(Arc::new(generator));
        let result = resolver.resolve(
            &job(PlaceholderKind::Text, None, Some("p")),
            &fx.cx("modern"),
        );
        assert_eq!(result.resolved_by, "generated");
        // Quotes stripped by response cleanup.
        assert_eq!(result.value, "Slow mornings, good coffee.");
    }

    #[test]
    fn generator_failure_degrades_to_fallback_with_warning() {
        let fx = Fixture::new();
        let mut generator = MockContentGenerator::new();
        generator.expect_generate().returning(|_| {
            Err(GeneratorError::Timeout(std::time::Duration::from_secs(10)))
        });
        let resolver = ContentResolver::with_generator(Arc::new(generator));
        let result = resolver.resolve(
            &job(PlaceholderKind::Text, None, None),
            &fx.cx("modern"),
        );
        assert_eq!(result.resolved_by, "brand-default");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn unusable_generated_shape_degrades() {
        let fx = Fixture::new();
        let mut generator = MockContentGenerator::new();
        // Multi-line answer is not an acceptable tw class list.
        generator
            .expect_generate()
            .returning(|_| Ok("bg-x\nbg-y".into()));
        let resolver = ContentResolver::with_generator(Arc::new(generator));
        let result = resolver.resolve(
            &job(PlaceholderKind::Tw, None, Some("button")),
            &fx.cx("modern"),
        );
        assert_eq!(result.resolved_by, "theme-classes");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn data_lookup_beats_generator() {
        let mut fx = Fixture::new();
        fx.user.dynamic_data = json!({"hours": "9:00-18:00"});
        let mut generator = MockContentGenerator::new();
        generator.expect_generate().never();
        let resolver = ContentResolver::with_generator(Arc::new(generator));
        let result = resolver.resolve(
            &job(PlaceholderKind::Data, Some("hours"), None),
            &fx.cx("modern"),
        );
        assert_eq!(result.value, "9:00-18:00");
    }
}
