//! Caller-supplied business data.
//!
//! Every field is optional on the wire: the pipeline must produce a valid
//! artifact from an empty `{}` payload. `UserData` is read-only to the
//! pipeline; normalization produces derived values (brand profile, resolved
//! theme) without touching the input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Business data used to personalize a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserData {
    /// Brand or business name. Drives content generation, fallback copy,
    /// and placeholder-image URLs.
    pub brand_name: Option<String>,

    /// Requested theme name. Unknown names are downgraded to the default
    /// theme with a warning during normalization.
    pub theme: Option<String>,

    /// Free-text content overrides, keyed by context (e.g. "h1", "text",
    /// "hero.title").
    pub content: BTreeMap<String, String>,

    /// Image URL overrides, keyed by context.
    pub images: BTreeMap<String, String>,

    /// Structured slot overrides: slot name → field key → value.
    pub slots: BTreeMap<String, BTreeMap<String, Value>>,

    /// Arbitrary structured data addressed by `<data key="a.b.c"/>` markers.
    pub dynamic_data: Value,

    /// Partial theme-token overrides, merged shallowly per category.
    pub customizations: ThemeCustomizations,
}

impl UserData {
    /// Look up a dotted path inside `dynamic_data`.
    pub fn dynamic_value(&self, dotted_path: &str) -> Option<&Value> {
        lookup_path(&self.dynamic_data, dotted_path)
    }
}

/// Walk a dotted path through nested JSON objects (arrays addressed by
/// numeric segments).
pub fn lookup_path<'a>(root: &'a Value, dotted_path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in dotted_path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Partial theme overrides. Keys within each category replace the base
/// theme's entry of the same name; absent keys keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeCustomizations {
    /// Color-role overrides: "primary" | "secondary" | "accent" | "neutral"
    /// → a utility color family name (e.g. "violet").
    pub colors: BTreeMap<String, String>,

    /// Typography overrides: "heading" | "body" → font family name.
    pub typography: BTreeMap<String, String>,

    /// Spacing scale overrides, by step name.
    pub spacing: BTreeMap<String, String>,

    /// Radius scale overrides, by step name.
    pub radius: BTreeMap<String, String>,

    /// Shadow scale overrides, by step name.
    pub shadow: BTreeMap<String, String>,
}

impl ThemeCustomizations {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.typography.is_empty()
            && self.spacing.is_empty()
            && self.radius.is_empty()
            && self.shadow.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_payload_deserializes() {
        let data: UserData = serde_json::from_str("{}").unwrap();
        assert!(data.brand_name.is_none());
        assert!(data.theme.is_none());
        assert!(data.content.is_empty());
        assert!(data.customizations.is_empty());
    }

    #[test]
    fn dynamic_path_lookup() {
        let data = UserData {
            dynamic_data: json!({"contact": {"phones": ["02-111-2222", "02-333-4444"]}}),
            ..UserData::default()
        };
        assert_eq!(
            data.dynamic_value("contact.phones.1"),
            Some(&json!("02-333-4444"))
        );
        assert_eq!(data.dynamic_value("contact.missing"), None);
        assert_eq!(data.dynamic_value("contact.phones.x"), None);
    }

    #[test]
    fn wire_shape_round_trip() {
        let json = r#"{
            "brandName": "Baan Kaffe",
            "theme": "cozy",
            "content": { "h1": "Welcome" },
            "slots": { "hero": { "title": "Hi" } },
            "dynamicData": { "hours": "9-18" },
            "customizations": { "colors": { "primary": "violet" } }
        }"#;
        let data: UserData = serde_json::from_str(json).unwrap();
        assert_eq!(data.brand_name.as_deref(), Some("Baan Kaffe"));
        assert_eq!(data.customizations.colors["primary"], "violet");
        assert_eq!(data.dynamic_value("hours"), Some(&json!("9-18")));
    }
}
