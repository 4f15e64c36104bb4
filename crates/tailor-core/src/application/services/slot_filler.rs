//! Slot filling: total resolution of structured, typed field values.
//!
//! For every declared field the filler picks a candidate by priority
//! (slot-scoped override → global content override → built-in default
//! content → type zero value), validates it against the declaration, and
//! on any validation failure falls back to the declared default or the
//! zero value. The result is total: exactly one value per declared field,
//! and `fill_slots` cannot fail.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::application::services::resolver::BrandProfile;
use crate::domain::{FieldConfig, FilledSlot, SlotConfig, UserData};

/// Fills slot fields from user data and built-in default content.
pub struct SlotFiller;

impl SlotFiller {
    /// Fill every declared slot. Never fails, never returns a partial slot.
    pub fn fill_slots(
        slot_configs: &BTreeMap<String, SlotConfig>,
        user: &UserData,
        brand: &BrandProfile,
    ) -> BTreeMap<String, FilledSlot> {
        slot_configs
            .iter()
            .map(|(name, config)| (name.clone(), Self::fill_slot(name, config, user, brand)))
            .collect()
    }

    fn fill_slot(
        slot_name: &str,
        config: &SlotConfig,
        user: &UserData,
        brand: &BrandProfile,
    ) -> FilledSlot {
        let mut filled = FilledSlot::default();
        let overrides = user.slots.get(slot_name);

        for field in &config.fields {
            let candidate = Self::candidate(slot_name, field, user, overrides, brand);
            let value = Self::validated(slot_name, field, candidate);
            filled.insert(field.key.clone(), value);
        }

        filled
    }

    /// Candidate selection, in priority order.
    fn candidate(
        slot_name: &str,
        field: &FieldConfig,
        user: &UserData,
        overrides: Option<&BTreeMap<String, Value>>,
        brand: &BrandProfile,
    ) -> Value {
        if let Some(value) = overrides.and_then(|o| o.get(&field.key)) {
            return value.clone();
        }

        let content_key = format!("{}.{}", slot_name, field.key);
        if let Some(text) = user.content.get(&content_key) {
            return Value::String(text.clone());
        }

        if let Some(value) = default_content(slot_name, &field.key, brand) {
            return value;
        }

        field.field_type.zero_value()
    }

    /// Validate a candidate; on failure fall back to the declared default,
    /// then the zero value. The fallback itself is re-checked only for
    /// type, so a broken declared default cannot smuggle in a wrong shape.
    fn validated(slot_name: &str, field: &FieldConfig, candidate: Value) -> Value {
        if Self::passes(field, &candidate) {
            return candidate;
        }

        debug!(
            slot = slot_name,
            field = %field.key,
            "slot field failed validation, using fallback"
        );

        if let Some(default) = &field.default {
            if field.field_type.matches(default) {
                return default.clone();
            }
        }

        field.field_type.zero_value()
    }

    fn passes(field: &FieldConfig, value: &Value) -> bool {
        if !field.field_type.matches(value) {
            return false;
        }

        if field.required && is_empty(value) {
            return false;
        }

        field.validators.iter().all(|v| v.accepts(value))
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Null => true,
        _ => false,
    }
}

/// Built-in default content for well-known slot/field pairs. Brand-aware
/// so untouched templates still read like a real site.
fn default_content(slot_name: &str, field_key: &str, brand: &BrandProfile) -> Option<Value> {
    let name = &brand.name;
    let value = match (slot_name, field_key) {
        ("hero", "title") => format!("Welcome to {name}"),
        ("hero", "subtitle") => "Everything you need, in one place.".to_string(),
        ("hero", "cta") => "Get started".to_string(),
        ("about", "title") => format!("About {name}"),
        ("about", "body") => format!("{name} is dedicated to serving you better every day."),
        ("contact", "email") => "hello@example.com".to_string(),
        ("contact", "phone") => "+66 2 000 0000".to_string(),
        ("contact", "address") => "Bangkok, Thailand".to_string(),
        ("footer", "copyright") => format!("© {name}. All rights reserved."),
        _ => return None,
    };
    Some(Value::String(value))
}
