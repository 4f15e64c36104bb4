//! Slot contracts: named, strongly-typed data regions.
//!
//! Slots are independent of free-text placeholder markers: a slot declares
//! an ordered list of typed fields, each with optional validators and a
//! default. The slot filler resolves every declared field to a concrete
//! value: a [`FilledSlot`] is total by construction, never partial.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::DomainError;

/// Declaration of one named slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotConfig {
    /// Optional display label for editors.
    pub label: Option<String>,

    /// Ordered field declarations. Order is preserved into the filled slot
    /// so output is deterministic.
    pub fields: Vec<FieldConfig>,
}

impl SlotConfig {
    /// Structural validation: field keys must be non-empty and unique.
    pub fn validate(&self, slot_name: &str) -> Result<(), DomainError> {
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if field.key.trim().is_empty() {
                return Err(DomainError::InvalidSlotConfig {
                    slot: slot_name.into(),
                    reason: "field key cannot be empty".into(),
                });
            }
            if !seen.insert(field.key.as_str()) {
                return Err(DomainError::InvalidSlotConfig {
                    slot: slot_name.into(),
                    reason: format!("duplicate field key '{}'", field.key),
                });
            }
        }
        Ok(())
    }
}

/// Declaration of one typed field inside a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    /// Field key, unique within the slot.
    pub key: String,

    /// Declared value type.
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Whether an empty value counts as a validation failure.
    #[serde(default)]
    pub required: bool,

    /// Fallback value used when a candidate fails validation.
    #[serde(default)]
    pub default: Option<Value>,

    /// Declared validators, applied in order.
    #[serde(default)]
    pub validators: Vec<FieldValidator>,
}

impl FieldConfig {
    pub fn new(key: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            field_type,
            required: false,
            default: None,
            validators: Vec::new(),
        }
    }
}

/// Value types a slot field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    Image,
    Url,
    Email,
    Richtext,
    List,
    Object,
}

impl FieldType {
    /// The neutral value a field of this type falls back to when nothing
    /// else resolves. Guarantees the filled slot is never partial.
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Text | Self::Image | Self::Url | Self::Email | Self::Richtext => {
                Value::String(String::new())
            }
            Self::Number => Value::from(0),
            Self::Boolean => Value::Bool(false),
            Self::List => Value::Array(Vec::new()),
            Self::Object => Value::Object(serde_json::Map::new()),
        }
    }

    /// Whether `value` carries this declared type.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Text | Self::Image | Self::Url | Self::Email | Self::Richtext => {
                value.is_string()
            }
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::List => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

/// One declared validator on a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum FieldValidator {
    MinLength { value: usize },
    MaxLength { value: usize },
    MinItems { value: usize },
    MaxItems { value: usize },
    Pattern { value: String },
    Range { min: f64, max: f64 },
}

impl FieldValidator {
    /// Check one candidate value. Validators only reject values of the
    /// shape they understand; a `MinLength` on a number is a pass.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::MinLength { value: min } => {
                value.as_str().map_or(true, |s| s.chars().count() >= *min)
            }
            Self::MaxLength { value: max } => {
                value.as_str().map_or(true, |s| s.chars().count() <= *max)
            }
            Self::MinItems { value: min } => {
                value.as_array().map_or(true, |a| a.len() >= *min)
            }
            Self::MaxItems { value: max } => {
                value.as_array().map_or(true, |a| a.len() <= *max)
            }
            Self::Pattern { value: pattern } => match (value.as_str(), regex::Regex::new(pattern))
            {
                (Some(s), Ok(re)) => re.is_match(s),
                // Unmatchable shape or an invalid pattern never rejects.
                _ => true,
            },
            Self::Range { min, max } => value
                .as_f64()
                .map_or(true, |n| n >= *min && n <= *max),
        }
    }
}

/// A fully resolved slot: every declared field has exactly one value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilledSlot(pub BTreeMap<String, Value>);

impl FilledSlot {
    pub fn get(&self, field_key: &str) -> Option<&Value> {
        self.0.get(field_key)
    }

    pub fn insert(&mut self, field_key: impl Into<String>, value: Value) {
        self.0.insert(field_key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
