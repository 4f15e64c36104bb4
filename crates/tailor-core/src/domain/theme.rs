//! Design-token themes and the theme registry.
//!
//! A [`Theme`] is an immutable bundle of design tokens: four 10-step color
//! ramps, semantic colors, typography, spacing, radius, shadow, and
//! breakpoint scales. The registry holds the built-in themes (`modern`,
//! `cozy`, `minimal`) and is read-only after construction: it is passed
//! by reference into the processor, never reached through a global.
//!
//! Themes act twice in the pipeline:
//! 1. during `<tw/>` resolution, supplying base and context utility
//!    classes derived from the theme's color families;
//! 2. after resolution, when the applier rewrites color/font/radius/shadow
//!    tokens already present in the text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::user_data::ThemeCustomizations;

/// Ramp steps, in ascending order. Every color family carries exactly one
/// hex value per step.
pub const RAMP_STEPS: [u16; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

/// A named utility color family with its 10-step hex ramp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorFamily {
    /// Utility family name as written in class tokens (e.g. "emerald" in
    /// `bg-emerald-600`).
    pub family: String,

    /// Hex values for [`RAMP_STEPS`], lightest first.
    pub ramp: Vec<String>,
}

impl ColorFamily {
    fn new(family: &str, ramp: [&str; 10]) -> Self {
        Self {
            family: family.into(),
            ramp: ramp.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Hex value at a ramp step, if the step exists.
    pub fn at(&self, step: u16) -> Option<&str> {
        RAMP_STEPS
            .iter()
            .position(|s| *s == step)
            .and_then(|i| self.ramp.get(i))
            .map(String::as_str)
    }
}

/// Hex ramp for a known utility family name. Used when a customization
/// swaps a color role to a different family.
fn builtin_ramp(family: &str) -> Option<[&'static str; 10]> {
    let ramp = match family {
        "blue" => [
            "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb",
            "#1d4ed8", "#1e40af", "#1e3a8a",
        ],
        "indigo" => [
            "#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#4f46e5",
            "#4338ca", "#3730a3", "#312e81",
        ],
        "sky" => [
            "#f0f9ff", "#e0f2fe", "#bae6fd", "#7dd3fc", "#38bdf8", "#0ea5e9", "#0284c7",
            "#0369a1", "#075985", "#0c4a6e",
        ],
        "violet" => [
            "#f5f3ff", "#ede9fe", "#ddd6fe", "#c4b5fd", "#a78bfa", "#8b5cf6", "#7c3aed",
            "#6d28d9", "#5b21b6", "#4c1d95",
        ],
        "emerald" => [
            "#ecfdf5", "#d1fae5", "#a7f3d0", "#6ee7b7", "#34d399", "#10b981", "#059669",
            "#047857", "#065f46", "#064e3b",
        ],
        "amber" => [
            "#fffbeb", "#fef3c7", "#fde68a", "#fcd34d", "#fbbf24", "#f59e0b", "#d97706",
            "#b45309", "#92400e", "#78350f",
        ],
        "rose" => [
            "#fff1f2", "#ffe4e6", "#fecdd3", "#fda4af", "#fb7185", "#f43f5e", "#e11d48",
            "#be123c", "#9f1239", "#881337",
        ],
        "slate" => [
            "#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b", "#475569",
            "#334155", "#1e293b", "#0f172a",
        ],
        "stone" => [
            "#fafaf9", "#f5f5f4", "#e7e5e4", "#d6d3d1", "#a8a29e", "#78716c", "#57534e",
            "#44403c", "#292524", "#1c1917",
        ],
        "zinc" => [
            "#fafafa", "#f4f4f5", "#e4e4e7", "#d4d4d8", "#a1a1aa", "#71717a", "#52525b",
            "#3f3f46", "#27272a", "#18181b",
        ],
        "gray" => [
            "#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280", "#4b5563",
            "#374151", "#1f2937", "#111827",
        ],
        _ => return None,
    };
    Some(ramp)
}

/// Semantic status colors, as utility family names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticColors {
    pub success: String,
    pub warning: String,
    pub danger: String,
    pub info: String,
}

impl Default for SemanticColors {
    fn default() -> Self {
        Self {
            success: "green".into(),
            warning: "yellow".into(),
            danger: "red".into(),
            info: "sky".into(),
        }
    }
}

/// The four color roles plus semantic colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: ColorFamily,
    pub secondary: ColorFamily,
    pub accent: ColorFamily,
    pub neutral: ColorFamily,
    pub semantic: SemanticColors,
}

/// Typography tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    /// Font family for headings (exact name, rewritten by string match).
    pub heading_font: String,

    /// Font family for body text.
    pub body_font: String,

    /// Size scale: step name → CSS size.
    pub scale: BTreeMap<String, String>,
}

/// How far the applier steps radius/shadow utility classes down for this
/// theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepShift {
    /// Leave classes unchanged.
    None,
    /// Step only the upper half of the ladder down one level.
    Half,
    /// Step every class down one level.
    Full,
}

/// A named, immutable design-token bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    pub typography: Typography,
    pub spacing: BTreeMap<String, String>,
    pub radius: BTreeMap<String, String>,
    pub shadow: BTreeMap<String, String>,
    pub breakpoints: BTreeMap<String, String>,
    pub radius_shift: StepShift,
    pub shadow_shift: StepShift,
}

impl Theme {
    /// Utility classes every `<tw/>` resolution starts from.
    pub fn base_classes(&self) -> String {
        format!("font-body text-{}-900", self.colors.neutral.family)
    }

    /// Context classes for the element enclosing a `<tw/>` marker.
    /// Unrecognized contexts contribute nothing.
    pub fn context_classes(&self, tag_name: Option<&str>, class_hint: Option<&str>) -> String {
        let primary = &self.colors.primary.family;
        let neutral = &self.colors.neutral.family;

        match tag_name {
            Some("button") => format!(
                "bg-{primary}-600 text-white font-medium px-4 py-2 rounded-lg hover:bg-{primary}-700"
            ),
            Some("h1") => "font-heading text-4xl font-bold".into(),
            Some("h2") => "font-heading text-3xl font-semibold".into(),
            Some("h3") => "font-heading text-2xl font-semibold".into(),
            Some("header") => "bg-white shadow-sm px-6 py-4".into(),
            Some("footer") => format!("bg-{neutral}-900 text-{neutral}-200 px-6 py-8"),
            Some("div") if class_hint.is_some_and(|c| c.contains("card")) => {
                "bg-white rounded-xl shadow-md p-6".into()
            }
            _ => String::new(),
        }
    }

    /// Produce a copy with caller customizations merged on top, shallowly
    /// per category. Unknown color families keep the base ramp (the family
    /// name still drives class rewriting).
    pub fn customized(&self, customizations: &ThemeCustomizations) -> Theme {
        if customizations.is_empty() {
            return self.clone();
        }

        let mut theme = self.clone();

        for (role, family) in &customizations.colors {
            let target = match role.as_str() {
                "primary" => &mut theme.colors.primary,
                "secondary" => &mut theme.colors.secondary,
                "accent" => &mut theme.colors.accent,
                "neutral" => &mut theme.colors.neutral,
                _ => continue,
            };
            if let Some(ramp) = builtin_ramp(family) {
                *target = ColorFamily::new(family, ramp);
            } else {
                target.family = family.clone();
            }
        }

        for (role, font) in &customizations.typography {
            match role.as_str() {
                "heading" => theme.typography.heading_font = font.clone(),
                "body" => theme.typography.body_font = font.clone(),
                _ => {}
            }
        }

        for (key, value) in &customizations.spacing {
            theme.spacing.insert(key.clone(), value.clone());
        }
        for (key, value) in &customizations.radius {
            theme.radius.insert(key.clone(), value.clone());
        }
        for (key, value) in &customizations.shadow {
            theme.shadow.insert(key.clone(), value.clone());
        }

        theme
    }

    /// Emit the theme as a `:root` CSS custom-property block.
    pub fn css_variables(&self) -> String {
        let mut out = String::from(":root {\n");

        for (role, family) in [
            ("primary", &self.colors.primary),
            ("secondary", &self.colors.secondary),
            ("accent", &self.colors.accent),
            ("neutral", &self.colors.neutral),
        ] {
            for (step, hex) in RAMP_STEPS.iter().zip(family.ramp.iter()) {
                out.push_str(&format!("  --color-{role}-{step}: {hex};\n"));
            }
        }

        out.push_str(&format!(
            "  --font-heading: '{}';\n",
            self.typography.heading_font
        ));
        out.push_str(&format!("  --font-body: '{}';\n", self.typography.body_font));

        for (name, value) in &self.spacing {
            out.push_str(&format!("  --spacing-{name}: {value};\n"));
        }
        for (name, value) in &self.radius {
            out.push_str(&format!("  --radius-{name}: {value};\n"));
        }
        for (name, value) in &self.shadow {
            out.push_str(&format!("  --shadow-{name}: {value};\n"));
        }

        out.push_str("}\n");
        out
    }
}

fn scale(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn default_breakpoints() -> BTreeMap<String, String> {
    scale(&[
        ("sm", "640px"),
        ("md", "768px"),
        ("lg", "1024px"),
        ("xl", "1280px"),
        ("2xl", "1536px"),
    ])
}

fn default_type_scale() -> BTreeMap<String, String> {
    scale(&[
        ("xs", "0.75rem"),
        ("sm", "0.875rem"),
        ("base", "1rem"),
        ("lg", "1.125rem"),
        ("xl", "1.25rem"),
        ("2xl", "1.5rem"),
        ("3xl", "1.875rem"),
        ("4xl", "2.25rem"),
    ])
}

fn modern() -> Theme {
    Theme {
        name: "modern".into(),
        colors: ThemeColors {
            primary: ColorFamily::new("blue", builtin_ramp("blue").expect("blue ramp")),
            secondary: ColorFamily::new("indigo", builtin_ramp("indigo").expect("indigo ramp")),
            accent: ColorFamily::new("sky", builtin_ramp("sky").expect("sky ramp")),
            neutral: ColorFamily::new("slate", builtin_ramp("slate").expect("slate ramp")),
            semantic: SemanticColors::default(),
        },
        typography: Typography {
            heading_font: "Poppins".into(),
            body_font: "Inter".into(),
            scale: default_type_scale(),
        },
        spacing: scale(&[
            ("xs", "0.5rem"),
            ("sm", "0.75rem"),
            ("md", "1rem"),
            ("lg", "1.5rem"),
            ("xl", "2rem"),
            ("2xl", "3rem"),
        ]),
        radius: scale(&[
            ("sm", "0.125rem"),
            ("md", "0.375rem"),
            ("lg", "0.5rem"),
            ("xl", "0.75rem"),
            ("2xl", "1rem"),
        ]),
        shadow: scale(&[
            ("sm", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
            ("md", "0 4px 6px -1px rgb(0 0 0 / 0.1)"),
            ("lg", "0 10px 15px -3px rgb(0 0 0 / 0.1)"),
        ]),
        breakpoints: default_breakpoints(),
        radius_shift: StepShift::None,
        shadow_shift: StepShift::None,
    }
}

fn cozy() -> Theme {
    Theme {
        name: "cozy".into(),
        colors: ThemeColors {
            primary: ColorFamily::new("emerald", builtin_ramp("emerald").expect("emerald ramp")),
            secondary: ColorFamily::new("amber", builtin_ramp("amber").expect("amber ramp")),
            accent: ColorFamily::new("rose", builtin_ramp("rose").expect("rose ramp")),
            neutral: ColorFamily::new("stone", builtin_ramp("stone").expect("stone ramp")),
            semantic: SemanticColors::default(),
        },
        typography: Typography {
            heading_font: "Lora".into(),
            body_font: "Nunito".into(),
            scale: default_type_scale(),
        },
        spacing: scale(&[
            ("xs", "0.5rem"),
            ("sm", "1rem"),
            ("md", "1.25rem"),
            ("lg", "2rem"),
            ("xl", "2.5rem"),
            ("2xl", "4rem"),
        ]),
        radius: scale(&[
            ("sm", "0.25rem"),
            ("md", "0.5rem"),
            ("lg", "0.75rem"),
            ("xl", "1rem"),
            ("2xl", "1.5rem"),
        ]),
        shadow: scale(&[
            ("sm", "0 1px 3px 0 rgb(0 0 0 / 0.08)"),
            ("md", "0 4px 8px -2px rgb(0 0 0 / 0.12)"),
            ("lg", "0 12px 20px -4px rgb(0 0 0 / 0.14)"),
        ]),
        breakpoints: default_breakpoints(),
        radius_shift: StepShift::Half,
        shadow_shift: StepShift::Half,
    }
}

fn minimal() -> Theme {
    Theme {
        name: "minimal".into(),
        colors: ThemeColors {
            primary: ColorFamily::new("zinc", builtin_ramp("zinc").expect("zinc ramp")),
            secondary: ColorFamily::new("gray", builtin_ramp("gray").expect("gray ramp")),
            accent: ColorFamily::new("slate", builtin_ramp("slate").expect("slate ramp")),
            neutral: ColorFamily::new("gray", builtin_ramp("gray").expect("gray ramp")),
            semantic: SemanticColors::default(),
        },
        typography: Typography {
            heading_font: "Inter".into(),
            body_font: "Inter".into(),
            scale: default_type_scale(),
        },
        spacing: scale(&[
            ("xs", "0.25rem"),
            ("sm", "0.5rem"),
            ("md", "0.75rem"),
            ("lg", "1rem"),
            ("xl", "1.5rem"),
            ("2xl", "2rem"),
        ]),
        radius: scale(&[
            ("sm", "0"),
            ("md", "0.125rem"),
            ("lg", "0.25rem"),
            ("xl", "0.375rem"),
            ("2xl", "0.5rem"),
        ]),
        shadow: scale(&[
            ("sm", "none"),
            ("md", "0 1px 2px 0 rgb(0 0 0 / 0.04)"),
            ("lg", "0 2px 4px 0 rgb(0 0 0 / 0.06)"),
        ]),
        breakpoints: default_breakpoints(),
        radius_shift: StepShift::Full,
        shadow_shift: StepShift::Full,
    }
}

/// Name of the theme substituted for unknown requests.
pub const DEFAULT_THEME: &str = "modern";

/// Catalogue of named themes. Read-only after construction.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Theme>,
}

impl ThemeRegistry {
    /// An empty registry. Mostly useful in tests; production code wants
    /// [`ThemeRegistry::with_builtin`].
    pub fn new() -> Self {
        Self {
            themes: BTreeMap::new(),
        }
    }

    /// Registry holding the three built-in themes.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for theme in [modern(), cozy(), minimal()] {
            registry.register(theme);
        }
        registry
    }

    /// Add a theme. Intended for construction time only; the processor
    /// takes the registry by shared reference afterwards.
    pub fn register(&mut self, theme: Theme) {
        self.themes.insert(theme.name.clone(), theme);
    }

    /// Look up a theme; `None` for unknown names.
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// The theme used when the requested name is unknown.
    pub fn default_theme(&self) -> &Theme {
        self.themes
            .get(DEFAULT_THEME)
            .or_else(|| self.themes.values().next())
            .expect("registry must hold at least one theme")
    }

    pub fn names(&self) -> Vec<&str> {
        self.themes.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
