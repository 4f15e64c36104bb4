//! Validation budgets declared by a template version.
//!
//! Every field has a working default so templates can omit the whole block;
//! the validator reads these, it never mutates them.

use serde::{Deserialize, Serialize};

/// Quality budgets the validator checks resolved output against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints {
    pub a11y: A11yConstraints,
    pub performance: PerformanceConstraints,
    pub seo: SeoConstraints,
    pub assets: AssetConstraints,
    pub security: SecurityConstraints,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            a11y: A11yConstraints::default(),
            performance: PerformanceConstraints::default(),
            seo: SeoConstraints::default(),
            assets: AssetConstraints::default(),
            security: SecurityConstraints::default(),
        }
    }
}

/// Accessibility checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct A11yConstraints {
    /// Require `aria-*` attributes on interactive elements.
    pub aria_required: bool,

    /// Smallest acceptable font-size utility, in pixels.
    pub min_font_size_px: u32,
}

impl Default for A11yConstraints {
    fn default() -> Self {
        Self {
            aria_required: false,
            min_font_size_px: 12,
        }
    }
}

/// Performance budgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerformanceConstraints {
    /// Largest acceptable stylesheet, in kilobytes.
    pub max_critical_css_kb: u64,

    /// Largest acceptable image asset, in kilobytes.
    pub max_image_kb: u64,
}

impl Default for PerformanceConstraints {
    fn default() -> Self {
        Self {
            max_critical_css_kb: 50,
            max_image_kb: 500,
        }
    }
}

/// Content / SEO limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoConstraints {
    /// Maximum `<title>` length.
    pub title_max_len: usize,

    /// Maximum meta-description length.
    pub desc_max_len: usize,

    /// Meta tags that must appear somewhere in the output.
    pub required_meta: Vec<String>,
}

impl Default for SeoConstraints {
    fn default() -> Self {
        Self {
            title_max_len: 60,
            desc_max_len: 160,
            required_meta: vec!["description".into(), "viewport".into()],
        }
    }
}

/// Asset dimension requirements, checked best-effort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetConstraints {
    /// Minimum image width in pixels. Zero disables the check.
    pub min_width: u32,

    /// Minimum image height in pixels. Zero disables the check.
    pub min_height: u32,
}

/// Security checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityConstraints {
    /// Permit inline `<script>` blocks without a `src` attribute.
    pub allow_inline_scripts: bool,
}
