//! Theme application: rewriting design tokens in resolved text.
//!
//! Runs strictly **after** placeholder resolution; it only rewrites tokens
//! that already exist literally in the text. Three rewrite passes:
//!
//! 1. Color utility classes from the source families templates are
//!    authored in (`blue`/`indigo` → primary, `yellow`/`amber` →
//!    secondary, `orange` → accent) to the active theme's families.
//! 2. Font family names by exact string match (`Poppins` → heading font,
//!    `Inter` → body font).
//! 3. Radius and shadow utility classes stepped down the ladder according
//!    to the theme's shift (identity for `modern`, upper half for `cozy`,
//!    every class for `minimal`). `rounded-full` and `rounded-none` are
//!    semantic endpoints and never shifted.
//!
//! Tokens are recognized as whole utilities: `shadow-emerald-500` is a
//! colored shadow, not a `shadow` plus noise, and passes through
//! untouched.

use regex::{Captures, Regex};

use crate::domain::{StepShift, Theme};

const RADIUS_LADDER: &[&str] = &[
    "rounded-none",
    "rounded-sm",
    "rounded",
    "rounded-md",
    "rounded-lg",
    "rounded-xl",
    "rounded-2xl",
    "rounded-3xl",
];

/// First ladder index affected by a `Half` shift.
const RADIUS_HALF_START: usize = 5; // rounded-xl

const SHADOW_LADDER: &[&str] = &[
    "shadow-none",
    "shadow-sm",
    "shadow",
    "shadow-md",
    "shadow-lg",
    "shadow-xl",
    "shadow-2xl",
];

const SHADOW_HALF_START: usize = 4; // shadow-lg

/// Rewrites theme tokens in resolved file content.
#[derive(Debug)]
pub struct ThemeApplier {
    color_token: Regex,
    ladder_token: Regex,
    heading_font: Regex,
    body_font: Regex,
}

impl ThemeApplier {
    pub fn new() -> Self {
        Self {
            color_token: Regex::new(
                r"\b(bg|text|border|ring)-(blue|indigo|yellow|amber|orange)-([0-9]{2,3})\b",
            )
            .expect("color token regex"),
            ladder_token: Regex::new(r"\b(rounded|shadow)(-[a-z0-9]+)?\b")
                .expect("ladder token regex"),
            heading_font: Regex::new(r"\bPoppins\b").expect("heading font regex"),
            body_font: Regex::new(r"\bInter\b").expect("body font regex"),
        }
    }

    /// Rewrite all theme tokens in `text` for `theme`. Pure transform;
    /// unknown tokens pass through untouched.
    pub fn apply(&self, text: &str, theme: &Theme) -> String {
        let recolored = self.rewrite_colors(text, theme);
        let fonted = self.rewrite_fonts(&recolored, theme);
        self.rewrite_ladders(&fonted, theme)
    }

    fn rewrite_colors(&self, text: &str, theme: &Theme) -> String {
        self.color_token
            .replace_all(text, |caps: &Captures<'_>| {
                let family = match &caps[2] {
                    "blue" | "indigo" => &theme.colors.primary.family,
                    "yellow" | "amber" => &theme.colors.secondary.family,
                    "orange" => &theme.colors.accent.family,
                    other => other,
                };
                format!("{}-{}-{}", &caps[1], family, &caps[3])
            })
            .into_owned()
    }

    fn rewrite_fonts(&self, text: &str, theme: &Theme) -> String {
        let with_heading = self
            .heading_font
            .replace_all(text, theme.typography.heading_font.as_str());
        self.body_font
            .replace_all(&with_heading, theme.typography.body_font.as_str())
            .into_owned()
    }

    fn rewrite_ladders(&self, text: &str, theme: &Theme) -> String {
        if theme.radius_shift == StepShift::None && theme.shadow_shift == StepShift::None {
            return text.to_string();
        }

        self.ladder_token
            .replace_all(text, |caps: &Captures<'_>| {
                let token = &caps[0];
                let (ladder, half_start, shift) = match &caps[1] {
                    "rounded" => (RADIUS_LADDER, RADIUS_HALF_START, theme.radius_shift),
                    _ => (SHADOW_LADDER, SHADOW_HALF_START, theme.shadow_shift),
                };
                step_down(token, ladder, half_start, shift).to_string()
            })
            .into_owned()
    }
}

impl Default for ThemeApplier {
    fn default() -> Self {
        Self::new()
    }
}

/// Step one token down its ladder per the shift policy. Tokens outside
/// the ladder (colored shadows, `rounded-full`) come back unchanged;
/// ladder endpoints (`*-none`) cannot step further.
fn step_down<'a>(token: &'a str, ladder: &[&'a str], half_start: usize, shift: StepShift) -> &'a str {
    let Some(index) = ladder.iter().position(|t| *t == token) else {
        return token;
    };

    let applies = match shift {
        StepShift::None => false,
        StepShift::Half => index >= half_start,
        StepShift::Full => index > 0,
    };

    if applies { ladder[index - 1] } else { token }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ThemeRegistry;

    fn themed(name: &str) -> (ThemeApplier, Theme) {
        let registry = ThemeRegistry::with_builtin();
        (ThemeApplier::new(), registry.get(name).unwrap().clone())
    }

    #[test]
    fn modern_is_identity_for_its_own_families() {
        let (applier, theme) = themed("modern");
        let input = r#"<div class="bg-blue-600 rounded-lg shadow-md">"#;
        assert_eq!(applier.apply(input, &theme), input);
    }

    #[test]
    fn cozy_rewrites_primary_family_to_emerald() {
        let (applier, theme) = themed("cozy");
        let output = applier.apply("bg-blue-600 text-blue-700 border-blue-200", &theme);
        assert_eq!(output, "bg-emerald-600 text-emerald-700 border-emerald-200");
    }

    #[test]
    fn secondary_and_accent_mappings() {
        let (applier, theme) = themed("cozy");
        assert_eq!(applier.apply("bg-yellow-400", &theme), "bg-amber-400");
        assert_eq!(applier.apply("bg-orange-500", &theme), "bg-rose-500");
    }

    #[test]
    fn variant_prefixes_survive_color_rewrite() {
        let (applier, theme) = themed("cozy");
        assert_eq!(
            applier.apply("hover:bg-blue-700", &theme),
            "hover:bg-emerald-700"
        );
    }

    #[test]
    fn fonts_rewritten_by_exact_match() {
        let (applier, theme) = themed("cozy");
        let css = "font-family: 'Poppins', 'Inter', sans-serif;";
        assert_eq!(
            applier.apply(css, &theme),
            "font-family: 'Lora', 'Nunito', sans-serif;"
        );
    }

    #[test]
    fn font_rewrite_does_not_touch_similar_words() {
        let (applier, theme) = themed("cozy");
        assert_eq!(applier.apply("Interactive Poppinsx", &theme), "Interactive Poppinsx");
    }

    #[test]
    fn minimal_steps_every_class_down_one() {
        let (applier, theme) = themed("minimal");
        assert_eq!(applier.apply("rounded-lg", &theme), "rounded-md");
        assert_eq!(applier.apply("rounded-sm", &theme), "rounded-none");
        assert_eq!(applier.apply("shadow-md", &theme), "shadow");
        assert_eq!(applier.apply("shadow-sm", &theme), "shadow-none");
    }

    #[test]
    fn cozy_steps_only_the_upper_half() {
        let (applier, theme) = themed("cozy");
        assert_eq!(applier.apply("rounded-2xl", &theme), "rounded-xl");
        assert_eq!(applier.apply("rounded-lg", &theme), "rounded-lg");
        assert_eq!(applier.apply("shadow-xl", &theme), "shadow-lg");
        assert_eq!(applier.apply("shadow-md", &theme), "shadow-md");
    }

    #[test]
    fn ladder_endpoints_and_outsiders_untouched() {
        let (applier, theme) = themed("minimal");
        assert_eq!(applier.apply("rounded-none", &theme), "rounded-none");
        assert_eq!(applier.apply("rounded-full", &theme), "rounded-full");
        assert_eq!(
            applier.apply("shadow-emerald-500", &theme),
            "shadow-emerald-500"
        );
    }

    #[test]
    fn red_and_green_families_are_never_rewritten() {
        let (applier, theme) = themed("cozy");
        let input = "bg-red-500 text-green-600";
        assert_eq!(applier.apply(input, &theme), input);
    }
}
