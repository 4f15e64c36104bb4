//! The built-in validation rules.
//!
//! Rules are heuristic text scans, not host-language parsers: they catch
//! the failure modes template output actually exhibits (missing alt text,
//! oversized stylesheets, leftover markers) without attempting semantic
//! analysis of the generated code.

use regex::Regex;

use crate::application::services::validator::ValidationRule;
use crate::domain::{
    Constraints, FileKind, PlaceholderScanner, ProcessedFile, ValidationIssue,
};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "avif"];

fn has_image_extension(path: &str) -> bool {
    path.rsplit('.')
        .next()
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

// ── Accessibility ─────────────────────────────────────────────────────────────

/// Alt text, ARIA coverage, home-page heading, minimum font size.
pub struct AccessibilityRule;

impl ValidationRule for AccessibilityRule {
    fn name(&self) -> &'static str {
        "accessibility"
    }

    fn check(&self, files: &[ProcessedFile], constraints: &Constraints) -> Vec<ValidationIssue> {
        let img_tag = Regex::new(r"<img\b[^>]*>").expect("img tag regex");
        let interactive_tag =
            Regex::new(r"<(?:button|a|input|select|textarea)\b[^>]*>").expect("interactive regex");
        let mut issues = Vec::new();

        for file in files {
            if file.kind != FileKind::Code {
                continue;
            }

            let missing_alt = img_tag
                .find_iter(&file.content)
                .filter(|m| !m.as_str().contains("alt="))
                .count();
            if missing_alt > 0 {
                issues.push(
                    ValidationIssue::error("Images missing alt attributes")
                        .in_file(&file.path)
                        .suggest("Add a descriptive alt attribute to every <img> tag"),
                );
            }

            if constraints.a11y.aria_required {
                let missing_aria = interactive_tag
                    .find_iter(&file.content)
                    .filter(|m| !m.as_str().contains("aria-"))
                    .count();
                if missing_aria > 0 {
                    issues.push(
                        ValidationIssue::error("Interactive elements missing ARIA attributes")
                            .in_file(&file.path)
                            .suggest("Add aria-label or equivalent to interactive elements"),
                    );
                }
            }

            let is_home = {
                let lowered = file.path.to_ascii_lowercase();
                lowered.contains("index") || lowered.contains("home")
            };
            if is_home && !file.content.contains("<h1") {
                issues.push(
                    ValidationIssue::error("Home page missing <h1> heading").in_file(&file.path),
                );
            }

            let tiny_fonts = small_font_tokens(&file.content, constraints.a11y.min_font_size_px);
            if tiny_fonts > 0 {
                issues.push(
                    ValidationIssue::warning(format!(
                        "Font size below the {}px minimum ({} occurrence{})",
                        constraints.a11y.min_font_size_px,
                        tiny_fonts,
                        plural(tiny_fonts)
                    ))
                    .in_file(&file.path),
                );
            }
        }

        issues
    }
}

/// Count text-size utility tokens rendering below `min_px`.
fn small_font_tokens(content: &str, min_px: u32) -> usize {
    const SIZES: &[(&str, u32)] = &[
        ("text-xs", 12),
        ("text-sm", 14),
        ("text-base", 16),
        ("text-lg", 18),
        ("text-xl", 20),
    ];
    SIZES
        .iter()
        .filter(|(_, px)| *px < min_px)
        .map(|(token, _)| {
            // Count whole-token occurrences only.
            Regex::new(&format!(r"\b{token}\b"))
                .map(|re| re.find_iter(content).count())
                .unwrap_or(0)
        })
        .sum()
}

// ── Performance ───────────────────────────────────────────────────────────────

/// Stylesheet and image byte budgets.
pub struct PerformanceRule;

impl ValidationRule for PerformanceRule {
    fn name(&self) -> &'static str {
        "performance"
    }

    fn check(&self, files: &[ProcessedFile], constraints: &Constraints) -> Vec<ValidationIssue> {
        let css_budget = constraints.performance.max_critical_css_kb * 1024;
        let image_budget = constraints.performance.max_image_kb * 1024;
        let mut issues = Vec::new();

        for file in files {
            match file.kind {
                FileKind::Style if file.size > css_budget => {
                    issues.push(
                        ValidationIssue::warning(format!(
                            "Stylesheet is {}KB, over the {}KB budget",
                            file.size / 1024,
                            constraints.performance.max_critical_css_kb
                        ))
                        .in_file(&file.path)
                        .suggest("Split non-critical styles out of the main stylesheet"),
                    );
                }
                FileKind::Asset
                    if has_image_extension(&file.path) && file.size > image_budget =>
                {
                    issues.push(
                        ValidationIssue::warning(format!(
                            "Image is {}KB, over the {}KB budget",
                            file.size / 1024,
                            constraints.performance.max_image_kb
                        ))
                        .in_file(&file.path)
                        .suggest("Compress or resize the image"),
                    );
                }
                _ => {}
            }
        }

        issues
    }
}

// ── Content / SEO ─────────────────────────────────────────────────────────────

/// Title and meta-description lengths, required meta tags.
pub struct ContentSeoRule;

impl ValidationRule for ContentSeoRule {
    fn name(&self) -> &'static str {
        "content-seo"
    }

    fn check(&self, files: &[ProcessedFile], constraints: &Constraints) -> Vec<ValidationIssue> {
        let title = Regex::new(r"<title>([^<]*)</title>").expect("title regex");
        let description =
            Regex::new(r#"<meta\b[^>]*name="description"[^>]*content="([^"]*)""#)
                .expect("description regex");
        let mut issues = Vec::new();

        for file in files {
            if file.kind != FileKind::Code {
                continue;
            }

            for caps in title.captures_iter(&file.content) {
                let len = caps[1].chars().count();
                if len > constraints.seo.title_max_len {
                    issues.push(
                        ValidationIssue::warning(format!(
                            "Title is {len} characters, over the {} limit",
                            constraints.seo.title_max_len
                        ))
                        .in_file(&file.path),
                    );
                }
            }

            for caps in description.captures_iter(&file.content) {
                let len = caps[1].chars().count();
                if len > constraints.seo.desc_max_len {
                    issues.push(
                        ValidationIssue::warning(format!(
                            "Meta description is {len} characters, over the {} limit",
                            constraints.seo.desc_max_len
                        ))
                        .in_file(&file.path),
                    );
                }
            }
        }

        for meta_name in &constraints.seo.required_meta {
            let needle = format!("name=\"{meta_name}\"");
            let present = files
                .iter()
                .any(|f| f.kind == FileKind::Code && f.content.contains(&needle));
            if !present {
                issues.push(
                    ValidationIssue::warning(format!("Missing required meta tag: {meta_name}"))
                        .suggest(format!("Add <meta name=\"{meta_name}\" content=\"…\">")),
                );
            }
        }

        issues
    }
}

// ── Assets ────────────────────────────────────────────────────────────────────

/// Best-effort dimension check against `WIDTHxHEIGHT` filename hints.
pub struct AssetRule;

impl ValidationRule for AssetRule {
    fn name(&self) -> &'static str {
        "assets"
    }

    fn check(&self, files: &[ProcessedFile], constraints: &Constraints) -> Vec<ValidationIssue> {
        let min_w = constraints.assets.min_width;
        let min_h = constraints.assets.min_height;
        if min_w == 0 && min_h == 0 {
            return Vec::new();
        }

        let dimensions = Regex::new(r"(\d{2,5})x(\d{2,5})").expect("dimension regex");
        let mut issues = Vec::new();

        for file in files {
            if file.kind != FileKind::Asset || !has_image_extension(&file.path) {
                continue;
            }
            if let Some(caps) = dimensions.captures(&file.path) {
                let (w, h): (u32, u32) = (
                    caps[1].parse().unwrap_or(u32::MAX),
                    caps[2].parse().unwrap_or(u32::MAX),
                );
                if w < min_w || h < min_h {
                    issues.push(
                        ValidationIssue::info(format!(
                            "Image appears to be {w}x{h}, below the {min_w}x{min_h} minimum"
                        ))
                        .in_file(&file.path),
                    );
                }
            }
        }

        issues
    }
}

// ── Security ──────────────────────────────────────────────────────────────────

/// Inline scripts and dangerous sink patterns.
pub struct SecurityRule;

const DANGEROUS_PATTERNS: &[(&str, &str)] = &[
    ("eval(", "Use of eval()"),
    ("innerHTML =", "Direct innerHTML assignment"),
    ("document.write", "Use of document.write"),
    ("javascript:", "javascript: URL"),
];

impl ValidationRule for SecurityRule {
    fn name(&self) -> &'static str {
        "security"
    }

    fn check(&self, files: &[ProcessedFile], constraints: &Constraints) -> Vec<ValidationIssue> {
        let script_tag = Regex::new(r"<script\b[^>]*>").expect("script tag regex");
        let mut issues = Vec::new();

        for file in files {
            if file.kind != FileKind::Code {
                continue;
            }

            if !constraints.security.allow_inline_scripts {
                let inline = script_tag
                    .find_iter(&file.content)
                    .filter(|m| !m.as_str().contains("src="))
                    .count();
                if inline > 0 {
                    issues.push(
                        ValidationIssue::error(format!(
                            "Inline script without src ({inline} occurrence{})",
                            plural(inline)
                        ))
                        .in_file(&file.path)
                        .suggest("Move inline scripts into external files"),
                    );
                }
            }

            for (pattern, label) in DANGEROUS_PATTERNS {
                let count = file.content.matches(pattern).count();
                if count > 0 {
                    issues.push(
                        ValidationIssue::warning(format!(
                            "{label} ({count} occurrence{})",
                            plural(count)
                        ))
                        .in_file(&file.path),
                    );
                }
            }
        }

        issues
    }
}

// ── Code quality ──────────────────────────────────────────────────────────────

/// Loose typing, unused imports, leftover logging.
pub struct CodeQualityRule;

impl ValidationRule for CodeQualityRule {
    fn name(&self) -> &'static str {
        "code-quality"
    }

    fn check(&self, files: &[ProcessedFile], _constraints: &Constraints) -> Vec<ValidationIssue> {
        let named_imports =
            Regex::new(r"import\s*\{([^}]*)\}\s*from").expect("import regex");
        let mut issues = Vec::new();

        for file in files {
            if file.kind != FileKind::Code {
                continue;
            }

            let any_count = file.content.matches(": any").count();
            if any_count > 0 {
                issues.push(
                    ValidationIssue::info(format!(
                        "Loose ': any' type ({any_count} occurrence{})",
                        plural(any_count)
                    ))
                    .in_file(&file.path),
                );
            }

            for name in unused_imports(&named_imports, &file.content) {
                issues.push(
                    ValidationIssue::info(format!("Unused import: {name}")).in_file(&file.path),
                );
            }

            let log_count = file.content.matches("console.log").count();
            if log_count > 0 {
                issues.push(
                    ValidationIssue::info(format!(
                        "console.log left in code ({log_count} occurrence{})",
                        plural(log_count)
                    ))
                    .in_file(&file.path),
                );
            }
        }

        issues
    }
}

/// Named imports that never appear again in the file. An identifier that
/// occurs exactly once (its own import) counts as unused.
fn unused_imports(named_imports: &Regex, content: &str) -> Vec<String> {
    let mut unused = Vec::new();
    for caps in named_imports.captures_iter(content) {
        for raw in caps[1].split(',') {
            // `Orig as Alias` binds the alias.
            let name = raw
                .rsplit(" as ")
                .next()
                .unwrap_or(raw)
                .trim()
                .to_string();
            if name.is_empty() {
                continue;
            }
            let occurrences = Regex::new(&format!(r"\b{}\b", regex::escape(&name)))
                .map(|re| re.find_iter(content).count())
                .unwrap_or(0);
            if occurrences <= 1 {
                unused.push(name);
            }
        }
    }
    unused
}

// ── Placeholder completeness ──────────────────────────────────────────────────

/// Any of the five marker forms surviving resolution is a defect.
pub struct PlaceholderCompletenessRule {
    scanner: PlaceholderScanner,
}

impl PlaceholderCompletenessRule {
    pub fn new() -> Self {
        Self {
            scanner: PlaceholderScanner::new(),
        }
    }
}

impl Default for PlaceholderCompletenessRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for PlaceholderCompletenessRule {
    fn name(&self) -> &'static str {
        "placeholder-completeness"
    }

    fn check(&self, files: &[ProcessedFile], _constraints: &Constraints) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for file in files {
            // One warning per surviving marker form per file.
            for (kind, count) in self.scanner.residual_counts(&file.content) {
                issues.push(
                    ValidationIssue::warning(format!(
                        "Unresolved {} placeholder ({count} occurrence{})",
                        kind.literal(),
                        plural(count)
                    ))
                    .in_file(&file.path),
                );
            }
        }

        issues
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;

    fn file(path: &str, kind: FileKind, content: &str) -> ProcessedFile {
        ProcessedFile::new(path, kind, content.into())
    }

    fn defaults() -> Constraints {
        Constraints::default()
    }

    #[test]
    fn img_without_alt_is_exactly_one_error() {
        let files = vec![file(
            "index.html",
            FileKind::Code,
            r#"<h1>x</h1><img src="a.png"><img src="b.png" alt="b">"#,
        )];
        let issues = AccessibilityRule.check(&files, &defaults());
        let alt_errors: Vec<_> = issues
            .iter()
            .filter(|i| i.message == "Images missing alt attributes")
            .collect();
        assert_eq!(alt_errors.len(), 1);
        assert_eq!(alt_errors[0].severity, Severity::Error);
        assert_eq!(alt_errors[0].file.as_deref(), Some("index.html"));
    }

    #[test]
    fn home_file_requires_h1() {
        let files = vec![file("pages/index.tsx", FileKind::Code, "<p>no heading</p>")];
        let issues = AccessibilityRule.check(&files, &defaults());
        assert!(
            issues
                .iter()
                .any(|i| i.message == "Home page missing <h1> heading")
        );

        let files = vec![file("pages/about.tsx", FileKind::Code, "<p>no heading</p>")];
        let issues = AccessibilityRule.check(&files, &defaults());
        assert!(
            !issues
                .iter()
                .any(|i| i.message.contains("<h1>"))
        );
    }

    #[test]
    fn aria_check_only_when_required() {
        let files = vec![file(
            "index.html",
            FileKind::Code,
            r#"<h1>t</h1><button>Go</button>"#,
        )];

        let relaxed = AccessibilityRule.check(&files, &defaults());
        assert!(!relaxed.iter().any(|i| i.message.contains("ARIA")));

        let mut strict = defaults();
        strict.a11y.aria_required = true;
        let issues = AccessibilityRule.check(&files, &strict);
        assert!(
            issues
                .iter()
                .any(|i| i.message == "Interactive elements missing ARIA attributes"
                    && i.severity == Severity::Error)
        );
    }

    #[test]
    fn small_fonts_warn_when_minimum_raised() {
        let files = vec![file(
            "index.html",
            FileKind::Code,
            r#"<p class="text-xs">fine print</p>"#,
        )];
        let mut constraints = defaults();
        constraints.a11y.min_font_size_px = 14;
        let issues = AccessibilityRule.check(&files, &constraints);
        assert!(issues.iter().any(|i| i.message.contains("below the 14px")));
    }

    #[test]
    fn oversized_stylesheet_warns() {
        let big = "a{}".repeat(30_000); // ~60KB
        let files = vec![file("styles/main.css", FileKind::Style, &big)];
        let issues = PerformanceRule.check(&files, &defaults());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(issues[0].message.contains("over the 50KB budget"));
    }

    #[test]
    fn long_title_warns() {
        let long_title = format!("<title>{}</title>", "t".repeat(80));
        let files = vec![file("index.html", FileKind::Code, &long_title)];
        let issues = ContentSeoRule.check(&files, &defaults());
        assert!(issues.iter().any(|i| i.message.contains("over the 60 limit")));
    }

    #[test]
    fn missing_required_meta_warns_per_name() {
        let files = vec![file(
            "index.html",
            FileKind::Code,
            r#"<meta name="description" content="hi">"#,
        )];
        let issues = ContentSeoRule.check(&files, &defaults());
        // "viewport" missing, "description" present.
        assert_eq!(
            issues
                .iter()
                .filter(|i| i.message.starts_with("Missing required meta"))
                .count(),
            1
        );
        assert!(issues[0].message.contains("viewport"));
    }

    #[test]
    fn asset_rule_reads_filename_dimensions() {
        let mut constraints = defaults();
        constraints.assets.min_width = 800;
        constraints.assets.min_height = 600;
        let files = vec![
            file("img/hero-400x300.png", FileKind::Asset, "binary"),
            file("img/big-1200x800.png", FileKind::Asset, "binary"),
            file("img/unknown.png", FileKind::Asset, "binary"),
        ];
        let issues = AssetRule.check(&files, &constraints);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Info);
        assert!(issues[0].message.contains("400x300"));
    }

    #[test]
    fn inline_script_is_error_unless_allowed() {
        let files = vec![file(
            "index.html",
            FileKind::Code,
            r#"<script>alert(1)</script><script src="app.js"></script>"#,
        )];
        let issues = SecurityRule.check(&files, &defaults());
        assert!(
            issues
                .iter()
                .any(|i| i.severity == Severity::Error && i.message.contains("Inline script"))
        );

        let mut relaxed = defaults();
        relaxed.security.allow_inline_scripts = true;
        let issues = SecurityRule.check(&files, &relaxed);
        assert!(!issues.iter().any(|i| i.message.contains("Inline script")));
    }

    #[test]
    fn dangerous_patterns_warn() {
        let files = vec![file(
            "app.js",
            FileKind::Code,
            "eval(x); el.innerHTML = y; document.write(z);",
        )];
        let issues = SecurityRule.check(&files, &defaults());
        let warnings: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .collect();
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn code_quality_flags_are_info() {
        let content = r#"
import { useState, useEffect } from 'react';
const x: any = useState(0);
console.log(x);
"#;
        let files = vec![file("app.tsx", FileKind::Code, content)];
        let issues = CodeQualityRule.check(&files, &defaults());
        assert!(issues.iter().all(|i| i.severity == Severity::Info));
        assert!(issues.iter().any(|i| i.message.contains(": any")));
        assert!(issues.iter().any(|i| i.message == "Unused import: useEffect"));
        assert!(!issues.iter().any(|i| i.message == "Unused import: useState"));
        assert!(issues.iter().any(|i| i.message.contains("console.log")));
    }

    #[test]
    fn completeness_warns_once_per_form_per_file() {
        let files = vec![
            file("a.html", FileKind::Code, "<tw/> <tw/> {{ a.b }}"),
            file("b.html", FileKind::Code, "clean"),
        ];
        let issues = PlaceholderCompletenessRule::new().check(&files, &defaults());
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
        assert!(issues[0].message.contains("<tw/>"));
        assert!(issues[0].message.contains("2 occurrences"));
        assert!(issues[1].message.contains("{{ … }}"));
    }
}
