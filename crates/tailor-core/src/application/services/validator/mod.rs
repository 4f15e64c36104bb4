//! Rule-based validation of the resolved file set.
//!
//! The validator owns an explicitly constructed, ordered list of
//! independent rules. Each rule inspects the whole file set and returns
//! zero or more severity-tagged issues; a rule that panics is converted
//! into a single error-severity issue attributed to it, so validation
//! always completes and always returns a result.
//!
//! ## Scoring
//!
//! Every rule starts at 100 and loses 20 per error, 10 per warning and
//! 5 per info, floored at 0. The overall score is the arithmetic mean of
//! the per-rule scores. Validity is independent of the score: it holds
//! exactly when no error-severity issue exists.

pub mod rules;

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{instrument, warn};

use crate::domain::{Constraints, ProcessedFile, Severity, ValidationIssue, ValidationResult};

pub use rules::{
    AccessibilityRule, AssetRule, CodeQualityRule, ContentSeoRule, PerformanceRule,
    PlaceholderCompletenessRule, SecurityRule,
};

/// One independent validation rule.
///
/// Rules must not hold mutable state: `check` may be called from multiple
/// validations concurrently.
pub trait ValidationRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Inspect the resolved file set and report issues.
    fn check(&self, files: &[ProcessedFile], constraints: &Constraints) -> Vec<ValidationIssue>;
}

/// Penalty per issue severity.
fn penalty(severity: Severity) -> u32 {
    match severity {
        Severity::Error => 20,
        Severity::Warning => 10,
        Severity::Info => 5,
    }
}

/// Validator holding an ordered rule list.
///
/// Constructed explicitly and passed by reference into the processor:
/// there is no process-wide rule registry, so concurrent pipelines with
/// different rule sets cannot interfere.
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// Validator with no rules; every validation passes at score 100.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The standard rule set, in canonical order.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                Box::new(AccessibilityRule),
                Box::new(PerformanceRule),
                Box::new(ContentSeoRule),
                Box::new(AssetRule),
                Box::new(SecurityRule),
                Box::new(CodeQualityRule),
                Box::new(PlaceholderCompletenessRule::new()),
            ],
        }
    }

    /// Add a custom rule to the end of the list.
    pub fn with_rule(mut self, rule: Box<dyn ValidationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Run every rule and aggregate issues and score.
    ///
    /// Never fails: a broken rule contributes one error issue instead of
    /// aborting the remaining rules.
    #[instrument(skip_all, fields(files = files.len(), rules = self.rules.len()))]
    pub fn validate(&self, files: &[ProcessedFile], constraints: &Constraints) -> ValidationResult {
        if self.rules.is_empty() {
            return ValidationResult::passing();
        }

        let mut all_issues = Vec::new();
        let mut score_sum: u64 = 0;

        for rule in &self.rules {
            let issues = match catch_unwind(AssertUnwindSafe(|| rule.check(files, constraints))) {
                Ok(issues) => issues,
                Err(_) => {
                    warn!(rule = rule.name(), "validation rule panicked");
                    vec![
                        ValidationIssue::error(format!(
                            "Validation rule '{}' failed to run",
                            rule.name()
                        ))
                        .suggest("Report this so the rule can be fixed"),
                    ]
                }
            };

            let deductions: u32 = issues.iter().map(|i| penalty(i.severity)).sum();
            score_sum += u64::from(100u32.saturating_sub(deductions));
            all_issues.extend(issues);
        }

        let score = (score_sum as f64 / self.rules.len() as f64).round() as u32;
        ValidationResult::from_issues(all_issues, score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FileKind;

    struct NoisyRule {
        issues: Vec<ValidationIssue>,
    }

    impl ValidationRule for NoisyRule {
        fn name(&self) -> &'static str {
            "noisy"
        }
        fn check(&self, _: &[ProcessedFile], _: &Constraints) -> Vec<ValidationIssue> {
            self.issues.clone()
        }
    }

    struct PanickingRule;

    impl ValidationRule for PanickingRule {
        fn name(&self) -> &'static str {
            "panicking"
        }
        fn check(&self, _: &[ProcessedFile], _: &Constraints) -> Vec<ValidationIssue> {
            panic!("boom");
        }
    }

    fn files() -> Vec<ProcessedFile> {
        vec![ProcessedFile::new(
            "index.html",
            FileKind::Code,
            "<h1>ok</h1>".into(),
        )]
    }

    #[test]
    fn clean_rules_score_100_and_pass() {
        let validator = Validator::empty().with_rule(Box::new(NoisyRule { issues: vec![] }));
        let result = validator.validate(&files(), &Constraints::default());
        assert!(result.is_valid);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn deductions_follow_severity() {
        // One error (-20) and one warning (-10) on a single rule: 70.
        let validator = Validator::empty().with_rule(Box::new(NoisyRule {
            issues: vec![
                ValidationIssue::error("e"),
                ValidationIssue::warning("w"),
            ],
        }));
        let result = validator.validate(&files(), &Constraints::default());
        assert_eq!(result.score, 70);
        assert!(!result.is_valid);
    }

    #[test]
    fn score_is_mean_across_rules() {
        let validator = Validator::empty()
            .with_rule(Box::new(NoisyRule { issues: vec![] }))
            .with_rule(Box::new(NoisyRule {
                issues: vec![ValidationIssue::error("e")],
            }));
        let result = validator.validate(&files(), &Constraints::default());
        assert_eq!(result.score, 90); // (100 + 80) / 2
    }

    #[test]
    fn rule_score_floors_at_zero() {
        let issues: Vec<_> = (0..10).map(|i| ValidationIssue::error(format!("e{i}"))).collect();
        let validator = Validator::empty().with_rule(Box::new(NoisyRule { issues }));
        let result = validator.validate(&files(), &Constraints::default());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn panicking_rule_becomes_error_issue_and_others_still_run() {
        let validator = Validator::empty()
            .with_rule(Box::new(PanickingRule))
            .with_rule(Box::new(NoisyRule {
                issues: vec![ValidationIssue::warning("still ran")],
            }));
        let result = validator.validate(&files(), &Constraints::default());
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("panicking"));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn warnings_do_not_invalidate() {
        let validator = Validator::empty().with_rule(Box::new(NoisyRule {
            issues: vec![ValidationIssue::warning("w"), ValidationIssue::info("i")],
        }));
        let result = validator.validate(&files(), &Constraints::default());
        assert!(result.is_valid);
        assert_eq!(result.score, 85);
    }

    #[test]
    fn standard_rule_set_has_seven_rules() {
        assert_eq!(Validator::standard().rule_count(), 7);
    }
}
