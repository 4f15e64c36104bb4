//! Validation report types.
//!
//! Issues are severity-tagged observations; the result aggregates them with
//! a numeric quality score. The central invariant, that `is_valid` holds
//! exactly when there are no error-severity issues, is enforced by the only
//! constructor, so a hand-rolled inconsistent result cannot exist.

use serde::{Deserialize, Serialize};

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// One observation produced by a validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            file: None,
            line: None,
            suggestion: None,
        }
    }

    pub fn in_file(mut self, path: impl Into<String>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Aggregated validation outcome.
///
/// `errors` holds error-severity issues; `warnings` holds everything
/// non-fatal (warning and info severities). Validity depends only on
/// errors; a file set drowning in warnings can still be valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub score: u32,
}

impl ValidationResult {
    /// Build a result from a flat issue list and a precomputed score.
    /// Partitioning here is what makes `is_valid ⟺ errors.is_empty()`
    /// structurally true.
    pub fn from_issues(issues: Vec<ValidationIssue>, score: u32) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = issues
            .into_iter()
            .partition(|i| i.severity == Severity::Error);

        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            score,
        }
    }

    /// A clean pass: no issues, full score.
    pub fn passing() -> Self {
        Self::from_issues(Vec::new(), 100)
    }

    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_tracks_errors_only() {
        let result = ValidationResult::from_issues(
            vec![
                ValidationIssue::warning("w1"),
                ValidationIssue::info("i1"),
            ],
            85,
        );
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.warnings.len(), 2);

        let result = ValidationResult::from_issues(vec![ValidationIssue::error("e1")], 80);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn passing_result_is_full_score() {
        let result = ValidationResult::passing();
        assert!(result.is_valid);
        assert_eq!(result.score, 100);
        assert_eq!(result.issue_count(), 0);
    }

    #[test]
    fn issue_builder_attaches_context() {
        let issue = ValidationIssue::error("Images missing alt attributes")
            .in_file("index.html")
            .suggest("Add alt text to every <img> tag");
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.file.as_deref(), Some("index.html"));
        assert!(issue.suggestion.is_some());
        assert!(issue.line.is_none());
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), r#""error""#);
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            r#""warning""#
        );
    }
}
