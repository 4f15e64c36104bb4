// ============================================================================
// domain/error.rs - COMPREHENSIVE ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// Soft failures (unknown theme, a generator call failing, a single field
/// failing validation) never surface here; they degrade inside their
/// component. A `DomainError` always means the input itself is malformed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template '{template_key}' has no source files")]
    EmptyTemplate { template_key: String },

    #[error("Duplicate source file path in template: {path}")]
    DuplicatePath { path: String },

    #[error("Invalid slot '{slot}': {reason}")]
    InvalidSlotConfig { slot: String, reason: String },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("Unknown theme: {name}")]
    UnknownTheme { name: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTemplate(msg) => vec![
                "Check the template definition".into(),
                format!("Details: {}", msg),
            ],
            Self::EmptyTemplate { template_key } => vec![
                format!("Template '{}' declares no source files", template_key),
                "A template must ship at least one file".into(),
            ],
            Self::DuplicatePath { path } => vec![
                format!("The path '{}' appears more than once", path),
                "Every source file needs a unique path".into(),
            ],
            Self::UnknownTheme { name } => vec![
                format!("No theme named '{}' is registered", name),
                "Try: tailor themes".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTemplate(_)
            | Self::EmptyTemplate { .. }
            | Self::DuplicatePath { .. }
            | Self::InvalidSlotConfig { .. } => ErrorCategory::Validation,
            Self::UnknownTheme { .. } => ErrorCategory::NotFound,
            Self::MissingRequiredField { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
