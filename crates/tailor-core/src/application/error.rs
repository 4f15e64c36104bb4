//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.
//!
//! Only *hard* failures live here: a structurally broken template or an
//! unexpected fault while processing a specific file. Soft failures
//! (generator timeouts, unknown themes, a single field failing validation)
//! are absorbed by their component and surface at most as warnings in the
//! artifact metadata.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Processing one source file failed. Aborts the whole run; the path
    /// identifies the offender.
    #[error("Failed to process '{path}': {reason}")]
    FileProcessing { path: String, reason: String },

    /// Writing the artifact through a sink failed.
    #[error("Artifact write failed at {path}: {reason}")]
    ArtifactWrite { path: PathBuf, reason: String },

    /// Artifact target already exists.
    #[error("Output already exists at {path}")]
    OutputExists { path: PathBuf },

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FileProcessing { path, .. } => vec![
                format!("Processing aborted at: {}", path),
                "Check the template's source file for malformed markup".into(),
            ],
            Self::ArtifactWrite { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::OutputExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Choose a different output directory".into(),
            ],
            Self::ValidationFailed(_) => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileProcessing { .. } => ErrorCategory::Internal,
            Self::ArtifactWrite { .. } => ErrorCategory::Internal,
            Self::OutputExists { .. } => ErrorCategory::Validation,
            Self::ValidationFailed(_) => ErrorCategory::Validation,
        }
    }
}
