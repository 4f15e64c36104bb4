//! Comprehensive error handling for the Tailor CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;
use tracing::error;

use tailor_core::error::{ErrorCategory, TailorError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Comprehensive CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed).
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Output directory already exists.
    #[error("Output already exists at {path}")]
    OutputExists { path: PathBuf },

    /// `check` ran and the artifact failed validation.
    #[error("Validation failed with {errors} error(s), score {score}")]
    ChecksFailed { errors: usize, score: u32 },

    /// Unknown theme name passed on the command line.
    #[error("Unknown theme '{name}'")]
    UnknownTheme { name: String, available: Vec<String> },

    /// AI generation requested without a configured credential.
    #[error("AI generation requested but no credential is configured")]
    MissingCredential,

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `tailor-core`.
    ///
    /// Wrapped here so that the CLI can attach suggestions drawn from the
    /// core error's category without touching core internals.
    #[error("Processing failed: {0}")]
    Core(#[from] TailorError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Map to an OS exit code.
    ///
    /// | Code | Meaning                 |
    /// |------|-------------------------|
    /// |  1   | Internal / system error |
    /// |  2   | User / input error      |
    /// |  3   | Resource not found      |
    /// |  4   | Configuration error     |
    /// |  5   | Validation gate failed  |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput { .. } | Self::OutputExists { .. } => 2,
            Self::ChecksFailed { .. } => 5,
            Self::UnknownTheme { .. } => 3,
            Self::MissingCredential | Self::ConfigError { .. } => 4,
            Self::Core(e) => match e.category() {
                ErrorCategory::Validation => 2,
                ErrorCategory::NotFound => 3,
                ErrorCategory::Configuration => 4,
                ErrorCategory::Internal => 1,
            },
            Self::IoError { .. } => 1,
        }
    }

    /// User-actionable suggestions for this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::OutputExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Choose a different output directory".into(),
            ],
            Self::ChecksFailed { .. } => vec![
                "Run `tailor process --json` and inspect .validation for details".into(),
            ],
            Self::UnknownTheme { available, .. } => vec![
                format!("Available themes: {}", available.join(", ")),
            ],
            Self::MissingCredential => vec![
                "Set TAILOR_AI_API_KEY in the environment or a .env file".into(),
                "Or drop --ai to run fully deterministic".into(),
            ],
            Self::Core(e) => e.suggestions(),
            _ => vec![],
        }
    }

    /// Emit a structured log event at the right severity.
    pub fn log(&self) {
        error!(exit_code = self.exit_code(), "{self}");
    }

    /// Render with colour for a TTY.
    pub fn format_colored(&self) -> String {
        let mut out = format!("{} {}\n", "\u{2717}".red().bold(), self.to_string().red());
        for suggestion in self.suggestions() {
            out.push_str(&format!("  {} {}\n", "\u{2192}".dimmed(), suggestion.dimmed()));
        }
        out
    }

    /// Render without colour for pipes and logs.
    pub fn format_plain(&self) -> String {
        let mut out = format!("\u{2717} {self}\n");
        for suggestion in self.suggestions() {
            out.push_str(&format!("  \u{2192} {suggestion}\n"));
        }
        out
    }
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        Self::IoError {
            message: source.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(
            CliError::InvalidInput { message: "m".into() }.exit_code(),
            2
        );
        assert_eq!(
            CliError::ChecksFailed { errors: 1, score: 60 }.exit_code(),
            5
        );
        assert_eq!(
            CliError::UnknownTheme { name: "x".into(), available: vec![] }.exit_code(),
            3
        );
        assert_eq!(CliError::MissingCredential.exit_code(), 4);
    }

    #[test]
    fn plain_format_carries_suggestions() {
        let err = CliError::MissingCredential;
        let text = err.format_plain();
        assert!(text.contains("TAILOR_AI_API_KEY"));
    }
}
