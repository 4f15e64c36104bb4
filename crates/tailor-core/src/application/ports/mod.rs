//! Application ports (traits) for external dependencies.
//!
//! These traits define what the application needs from the outside world.
//! The `tailor-adapters` crate provides implementations.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::domain::{PlaceholderKind, ProcessedTemplate};
use crate::error::TailorResult;

/// Port for outbound content generation.
///
/// Implemented by:
/// - `tailor_adapters::generator::HttpContentGenerator` (production)
/// - `tailor_adapters::generator::ScriptedGenerator` (testing/offline)
///
/// ## Contract
///
/// - Calls are independent and side-effect free from the pipeline's view;
///   the resolver may issue them concurrently.
/// - Implementations own their timeout. A timed-out or cancelled call
///   returns [`GeneratorError::Timeout`] and is treated exactly like any
///   other failure: the resolver falls through to its deterministic step.
/// - A failure here can never abort the pipeline.
pub trait ContentGenerator: Send + Sync {
    /// Generate content for one placeholder.
    fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError>;
}

/// One content-generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// The marker kind the content is for; lets implementations tune
    /// decoding (e.g. shorter outputs for `tw`).
    pub kind: PlaceholderKind,

    /// Fully built prompt text.
    pub prompt: String,

    /// Brand name, for logging and request tagging.
    pub brand: String,
}

/// Failures a generator implementation can report.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeneratorError {
    /// No credential configured or the generator is disabled.
    #[error("content generator unavailable: {0}")]
    Unavailable(String),

    /// The call exceeded its deadline (or was cancelled).
    #[error("content generation timed out after {0:?}")]
    Timeout(Duration),

    /// Transport or provider failure.
    #[error("content generation failed: {0}")]
    Failed(String),

    /// The provider answered, but not in an acceptable shape.
    #[error("unusable generator response: {0}")]
    BadResponse(String),
}

/// Port for materializing a finished artifact.
///
/// Implemented by:
/// - `tailor_adapters::artifact_writer::LocalArtifactWriter` (production)
/// - `tailor_adapters::artifact_writer::MemoryArtifactWriter` (testing)
pub trait ArtifactSink: Send + Sync {
    /// Write the artifact's files and manifest under `root`.
    fn write(&self, artifact: &ProcessedTemplate, root: &Path) -> TailorResult<()>;

    /// Check whether a target path already exists.
    fn exists(&self, path: &Path) -> bool;
}

#[cfg(test)]
mockall::mock! {
    /// Mock generator for resolver and processor tests.
    pub Generator {}

    impl ContentGenerator for Generator {
        fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError>;
    }
}

#[cfg(test)]
pub(crate) use MockGenerator as MockContentGenerator;
