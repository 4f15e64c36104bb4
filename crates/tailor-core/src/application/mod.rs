//! Application layer for Tailor.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TemplateProcessor, SlotFiller,
//!   ContentResolver, ThemeApplier, Validator)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    BrandProfile, ContentResolver, ProcessorConfig, SlotFiller, TemplateProcessor, ThemeApplier,
    ValidationRule, Validator,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ArtifactSink, ContentGenerator, GenerationRequest, GeneratorError};

pub use error::ApplicationError;
