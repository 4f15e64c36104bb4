//! Tailor Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Tailor
//! template pipeline, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           tailor-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (TemplateProcessor, SlotFiller,        │
//! │   ContentResolver, Validator)           │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Driven: ContentGenerator, Sink)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     tailor-adapters (Infrastructure)    │
//! │  (HttpContentGenerator, loaders, ...)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Template, Theme, Placeholder, ...)    │
//! │        No I/O, no network               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tailor_core::{
//!     application::{TemplateProcessor, Validator},
//!     domain::{Template, ThemeRegistry, UserData},
//! };
//!
//! # fn example(template: Template, user_data: UserData) {
//! let processor = TemplateProcessor::new(ThemeRegistry::with_builtin(), Validator::standard());
//! let artifact = processor.process(&template, &user_data).unwrap();
//! assert_eq!(artifact.metadata.validation_passed, artifact.validation.is_valid);
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ProcessorConfig, TemplateProcessor, Validator,
        ports::{ArtifactSink, ContentGenerator, GenerationRequest, GeneratorError},
    };
    pub use crate::domain::{
        FileKind, Manifest, PlaceholderKind, ProcessedFile, ProcessedTemplate, Severity,
        SourceFile, Template, TemplateVersion, Theme, ThemeRegistry, UserData, ValidationIssue,
        ValidationResult,
    };
    pub use crate::error::{TailorError, TailorResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
