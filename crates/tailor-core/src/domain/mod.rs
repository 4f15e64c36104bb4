// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Tailor.
//!
//! This module contains pure business logic. All I/O (the outbound
//! content-generation call, artifact persistence) is handled via ports
//! (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable entities**: Inputs are never mutated by the pipeline
//! - **No hidden singletons**: scanner and registry are explicit objects

// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod placeholder;
pub mod theme;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    artifact::{Manifest, ProcessedFile, ProcessedTemplate, ProcessingMetadata, sha256_hex},
    constraints::{
        A11yConstraints, AssetConstraints, Constraints, PerformanceConstraints, SecurityConstraints,
        SeoConstraints,
    },
    report::{Severity, ValidationIssue, ValidationResult},
    slot::{FieldConfig, FieldType, FieldValidator, FilledSlot, SlotConfig},
    template::{FileKind, SourceFile, Template, TemplateMeta, TemplateVersion},
    user_data::{ThemeCustomizations, UserData, lookup_path},
};

pub use error::{DomainError, ErrorCategory};

pub use placeholder::{
    MarkerContext, Placeholder, PlaceholderKind, PlaceholderScanner, Segment,
};

pub use theme::{
    ColorFamily, DEFAULT_THEME, RAMP_STEPS, SemanticColors, StepShift, Theme, ThemeColors,
    ThemeRegistry, Typography,
};

pub use validation::DomainValidator;
