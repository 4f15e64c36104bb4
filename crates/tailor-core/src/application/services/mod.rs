//! Application services: the pipeline's moving parts.

pub mod processor;
pub mod resolver;
pub mod slot_filler;
pub mod theme_applier;
pub mod validator;

pub use processor::{ProcessorConfig, TemplateProcessor};
pub use resolver::{BrandProfile, ContentResolver, ResolveContext, ResolveJob, Resolution};
pub use slot_filler::SlotFiller;
pub use theme_applier::ThemeApplier;
pub use validator::{ValidationRule, Validator};
