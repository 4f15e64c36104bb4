//! Template domain aggregate.
//!
//! A [`Template`] is the central input of the pipeline: a parameterized
//! project blueprint whose source files carry typed placeholder markers.
//! Templates are **immutable inputs**: the pipeline never mutates one; it
//! produces a fully independent [`ProcessedTemplate`](super::artifact::ProcessedTemplate).
//!
//! ## Aggregate shape
//!
//! ```text
//! Template (Aggregate Root)
//! ├── TemplateMeta (Value Object) - human-readable info
//! ├── tags                        - search keywords
//! └── TemplateVersion (Value Object)
//!      ├── Vec<SourceFile>        - path + kind + raw content
//!      ├── slots                  - name → SlotConfig (typed data contract)
//!      └── Constraints            - validation budgets
//! ```
//!
//! ## Invariants (enforced by `validate()`)
//!
//! 1. `key` is non-empty
//! 2. `label` is non-empty
//! 3. the version ships at least one source file
//! 4. all source-file paths are unique
//!
//! Violating any of these is a *hard* error: the caller handed us a
//! structurally broken template, and the pipeline refuses to start.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{constraints::Constraints, slot::SlotConfig},
    error::DomainError,
};

/// A reusable, parameterized project blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Stable identifier (e.g. "landing-starter"). Unique per catalogue.
    pub key: String,

    /// Human-readable display name.
    pub label: String,

    /// Catalogue category (e.g. "landing", "portfolio").
    #[serde(default)]
    pub category: String,

    /// Descriptive metadata for UI/CLI display.
    #[serde(default)]
    pub meta: TemplateMeta,

    /// Searchable tags for discovery.
    #[serde(default)]
    pub tags: Vec<String>,

    /// The content being processed. A template carries exactly one version
    /// through the pipeline; catalogue-level version history lives outside
    /// this core.
    #[serde(rename = "initialVersion")]
    pub version: TemplateVersion,
}

impl Template {
    /// Validate all structural invariants.
    ///
    /// Called by the processor before any file is touched; adapters that
    /// load templates from disk should also validate at load time.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.key.trim().is_empty() {
            return Err(DomainError::InvalidTemplate(
                "template key cannot be empty".into(),
            ));
        }

        if self.label.trim().is_empty() {
            return Err(DomainError::InvalidTemplate(
                "template label cannot be empty".into(),
            ));
        }

        if self.version.source_files.is_empty() {
            return Err(DomainError::EmptyTemplate {
                template_key: self.key.clone(),
            });
        }

        let mut seen = HashSet::new();
        for file in &self.version.source_files {
            if !seen.insert(file.path.as_str()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.clone(),
                });
            }
        }

        for (name, slot) in &self.version.slots {
            slot.validate(name)?;
        }

        Ok(())
    }
}

/// Human-readable information about a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateMeta {
    /// Longer description for help text and documentation.
    pub description: String,

    /// Rendering engine the source files target (e.g. "nextjs", "static").
    pub engine: String,

    /// Catalogue lifecycle status (e.g. "published", "draft").
    pub status: String,

    /// Author or organization that created the template.
    pub author: String,
}

/// One processable version of a template: files, slot contracts, and the
/// validation budgets the output is held to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateVersion {
    /// Raw source files, possibly containing placeholder markers.
    pub source_files: Vec<SourceFile>,

    /// Named, typed data regions. Key = slot name. Kept ordered so that
    /// manifests and fallback resolution are deterministic across runs.
    pub slots: BTreeMap<String, SlotConfig>,

    /// Quality budgets the validator checks the resolved output against.
    pub constraints: Constraints,
}

/// A single raw file inside a template.
///
/// Content is opaque text to the pipeline: it is scanned for markers and
/// theme tokens, never parsed as the host language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    /// Relative path inside the generated project (e.g. "pages/index.tsx").
    pub path: String,

    /// Coarse file classification; drives validator rule scoping.
    #[serde(rename = "type")]
    pub kind: FileKind,

    /// Raw text, possibly containing placeholder markers.
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, kind: FileKind, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            content: content.into(),
        }
    }
}

/// Coarse classification of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Application code (components, pages).
    Code,
    /// Build/runtime configuration.
    Config,
    /// Static assets (images, fonts).
    Asset,
    /// Stylesheets.
    Style,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code => write!(f, "code"),
            Self::Config => write!(f, "config"),
            Self::Asset => write!(f, "asset"),
            Self::Style => write!(f, "style"),
        }
    }
}
