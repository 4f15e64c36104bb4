//! The pipeline's output artifact.
//!
//! A [`ProcessedTemplate`] is self-contained: resolved files with sizes and
//! checksums, a manifest describing what was generated, processing metadata,
//! and the validation report. Persistence and packaging layers consume it
//! as-is; nothing in here refers back to pipeline internals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::entities::{report::ValidationResult, template::FileKind};

/// One fully resolved output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedFile {
    pub path: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Content length in bytes.
    pub size: u64,
    /// Hex SHA-256 of the content. A pure function of `content`: identical
    /// content across runs yields an identical checksum.
    pub checksum: String,
}

impl ProcessedFile {
    /// Build from resolved content, deriving size and checksum.
    pub fn new(path: impl Into<String>, kind: FileKind, content: String) -> Self {
        let size = content.len() as u64;
        let checksum = sha256_hex(content.as_bytes());
        Self {
            path: path.into(),
            content,
            kind,
            size,
            checksum,
        }
    }
}

/// Compute the hex SHA-256 digest of a byte slice.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Descriptive record of a generated project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Project name (the brand name after normalization).
    pub name: String,
    pub version: String,
    pub description: String,
    /// Key of the template that produced this artifact.
    pub template: String,
    /// Rendering engine declared by the template.
    pub engine: String,
    pub file_count: usize,
    pub generated_at: DateTime<Utc>,
    /// The theme actually applied (post-normalization, so never an unknown
    /// name).
    pub theme: String,
    /// Names of the slots that were filled.
    pub slots: Vec<String>,
}

/// Processing telemetry attached to the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingMetadata {
    pub processing_time_ms: u64,
    /// Total marker occurrences found across all source files.
    pub placeholder_count: usize,
    pub theme_applied: String,
    pub validation_passed: bool,
    /// Soft failures absorbed during processing (unknown theme, generator
    /// fallbacks, missing data paths).
    pub warnings: Vec<String>,
}

/// The complete pipeline output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedTemplate {
    pub files: Vec<ProcessedFile>,
    pub manifest: Manifest,
    pub metadata: ProcessingMetadata,
    pub validation: ValidationResult,
}

impl ProcessedTemplate {
    pub fn file(&self, path: &str) -> Option<&ProcessedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}
