//! Artifact materialization adapters.
//!
//! The pipeline hands a finished `ProcessedTemplate` to an [`ArtifactSink`];
//! these adapters write it out. [`LocalArtifactWriter`] targets the real
//! filesystem, [`MemoryArtifactWriter`] an in-memory map for tests.
//!
//! Besides the resolved files, a `tailor.manifest.json` document carrying
//! the manifest, metadata and validation report is written at the artifact
//! root, so downstream packaging can audit the run without re-processing.

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use serde_json::json;
use tracing::{info, instrument};

use tailor_core::{
    application::{ApplicationError, ports::ArtifactSink},
    domain::ProcessedTemplate,
    error::{TailorError, TailorResult},
};

/// File name of the run report written next to the artifact files.
pub const MANIFEST_FILE: &str = "tailor.manifest.json";

fn render_manifest(artifact: &ProcessedTemplate) -> TailorResult<String> {
    let report = json!({
        "manifest": artifact.manifest,
        "metadata": artifact.metadata,
        "validation": artifact.validation,
    });
    serde_json::to_string_pretty(&report).map_err(|e| TailorError::Internal {
        message: format!("manifest serialization failed: {e}"),
    })
}

/// Production writer using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalArtifactWriter;

impl LocalArtifactWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalArtifactWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactSink for LocalArtifactWriter {
    #[instrument(skip_all, fields(root = %root.display(), files = artifact.files.len()))]
    fn write(&self, artifact: &ProcessedTemplate, root: &Path) -> TailorResult<()> {
        std::fs::create_dir_all(root).map_err(|e| map_io_error(root, e, "create directory"))?;

        for file in &artifact.files {
            let target = root.join(&file.path);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| map_io_error(parent, e, "create directory"))?;
            }
            std::fs::write(&target, &file.content)
                .map_err(|e| map_io_error(&target, e, "write file"))?;
        }

        let manifest_path = root.join(MANIFEST_FILE);
        std::fs::write(&manifest_path, render_manifest(artifact)?)
            .map_err(|e| map_io_error(&manifest_path, e, "write manifest"))?;

        info!(files = artifact.files.len(), "artifact written");
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> TailorError {
    ApplicationError::ArtifactWrite {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

/// In-memory writer for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryArtifactWriter {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl MemoryArtifactWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a written file's content (testing helper).
    pub fn read(&self, path: &Path) -> Option<String> {
        self.files.read().ok()?.get(path).cloned()
    }

    /// Paths written so far.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self
            .files
            .read()
            .expect("memory writer lock poisoned")
            .keys()
            .cloned()
            .collect();
        paths.sort();
        paths
    }
}

impl ArtifactSink for MemoryArtifactWriter {
    fn write(&self, artifact: &ProcessedTemplate, root: &Path) -> TailorResult<()> {
        let manifest = render_manifest(artifact)?;
        let mut files = self.files.write().expect("memory writer lock poisoned");
        for file in &artifact.files {
            files.insert(root.join(&file.path), file.content.clone());
        }
        files.insert(root.join(MANIFEST_FILE), manifest);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.read().expect("memory writer lock poisoned");
        files.keys().any(|p| p.starts_with(path) || p == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin_templates::landing_starter;
    use tailor_core::application::{TemplateProcessor, Validator};
    use tailor_core::domain::{ThemeRegistry, UserData};

    fn artifact() -> ProcessedTemplate {
        TemplateProcessor::new(ThemeRegistry::with_builtin(), Validator::standard())
            .process(&landing_starter(), &UserData::default())
            .unwrap()
    }

    #[test]
    fn local_writer_materializes_files_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("out");

        LocalArtifactWriter::new().write(&artifact(), &root).unwrap();

        assert!(root.join("index.html").is_file());
        assert!(root.join("styles/main.css").is_file());
        let manifest = std::fs::read_to_string(root.join(MANIFEST_FILE)).unwrap();
        assert!(manifest.contains("\"template\": \"landing-starter\""));
    }

    #[test]
    fn memory_writer_round_trips() {
        let writer = MemoryArtifactWriter::new();
        let root = Path::new("/out");

        writer.write(&artifact(), root).unwrap();

        assert!(writer.exists(root));
        let index = writer.read(&root.join("index.html")).unwrap();
        assert!(!index.contains("<text/>"));
        assert!(writer.paths().iter().any(|p| p.ends_with(MANIFEST_FILE)));
    }
}
