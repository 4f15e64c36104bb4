//! JSON template and user-data loading.
//!
//! Both pipeline inputs are JSON documents. Loading validates structure
//! immediately so a broken file fails at the edge with a pointed message
//! instead of deep inside the pipeline.
//!
//! # Template document shape
//!
//! ```json
//! {
//!   "key": "landing-starter",
//!   "label": "Landing Starter",
//!   "category": "landing",
//!   "meta": { "description": "…", "engine": "static", "status": "published", "author": "…" },
//!   "tags": ["landing"],
//!   "initialVersion": {
//!     "sourceFiles": [ { "path": "index.html", "type": "code", "content": "…" } ],
//!     "slots": { "hero": { "fields": [ { "key": "title", "type": "text" } ] } },
//!     "constraints": { "a11y": { "ariaRequired": true } }
//!   }
//! }
//! ```
//!
//! # User-data document shape
//!
//! Every field optional:
//!
//! ```json
//! {
//!   "brandName": "Baan Kaffe",
//!   "theme": "cozy",
//!   "content": { "h1": "…" },
//!   "images": { "default": "https://…" },
//!   "slots": { "hero": { "title": "…" } },
//!   "dynamicData": { "contact": { "email": "…" } },
//!   "customizations": { "colors": { "primary": "violet" } }
//! }
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use tailor_core::{
    domain::{DomainError, DomainValidator, Template, UserData},
    error::{TailorError, TailorResult},
};

/// Load and validate a template document.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_template(path: &Path) -> TailorResult<Template> {
    let raw = fs::read_to_string(path).map_err(|e| TailorError::Configuration {
        message: format!("cannot read template file '{}': {e}", path.display()),
    })?;

    let template: Template = serde_json::from_str(&raw).map_err(|e| {
        TailorError::Domain(DomainError::InvalidTemplate(format!(
            "'{}' is not a valid template document: {e}",
            path.display()
        )))
    })?;

    DomainValidator::validate_template(&template)?;
    debug!(key = %template.key, files = template.version.source_files.len(), "template loaded");
    Ok(template)
}

/// Load a user-data document. A missing or empty object is fine; the
/// pipeline defends against absent fields.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_user_data(path: &Path) -> TailorResult<UserData> {
    let raw = fs::read_to_string(path).map_err(|e| TailorError::Configuration {
        message: format!("cannot read user data file '{}': {e}", path.display()),
    })?;

    serde_json::from_str(&raw).map_err(|e| TailorError::Configuration {
        message: format!("'{}' is not a valid user data document: {e}", path.display()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_minimal_template() {
        let file = write_temp(
            r#"{
                "key": "t",
                "label": "T",
                "initialVersion": {
                    "sourceFiles": [{"path": "a.html", "type": "code", "content": "<h1>x</h1>"}]
                }
            }"#,
        );
        let template = load_template(file.path()).unwrap();
        assert_eq!(template.key, "t");
    }

    #[test]
    fn rejects_structurally_broken_template() {
        // Parses, but carries no source files.
        let file = write_temp(r#"{"key": "t", "label": "T", "initialVersion": {}}"#);
        let result = load_template(file.path());
        assert!(matches!(
            result,
            Err(TailorError::Domain(DomainError::EmptyTemplate { .. }))
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        let file = write_temp("{ not json");
        assert!(load_template(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let result = load_template(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(TailorError::Configuration { .. })));
    }

    #[test]
    fn empty_user_data_object_loads() {
        let file = write_temp("{}");
        let data = load_user_data(file.path()).unwrap();
        assert!(data.brand_name.is_none());
    }
}
