use crate::domain::{entities::template::Template, error::DomainError};

/// Centralized domain validation.
///
/// All structural validation lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_template(template: &Template) -> Result<(), DomainError> {
        template.validate()
    }
}
