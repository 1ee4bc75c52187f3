use crate::config::Config;
use crate::error::{Result, TagsyncError, ValidationError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_custom_mappers(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(TagsyncError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_custom_mappers(config: &Config, errors: &mut Vec<ValidationError>) {
        // Identifiers become factory lookup keys; reject embedded whitespace
        for name in config.custom_mapper_names() {
            if name.chars().any(char::is_whitespace) {
                errors.push(ValidationError::new(
                    "sync.custom_mappers",
                    format!("Mapper identifier contains whitespace: '{}'", name),
                ));
            }
        }
    }
}
