use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tagsync mapper core
#[derive(Error, Debug)]
pub enum TagsyncError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Configuration validation failed: {errors:?}")]
    ConfigValidation { errors: Vec<ValidationError> },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// No constructor registered for a mapper identifier
    #[error("Unknown mapper: {name}")]
    UnknownMapper { name: String },

    /// A mapper could not be constructed or configured
    #[error("Failed to initialize mapper {mapper}: {message}")]
    MapperInit { mapper: String, message: String },

    /// A mapper could not convert a specific entity
    #[error("Cannot build resource for entity {guid} (type {type_name}): {message}")]
    Conversion {
        guid: String,
        type_name: String,
        message: String,
    },

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// JSON errors
    #[error("JSON error: {context}: {source}")]
    Json {
        source: serde_json::Error,
        context: String,
    },

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Path to the configuration key that failed validation
    pub path: String,
    /// Error message describing the validation failure
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl TagsyncError {
    /// Conversion error carrying the entity's diagnostic identifiers
    pub fn conversion(entity: &crate::model::SourceEntity, message: impl Into<String>) -> Self {
        Self::Conversion {
            guid: entity.guid.clone(),
            type_name: entity.type_name.clone(),
            message: message.into(),
        }
    }
}

/// Result type for tagsync operations
pub type Result<T> = std::result::Result<T, TagsyncError>;
