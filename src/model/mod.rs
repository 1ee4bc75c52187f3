//! Data model shared between the metadata source and the resource sink
//!
//! `SourceEntity` is what the upstream metadata source hands us; the registry
//! treats everything beyond the guid and type name as opaque. `ServiceResource`
//! is the access-control system's canonical description of a protectable
//! asset; the registry passes it through untouched.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute key carrying the source system's fully qualified name
pub const ATTR_QUALIFIED_NAME: &str = "qualifiedName";

/// One metadata entity as discovered in the source system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntity {
    /// Globally unique id, used for diagnostics
    pub guid: String,
    /// Entity type identifier, the registry's lookup key
    #[serde(rename = "typeName")]
    pub type_name: String,
    /// Source-defined attributes, opaque to the registry
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl SourceEntity {
    pub fn new(guid: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            type_name: type_name.into(),
            attributes: HashMap::new(),
        }
    }

    /// Attach a string attribute (builder style, mostly for tests and demos)
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(key.into(), serde_json::Value::String(value.into()));
        self
    }

    /// Fetch an attribute as a string, if present and string-valued
    pub fn string_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(|v| v.as_str())
    }

    /// The source system's fully qualified name for this entity
    pub fn qualified_name(&self) -> Option<&str> {
        self.string_attribute(ATTR_QUALIFIED_NAME)
    }
}

/// Normalized resource description consumed by the access-control store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceResource {
    /// Guid of the entity this resource was derived from
    pub guid: String,
    /// Access-control service this resource belongs to (e.g. "cl1_hive")
    pub service_name: String,
    /// Resource signature elements, e.g. database/table/column for Hive
    pub resource_elements: HashMap<String, Vec<String>>,
    /// Extra key-value details forwarded to the resource store
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub additional_info: HashMap<String, String>,
}

impl ServiceResource {
    pub fn new(guid: impl Into<String>, service_name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            service_name: service_name.into(),
            resource_elements: HashMap::new(),
            additional_info: HashMap::new(),
        }
    }

    pub fn with_element(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.resource_elements
            .insert(name.into(), vec![value.into()]);
        self
    }
}
