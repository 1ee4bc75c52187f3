//! Ozone entity mapper
//!
//! Qualified names follow the `volume[/bucket[/key]]@cluster` convention;
//! keys may themselves contain slashes.

use super::{parse_qualified_name, ResourceMapper, ServiceNaming};
use crate::config::Config;
use crate::error::{Result, TagsyncError};
use crate::model::{ServiceResource, SourceEntity};

pub const ENTITY_TYPE_OZONE_VOLUME: &str = "ozone_volume";
pub const ENTITY_TYPE_OZONE_BUCKET: &str = "ozone_bucket";
pub const ENTITY_TYPE_OZONE_KEY: &str = "ozone_key";

#[derive(Default)]
pub struct OzoneResourceMapper {
    naming: ServiceNaming,
}

impl OzoneResourceMapper {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResourceMapper for OzoneResourceMapper {
    fn name(&self) -> &str {
        "ozone"
    }

    fn initialize(&mut self, config: &Config) -> Result<()> {
        self.naming = ServiceNaming::from_config(config, "ozone", "ozone");
        Ok(())
    }

    fn supported_entity_types(&self) -> Vec<String> {
        vec![
            ENTITY_TYPE_OZONE_VOLUME.to_string(),
            ENTITY_TYPE_OZONE_BUCKET.to_string(),
            ENTITY_TYPE_OZONE_KEY.to_string(),
        ]
    }

    fn build_resource(&self, entity: &SourceEntity) -> Result<ServiceResource> {
        let qualified = parse_qualified_name(entity)?;
        let service = self.naming.service_name(qualified.cluster);

        let mut parts = qualified.name.splitn(3, '/');
        let volume = parts.next().unwrap_or_default();
        let bucket = parts.next();
        let key = parts.next();

        if volume.is_empty() {
            return Err(TagsyncError::conversion(entity, "empty volume name"));
        }

        let resource = ServiceResource::new(&entity.guid, service).with_element("volume", volume);

        match entity.type_name.as_str() {
            ENTITY_TYPE_OZONE_VOLUME => Ok(resource),
            ENTITY_TYPE_OZONE_BUCKET => {
                let bucket = bucket.ok_or_else(|| {
                    TagsyncError::conversion(entity, "qualifiedName has no bucket part")
                })?;
                Ok(resource.with_element("bucket", bucket))
            }
            ENTITY_TYPE_OZONE_KEY => {
                let bucket = bucket.ok_or_else(|| {
                    TagsyncError::conversion(entity, "qualifiedName has no bucket part")
                })?;
                let key = key.ok_or_else(|| {
                    TagsyncError::conversion(entity, "qualifiedName has no key part")
                })?;
                Ok(resource
                    .with_element("bucket", bucket)
                    .with_element("key", key))
            }
            other => Err(TagsyncError::conversion(
                entity,
                format!("unsupported entity type: {}", other),
            )),
        }
    }
}
