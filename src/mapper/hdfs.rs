//! HDFS path mapper

use super::{parse_qualified_name, ResourceMapper, ServiceNaming};
use crate::config::Config;
use crate::error::{Result, TagsyncError};
use crate::model::{ServiceResource, SourceEntity};

pub const ENTITY_TYPE_HDFS_PATH: &str = "hdfs_path";

#[derive(Default)]
pub struct HdfsResourceMapper {
    naming: ServiceNaming,
}

impl HdfsResourceMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strip an `hdfs://authority` prefix so only the filesystem path remains
    fn path_of(name: &str) -> &str {
        match name.split_once("://") {
            Some((_, rest)) => match rest.find('/') {
                Some(idx) => &rest[idx..],
                None => "/",
            },
            None => name,
        }
    }
}

impl ResourceMapper for HdfsResourceMapper {
    fn name(&self) -> &str {
        "hdfs"
    }

    fn initialize(&mut self, config: &Config) -> Result<()> {
        self.naming = ServiceNaming::from_config(config, "hdfs", "hadoop");
        Ok(())
    }

    fn supported_entity_types(&self) -> Vec<String> {
        vec![ENTITY_TYPE_HDFS_PATH.to_string()]
    }

    fn build_resource(&self, entity: &SourceEntity) -> Result<ServiceResource> {
        if entity.type_name != ENTITY_TYPE_HDFS_PATH {
            return Err(TagsyncError::conversion(
                entity,
                format!("unsupported entity type: {}", entity.type_name),
            ));
        }

        let qualified = parse_qualified_name(entity)?;
        let path = Self::path_of(qualified.name);
        if path.is_empty() {
            return Err(TagsyncError::conversion(entity, "empty path"));
        }

        let service = self.naming.service_name(qualified.cluster);

        let mut resource = ServiceResource::new(&entity.guid, service).with_element("path", path);
        // Paths protect their whole subtree
        resource
            .additional_info
            .insert("isRecursive".to_string(), "true".to_string());
        Ok(resource)
    }
}
