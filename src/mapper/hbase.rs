//! HBase entity mapper
//!
//! Qualified names follow the `table[:family[:column]]@cluster` convention.

use super::{parse_qualified_name, ResourceMapper, ServiceNaming};
use crate::config::Config;
use crate::error::{Result, TagsyncError};
use crate::model::{ServiceResource, SourceEntity};

pub const ENTITY_TYPE_HBASE_TABLE: &str = "hbase_table";
pub const ENTITY_TYPE_HBASE_COLUMN_FAMILY: &str = "hbase_column_family";
pub const ENTITY_TYPE_HBASE_COLUMN: &str = "hbase_column";

#[derive(Default)]
pub struct HbaseResourceMapper {
    naming: ServiceNaming,
}

impl HbaseResourceMapper {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResourceMapper for HbaseResourceMapper {
    fn name(&self) -> &str {
        "hbase"
    }

    fn initialize(&mut self, config: &Config) -> Result<()> {
        self.naming = ServiceNaming::from_config(config, "hbase", "hbase");
        Ok(())
    }

    fn supported_entity_types(&self) -> Vec<String> {
        vec![
            ENTITY_TYPE_HBASE_TABLE.to_string(),
            ENTITY_TYPE_HBASE_COLUMN_FAMILY.to_string(),
            ENTITY_TYPE_HBASE_COLUMN.to_string(),
        ]
    }

    fn build_resource(&self, entity: &SourceEntity) -> Result<ServiceResource> {
        let qualified = parse_qualified_name(entity)?;
        let service = self.naming.service_name(qualified.cluster);

        let mut parts = qualified.name.splitn(3, ':');
        let table = parts.next().unwrap_or_default();
        let family = parts.next();
        let column = parts.next();

        if table.is_empty() {
            return Err(TagsyncError::conversion(entity, "empty table name"));
        }

        let resource = ServiceResource::new(&entity.guid, service).with_element("table", table);

        match entity.type_name.as_str() {
            ENTITY_TYPE_HBASE_TABLE => Ok(resource),
            ENTITY_TYPE_HBASE_COLUMN_FAMILY => {
                let family = family.ok_or_else(|| {
                    TagsyncError::conversion(entity, "qualifiedName has no column-family part")
                })?;
                Ok(resource.with_element("column-family", family))
            }
            ENTITY_TYPE_HBASE_COLUMN => {
                let family = family.ok_or_else(|| {
                    TagsyncError::conversion(entity, "qualifiedName has no column-family part")
                })?;
                let column = column.ok_or_else(|| {
                    TagsyncError::conversion(entity, "qualifiedName has no column part")
                })?;
                Ok(resource
                    .with_element("column-family", family)
                    .with_element("column", column))
            }
            other => Err(TagsyncError::conversion(
                entity,
                format!("unsupported entity type: {}", other),
            )),
        }
    }
}
