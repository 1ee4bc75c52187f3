//! Hive entity mapper
//!
//! Qualified names follow the `db[.table[.column]]@cluster` convention.

use super::{parse_qualified_name, ResourceMapper, ServiceNaming};
use crate::config::Config;
use crate::error::{Result, TagsyncError};
use crate::model::{ServiceResource, SourceEntity};

pub const ENTITY_TYPE_HIVE_DB: &str = "hive_db";
pub const ENTITY_TYPE_HIVE_TABLE: &str = "hive_table";
pub const ENTITY_TYPE_HIVE_COLUMN: &str = "hive_column";

#[derive(Default)]
pub struct HiveResourceMapper {
    naming: ServiceNaming,
}

impl HiveResourceMapper {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResourceMapper for HiveResourceMapper {
    fn name(&self) -> &str {
        "hive"
    }

    fn initialize(&mut self, config: &Config) -> Result<()> {
        self.naming = ServiceNaming::from_config(config, "hive", "hive");
        Ok(())
    }

    fn supported_entity_types(&self) -> Vec<String> {
        vec![
            ENTITY_TYPE_HIVE_DB.to_string(),
            ENTITY_TYPE_HIVE_TABLE.to_string(),
            ENTITY_TYPE_HIVE_COLUMN.to_string(),
        ]
    }

    fn build_resource(&self, entity: &SourceEntity) -> Result<ServiceResource> {
        let qualified = parse_qualified_name(entity)?;
        let service = self.naming.service_name(qualified.cluster);

        let mut parts = qualified.name.splitn(3, '.');
        let database = parts.next().unwrap_or_default();
        let table = parts.next();
        let column = parts.next();

        if database.is_empty() {
            return Err(TagsyncError::conversion(entity, "empty database name"));
        }

        let resource = ServiceResource::new(&entity.guid, service).with_element("database", database);

        match entity.type_name.as_str() {
            ENTITY_TYPE_HIVE_DB => Ok(resource),
            ENTITY_TYPE_HIVE_TABLE => {
                let table = table.ok_or_else(|| {
                    TagsyncError::conversion(entity, "qualifiedName has no table part")
                })?;
                Ok(resource.with_element("table", table))
            }
            ENTITY_TYPE_HIVE_COLUMN => {
                let table = table.ok_or_else(|| {
                    TagsyncError::conversion(entity, "qualifiedName has no table part")
                })?;
                let column = column.ok_or_else(|| {
                    TagsyncError::conversion(entity, "qualifiedName has no column part")
                })?;
                Ok(resource
                    .with_element("table", table)
                    .with_element("column", column))
            }
            other => Err(TagsyncError::conversion(
                entity,
                format!("unsupported entity type: {}", other),
            )),
        }
    }
}
