//! ADLS Gen2 entity mapper
//!
//! Qualified names use the abfss convention:
//! `abfss://<container>@<account-host>[/<path>]@cluster` for containers and
//! directories, `abfss://<account-host>@cluster` for accounts. The account
//! host's first label is the storage account name.

use super::{parse_qualified_name, ResourceMapper, ServiceNaming};
use crate::config::Config;
use crate::error::{Result, TagsyncError};
use crate::model::{ServiceResource, SourceEntity};

pub const ENTITY_TYPE_ADLS_ACCOUNT: &str = "adls_gen2_account";
pub const ENTITY_TYPE_ADLS_CONTAINER: &str = "adls_gen2_container";
pub const ENTITY_TYPE_ADLS_DIRECTORY: &str = "adls_gen2_directory";

const ABFSS_PREFIX: &str = "abfss://";

#[derive(Default)]
pub struct AdlsResourceMapper {
    naming: ServiceNaming,
}

impl AdlsResourceMapper {
    pub fn new() -> Self {
        Self::default()
    }

    fn account_of(host: &str) -> &str {
        host.split('.').next().unwrap_or(host)
    }
}

impl ResourceMapper for AdlsResourceMapper {
    fn name(&self) -> &str {
        "adls"
    }

    fn initialize(&mut self, config: &Config) -> Result<()> {
        self.naming = ServiceNaming::from_config(config, "adls", "adls");
        Ok(())
    }

    fn supported_entity_types(&self) -> Vec<String> {
        vec![
            ENTITY_TYPE_ADLS_ACCOUNT.to_string(),
            ENTITY_TYPE_ADLS_CONTAINER.to_string(),
            ENTITY_TYPE_ADLS_DIRECTORY.to_string(),
        ]
    }

    fn build_resource(&self, entity: &SourceEntity) -> Result<ServiceResource> {
        let qualified = parse_qualified_name(entity)?;
        let service = self.naming.service_name(qualified.cluster);

        let rest = qualified.name.strip_prefix(ABFSS_PREFIX).ok_or_else(|| {
            TagsyncError::conversion(
                entity,
                format!("qualifiedName '{}' is not an abfss uri", qualified.name),
            )
        })?;

        match entity.type_name.as_str() {
            ENTITY_TYPE_ADLS_ACCOUNT => {
                let account = Self::account_of(rest);
                if account.is_empty() {
                    return Err(TagsyncError::conversion(entity, "empty account name"));
                }
                Ok(ServiceResource::new(&entity.guid, service)
                    .with_element("storageaccount", account))
            }
            ENTITY_TYPE_ADLS_CONTAINER | ENTITY_TYPE_ADLS_DIRECTORY => {
                let (container, host_and_path) = rest.split_once('@').ok_or_else(|| {
                    TagsyncError::conversion(entity, "abfss uri has no container@account part")
                })?;
                if container.is_empty() {
                    return Err(TagsyncError::conversion(entity, "empty container name"));
                }

                let (host, path) = match host_and_path.split_once('/') {
                    Some((host, path)) => (host, Some(path)),
                    None => (host_and_path, None),
                };

                let resource = ServiceResource::new(&entity.guid, service)
                    .with_element("storageaccount", Self::account_of(host))
                    .with_element("container", container);

                if entity.type_name == ENTITY_TYPE_ADLS_CONTAINER {
                    return Ok(resource);
                }

                let path = path.filter(|p| !p.is_empty()).ok_or_else(|| {
                    TagsyncError::conversion(entity, "abfss uri has no directory path")
                })?;
                Ok(resource.with_element("relativepath", format!("/{}", path)))
            }
            other => Err(TagsyncError::conversion(
                entity,
                format!("unsupported entity type: {}", other),
            )),
        }
    }
}
