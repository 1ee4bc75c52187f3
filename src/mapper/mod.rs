//! Resource mapper contract and factory
//!
//! This module provides:
//! - The `ResourceMapper` trait every source-system mapper implements
//! - The `MapperFactory` constructor table resolving mapper identifiers
//! - The built-in mappers for the supported source systems
//!
//! Mappers are independent and mutually unaware; a new source system is
//! supported by registering one more constructor in the factory, never by
//! modifying the registry.

use crate::config::Config;
use crate::error::{Result, TagsyncError};
use crate::model::{ServiceResource, SourceEntity};
use std::collections::HashMap;

mod adls;
mod hbase;
mod hdfs;
mod hive;
mod kafka;
mod ozone;

pub use adls::AdlsResourceMapper;
pub use hbase::HbaseResourceMapper;
pub use hdfs::HdfsResourceMapper;
pub use hive::HiveResourceMapper;
pub use kafka::KafkaResourceMapper;
pub use ozone::OzoneResourceMapper;

/// Built-in mapper identifiers, attempted by every bootstrap in this order
pub const BUILTIN_MAPPER_NAMES: &[&str] = &["hive", "hdfs", "hbase", "kafka", "ozone", "adls"];

/// One entity-to-resource translator for a family of entity types
///
/// Implementations must keep `supported_entity_types` stable for the lifetime
/// of the instance, and `build_resource` must be a pure transformation of the
/// entity (it may consult state set up during `initialize`).
pub trait ResourceMapper: Send + Sync {
    /// Identifier this mapper is registered under in the factory
    fn name(&self) -> &str;

    /// One-time setup from configuration; runs before any `build_resource`
    fn initialize(&mut self, config: &Config) -> Result<()>;

    /// Entity type identifiers this mapper converts; never empty
    fn supported_entity_types(&self) -> Vec<String>;

    /// Convert one entity into its normalized service resource
    fn build_resource(&self, entity: &SourceEntity) -> Result<ServiceResource>;
}

/// Constructs a fresh, uninitialized mapper instance
pub type MapperConstructor = fn() -> Box<dyn ResourceMapper>;

/// Identifier-to-constructor table, the pluggable resolution seam
///
/// Deployments extend the supported source systems by registering extra
/// constructors before bootstrap; the registry only ever resolves through
/// this table.
#[derive(Default)]
pub struct MapperFactory {
    constructors: HashMap<String, MapperConstructor>,
}

impl MapperFactory {
    /// Empty factory with no constructors
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory pre-seeded with all built-in mappers
    pub fn with_builtins() -> Self {
        let mut factory = Self::new();
        factory.register("hive", || Box::new(HiveResourceMapper::new()));
        factory.register("hdfs", || Box::new(HdfsResourceMapper::new()));
        factory.register("hbase", || Box::new(HbaseResourceMapper::new()));
        factory.register("kafka", || Box::new(KafkaResourceMapper::new()));
        factory.register("ozone", || Box::new(OzoneResourceMapper::new()));
        factory.register("adls", || Box::new(AdlsResourceMapper::new()));
        factory
    }

    /// Register a constructor under an identifier, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, constructor: MapperConstructor) {
        let name = name.into();
        if self.constructors.insert(name.clone(), constructor).is_some() {
            tracing::debug!("Replaced mapper constructor: {}", name);
        }
    }

    /// Resolve an identifier to a fresh mapper instance
    pub fn create(&self, name: &str) -> Result<Box<dyn ResourceMapper>> {
        let constructor =
            self.constructors
                .get(name)
                .ok_or_else(|| TagsyncError::UnknownMapper {
                    name: name.to_string(),
                })?;
        Ok(constructor())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }
}

/// Qualified name split into its name and cluster parts
///
/// Source systems qualify entity names as `<name>@<cluster>`; the cluster
/// part selects the target access-control service.
pub struct QualifiedName<'a> {
    pub name: &'a str,
    pub cluster: &'a str,
}

/// Parse an entity's `qualifiedName` attribute
///
/// Splits at the last `@` so names containing `@` still resolve the cluster.
pub fn parse_qualified_name(entity: &SourceEntity) -> Result<QualifiedName<'_>> {
    let qualified = entity
        .qualified_name()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| TagsyncError::conversion(entity, "missing qualifiedName attribute"))?;

    let (name, cluster) = qualified.rsplit_once('@').ok_or_else(|| {
        TagsyncError::conversion(
            entity,
            format!("qualifiedName '{}' has no @cluster suffix", qualified),
        )
    })?;

    if name.is_empty() || cluster.is_empty() {
        return Err(TagsyncError::conversion(
            entity,
            format!("qualifiedName '{}' is incomplete", qualified),
        ));
    }

    Ok(QualifiedName { name, cluster })
}

/// Service-name derivation rule, resolved once during `initialize`
///
/// Derived names are `<prefix><cluster><suffix>`. The suffix defaults to
/// `_<source>` (e.g. "cl1_hive") and the prefix to the sync-level
/// `service_name_prefix`; a mapper's `service_name_prefix` and
/// `service_name_suffix` settings override both, and its `service_name`
/// setting replaces the derived name entirely.
#[derive(Debug, Clone, Default)]
pub struct ServiceNaming {
    prefix: String,
    suffix: String,
    override_name: Option<String>,
}

impl ServiceNaming {
    pub fn from_config(config: &Config, mapper: &str, source: &str) -> Self {
        let prefix = config
            .mapper_setting(mapper, "service_name_prefix")
            .unwrap_or(&config.sync.service_name_prefix)
            .to_string();
        let suffix = config
            .mapper_setting(mapper, "service_name_suffix")
            .map(str::to_string)
            .unwrap_or_else(|| format!("_{}", source));
        let override_name = config
            .mapper_setting(mapper, "service_name")
            .map(str::to_string);

        Self {
            prefix,
            suffix,
            override_name,
        }
    }

    /// The access-control service name for a cluster
    pub fn service_name(&self, cluster: &str) -> String {
        match &self.override_name {
            Some(name) => name.clone(),
            None => format!("{}{}{}", self.prefix, cluster, self.suffix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_unknown_mapper() {
        let factory = MapperFactory::new();
        assert!(matches!(
            factory.create("nope"),
            Err(TagsyncError::UnknownMapper { .. })
        ));
    }

    #[test]
    fn test_factory_builtins_resolve() {
        let factory = MapperFactory::with_builtins();
        for name in BUILTIN_MAPPER_NAMES {
            assert!(factory.contains(name), "missing builtin: {}", name);
            let mapper = factory.create(name).unwrap();
            assert_eq!(mapper.name(), *name);
        }
    }

    #[test]
    fn test_parse_qualified_name() {
        let entity = SourceEntity::new("e-1", "hive_table")
            .with_attribute("qualifiedName", "sales.orders@cl1");
        let qn = parse_qualified_name(&entity).unwrap();
        assert_eq!(qn.name, "sales.orders");
        assert_eq!(qn.cluster, "cl1");
    }

    #[test]
    fn test_parse_qualified_name_splits_at_last_at() {
        let entity = SourceEntity::new("e-1", "hdfs_path")
            .with_attribute("qualifiedName", "/data/a@b/file@prod");
        let qn = parse_qualified_name(&entity).unwrap();
        assert_eq!(qn.name, "/data/a@b/file");
        assert_eq!(qn.cluster, "prod");
    }

    #[test]
    fn test_parse_qualified_name_errors() {
        let missing = SourceEntity::new("e-1", "hive_table");
        assert!(parse_qualified_name(&missing).is_err());

        let no_cluster =
            SourceEntity::new("e-2", "hive_table").with_attribute("qualifiedName", "sales.orders");
        assert!(parse_qualified_name(&no_cluster).is_err());

        let empty_name =
            SourceEntity::new("e-3", "hive_table").with_attribute("qualifiedName", "@cl1");
        assert!(parse_qualified_name(&empty_name).is_err());
    }

    #[test]
    fn test_service_naming_defaults() {
        let naming = ServiceNaming::from_config(&Config::default(), "hive", "hive");
        assert_eq!(naming.service_name("cl1"), "cl1_hive");
    }

    #[test]
    fn test_service_naming_sync_prefix() {
        let mut config = Config::default();
        config.sync.service_name_prefix = "acl_".to_string();

        let naming = ServiceNaming::from_config(&config, "hive", "hive");
        assert_eq!(naming.service_name("cl1"), "acl_cl1_hive");
    }

    #[test]
    fn test_service_naming_mapper_settings_override_sync() {
        let mut config = Config::default();
        config.sync.service_name_prefix = "acl_".to_string();
        config.mappers.insert(
            "hive".to_string(),
            HashMap::from([
                ("service_name_prefix".to_string(), "dev_".to_string()),
                ("service_name_suffix".to_string(), "-warehouse".to_string()),
            ]),
        );

        let naming = ServiceNaming::from_config(&config, "hive", "hive");
        assert_eq!(naming.service_name("cl1"), "dev_cl1-warehouse");
    }

    #[test]
    fn test_service_naming_whole_name_override_wins() {
        let mut config = Config::default();
        config.mappers.insert(
            "hive".to_string(),
            HashMap::from([
                ("service_name".to_string(), "prod_hive_main".to_string()),
                ("service_name_prefix".to_string(), "dev_".to_string()),
            ]),
        );

        let naming = ServiceNaming::from_config(&config, "hive", "hive");
        assert_eq!(naming.service_name("cl1"), "prod_hive_main");
    }
}
