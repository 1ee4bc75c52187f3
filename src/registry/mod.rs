//! Mapper registry: bootstrap, lookup, and dispatch
//!
//! The registry owns one initialized mapper instance per supported entity
//! type and routes each incoming entity to its mapper. Bootstrap runs once
//! at startup; afterwards the registry is read-only and safe to share across
//! worker threads. A defect in one mapper, or one malformed entity, never
//! aborts processing of the surrounding batch.

use crate::config::Config;
use crate::mapper::{MapperFactory, ResourceMapper, BUILTIN_MAPPER_NAMES};
use crate::model::{ServiceResource, SourceEntity};
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only entity-type to mapper lookup table
///
/// Constructed exactly once via [`MapperRegistry::bootstrap`]; there is no
/// re-registration API, so the populated-then-read-only lifecycle is enforced
/// by construction.
pub struct MapperRegistry {
    mappers: HashMap<String, Arc<dyn ResourceMapper>>,
    complete: bool,
}

impl MapperRegistry {
    /// Construct and populate the registry
    ///
    /// Attempts every built-in mapper plus the extension identifiers from
    /// `config.sync.custom_mappers`, in list order. Each identifier is
    /// resolved through the factory, initialized, then registered under every
    /// entity type it reports. A failing identifier is logged and skipped;
    /// the remaining identifiers still bootstrap, and [`is_complete`] reports
    /// whether any were skipped.
    ///
    /// [`is_complete`]: MapperRegistry::is_complete
    pub fn bootstrap(factory: &MapperFactory, config: &Config) -> Self {
        let mut names: Vec<String> = BUILTIN_MAPPER_NAMES
            .iter()
            .map(|s| s.to_string())
            .collect();
        names.extend(config.custom_mapper_names());

        tracing::debug!("Bootstrapping mapper registry: {:?}", names);

        let mut mappers: HashMap<String, Arc<dyn ResourceMapper>> = HashMap::new();
        let mut complete = true;

        for name in &names {
            match Self::bootstrap_one(factory, config, name) {
                Ok((mapper, entity_types)) => {
                    for entity_type in entity_types {
                        if let Some(previous) = mappers.insert(entity_type.clone(), mapper.clone())
                        {
                            // Last registration wins, as configured order dictates
                            tracing::warn!(
                                "Entity type {} remapped from {} to {}",
                                entity_type,
                                previous.name(),
                                mapper.name()
                            );
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to bootstrap mapper {}: {}", name, e);
                    complete = false;
                }
            }
        }

        tracing::debug!(
            "Mapper registry bootstrapped: {} entity types, complete={}",
            mappers.len(),
            complete
        );

        Self { mappers, complete }
    }

    fn bootstrap_one(
        factory: &MapperFactory,
        config: &Config,
        name: &str,
    ) -> crate::Result<(Arc<dyn ResourceMapper>, Vec<String>)> {
        let mut mapper = factory.create(name)?;
        mapper.initialize(config)?;
        let entity_types = mapper.supported_entity_types();
        Ok((Arc::from(mapper), entity_types))
    }

    /// Whether every attempted mapper bootstrapped without error
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether a mapper is registered for the given entity type
    pub fn is_entity_type_handled(&self, entity_type: &str) -> bool {
        self.mappers.contains_key(entity_type)
    }

    /// Entity types with a registered mapper, sorted
    pub fn handled_entity_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.mappers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Route one entity to its mapper and return the built resource
    ///
    /// Returns `None` when no mapper is registered for the entity's type
    /// (a silent no-op) or when the mapper fails on this entity (logged,
    /// contained at this boundary, never propagated to the caller).
    pub fn build_resource(&self, entity: &SourceEntity) -> Option<ServiceResource> {
        let mapper = self.mappers.get(&entity.type_name)?;

        match mapper.build_resource(entity) {
            Ok(resource) => Some(resource),
            Err(e) => {
                tracing::error!("Could not build resource for entity {}: {}", entity.guid, e);
                None
            }
        }
    }
}
