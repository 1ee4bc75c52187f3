//! End-to-end tests for mapper registry bootstrap and dispatch

use tagsync::config::Config;
use tagsync::error::Result;
use tagsync::mapper::{MapperFactory, ResourceMapper};
use tagsync::model::{ServiceResource, SourceEntity};
use tagsync::registry::MapperRegistry;

/// Extension mapper claiming a type already served by the builtin hive mapper
struct ShadowHiveMapper;

fn shadow_hive_mapper() -> Box<dyn ResourceMapper> {
    Box::new(ShadowHiveMapper)
}

impl ResourceMapper for ShadowHiveMapper {
    fn name(&self) -> &str {
        "shadow_hive"
    }

    fn initialize(&mut self, _config: &Config) -> Result<()> {
        Ok(())
    }

    fn supported_entity_types(&self) -> Vec<String> {
        vec!["hive_table".to_string()]
    }

    fn build_resource(&self, entity: &SourceEntity) -> Result<ServiceResource> {
        Ok(ServiceResource::new(&entity.guid, "shadow_service"))
    }
}

fn config_with_customs(customs: &str) -> Config {
    let mut config = Config::default();
    config.sync.custom_mappers = customs.to_string();
    config
}

#[test]
fn builtin_hive_entity_maps_end_to_end() {
    let factory = MapperFactory::with_builtins();
    let registry = MapperRegistry::bootstrap(&factory, &Config::default());

    assert!(registry.is_complete());
    assert!(registry.is_entity_type_handled("hive_table"));

    let entity = SourceEntity::new("e1", "hive_table")
        .with_attribute("qualifiedName", "sales.orders@cl1");
    let resource = registry.build_resource(&entity).unwrap();

    assert_eq!(resource.guid, "e1");
    assert_eq!(resource.service_name, "cl1_hive");
    assert_eq!(
        resource.resource_elements.get("table"),
        Some(&vec!["orders".to_string()])
    );

    let unknown = SourceEntity::new("e2", "unknown_type");
    assert!(registry.build_resource(&unknown).is_none());
    assert!(!registry.is_entity_type_handled("unknown_type"));
}

#[test]
fn every_supported_type_is_handled_after_bootstrap() {
    let factory = MapperFactory::with_builtins();

    let mut expected_types = Vec::new();
    for name in tagsync::mapper::BUILTIN_MAPPER_NAMES {
        expected_types.extend(factory.create(name).unwrap().supported_entity_types());
    }

    let registry = MapperRegistry::bootstrap(&factory, &Config::default());
    for entity_type in expected_types {
        assert!(
            registry.is_entity_type_handled(&entity_type),
            "not handled: {}",
            entity_type
        );
    }
}

#[test]
fn broken_extension_mapper_leaves_others_usable() {
    let factory = MapperFactory::with_builtins();
    let registry = MapperRegistry::bootstrap(&factory, &config_with_customs("BrokenMapper"));

    assert!(!registry.is_complete());

    // Builtins remain registered and functional
    let entity = SourceEntity::new("e1", "kafka_topic")
        .with_attribute("qualifiedName", "clickstream@cl1");
    let resource = registry.build_resource(&entity).unwrap();
    assert_eq!(resource.service_name, "cl1_kafka");
}

#[test]
fn later_registration_shadows_builtin_for_shared_type() {
    let mut factory = MapperFactory::with_builtins();
    factory.register("shadow_hive", shadow_hive_mapper);

    let registry = MapperRegistry::bootstrap(&factory, &config_with_customs("shadow_hive"));
    assert!(registry.is_complete());

    // Extension bootstrapped after the builtins, so it wins hive_table...
    let table = SourceEntity::new("e1", "hive_table")
        .with_attribute("qualifiedName", "sales.orders@cl1");
    let resource = registry.build_resource(&table).unwrap();
    assert_eq!(resource.service_name, "shadow_service");

    // ...while the builtin keeps its other types
    let db = SourceEntity::new("e2", "hive_db").with_attribute("qualifiedName", "sales@cl1");
    let resource = registry.build_resource(&db).unwrap();
    assert_eq!(resource.service_name, "cl1_hive");
}

#[test]
fn malformed_entity_does_not_poison_the_batch() {
    let factory = MapperFactory::with_builtins();
    let registry = MapperRegistry::bootstrap(&factory, &Config::default());

    let batch = vec![
        SourceEntity::new("bad-1", "hive_table"), // no qualifiedName
        SourceEntity::new("good-1", "hive_table")
            .with_attribute("qualifiedName", "sales.orders@cl1"),
        SourceEntity::new("bad-2", "hdfs_path").with_attribute("qualifiedName", "no-cluster-part"),
        SourceEntity::new("good-2", "hdfs_path").with_attribute("qualifiedName", "/data@cl1"),
    ];

    let resources: Vec<_> = batch
        .iter()
        .filter_map(|e| registry.build_resource(e))
        .collect();

    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].guid, "good-1");
    assert_eq!(resources[1].guid, "good-2");
}

#[test]
fn blank_extension_list_attempts_builtins_only() {
    let factory = MapperFactory::with_builtins();

    let for_blank = MapperRegistry::bootstrap(&factory, &config_with_customs("   "));
    let for_default = MapperRegistry::bootstrap(&factory, &Config::default());

    assert!(for_blank.is_complete());
    assert_eq!(
        for_blank.handled_entity_types(),
        for_default.handled_entity_types()
    );
}

#[test]
fn registry_is_shareable_across_threads() {
    let factory = MapperFactory::with_builtins();
    let registry = std::sync::Arc::new(MapperRegistry::bootstrap(&factory, &Config::default()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = registry.clone();
            std::thread::spawn(move || {
                let entity = SourceEntity::new(format!("e-{}", i), "kafka_topic")
                    .with_attribute("qualifiedName", format!("topic-{}@cl1", i));
                registry.build_resource(&entity).unwrap()
            })
        })
        .collect();

    for handle in handles {
        let resource = handle.join().unwrap();
        assert_eq!(resource.service_name, "cl1_kafka");
    }
}
