//! Kafka topic mapper

use super::{parse_qualified_name, ResourceMapper, ServiceNaming};
use crate::config::Config;
use crate::error::{Result, TagsyncError};
use crate::model::{ServiceResource, SourceEntity};

pub const ENTITY_TYPE_KAFKA_TOPIC: &str = "kafka_topic";

#[derive(Default)]
pub struct KafkaResourceMapper {
    naming: ServiceNaming,
}

impl KafkaResourceMapper {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResourceMapper for KafkaResourceMapper {
    fn name(&self) -> &str {
        "kafka"
    }

    fn initialize(&mut self, config: &Config) -> Result<()> {
        self.naming = ServiceNaming::from_config(config, "kafka", "kafka");
        Ok(())
    }

    fn supported_entity_types(&self) -> Vec<String> {
        vec![ENTITY_TYPE_KAFKA_TOPIC.to_string()]
    }

    fn build_resource(&self, entity: &SourceEntity) -> Result<ServiceResource> {
        if entity.type_name != ENTITY_TYPE_KAFKA_TOPIC {
            return Err(TagsyncError::conversion(
                entity,
                format!("unsupported entity type: {}", entity.type_name),
            ));
        }

        let qualified = parse_qualified_name(entity)?;
        let service = self.naming.service_name(qualified.cluster);

        Ok(ServiceResource::new(&entity.guid, service).with_element("topic", qualified.name))
    }
}
