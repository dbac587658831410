use serde::Serialize;
use std::collections::BTreeMap;

/// 容器服務定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDefinition {
    pub class: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory: Option<[String; 2]>,
}

impl ServiceDefinition {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            arguments: Vec::new(),
            factory: None,
        }
    }

    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_factory(mut self, service: impl Into<String>, method: impl Into<String>) -> Self {
        self.factory = Some([service.into(), method.into()]);
        self
    }
}

/// 啟動容器定義
///
/// 宿主在主容器建立前使用此定義，讓容器本身的快取也存放在 Redis。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerDefinition {
    pub parameters: BTreeMap<String, String>,
    pub services: BTreeMap<String, ServiceDefinition>,
}

impl ContainerDefinition {
    /// Redis 整合模組的啟動容器
    pub fn redis_bootstrap() -> Self {
        let services = [
            (
                "redis.factory",
                ServiceDefinition::new("Drupal\\redis\\ClientFactory"),
            ),
            (
                "cache.backend.redis",
                ServiceDefinition::new("Drupal\\redis\\Cache\\CacheBackendFactory").with_arguments([
                    "@redis.factory",
                    "@cache_tags_provider.container",
                    "@serialization.phpserialize",
                ]),
            ),
            (
                "cache.container",
                ServiceDefinition::new("\\Drupal\\redis\\Cache\\PhpRedis")
                    .with_factory("@cache.backend.redis", "get")
                    .with_arguments(["container"]),
            ),
            (
                "cache_tags_provider.container",
                ServiceDefinition::new("Drupal\\redis\\Cache\\RedisCacheTagsChecksum")
                    .with_arguments(["@redis.factory"]),
            ),
            (
                "serialization.phpserialize",
                ServiceDefinition::new("Drupal\\Component\\Serialization\\PhpSerialize"),
            ),
        ];

        Self {
            parameters: BTreeMap::new(),
            services: services
                .into_iter()
                .map(|(id, service)| (id.to_string(), service))
                .collect(),
        }
    }
}
