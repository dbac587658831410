//! 宿主框架設定映射
//!
//! 將選擇結果轉成宿主在啟動時讀取的設定：連接區塊、快取分區、調校參數、
//! 額外的服務描述檔以及啟動容器定義。

pub mod container;

pub use container::{ContainerDefinition, ServiceDefinition};

use crate::cache::{CacheBin, TuningParameters};
use crate::config::types::SelectorConfig;
use crate::redis::RedisEndpoint;
use crate::selector::capability::{descriptor_path, EXAMPLE_SERVICES_FILE, MODULE_SERVICES_FILE};
use crate::selector::{Capabilities, Selection};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// 設定輸出錯誤
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("JSON序列化錯誤: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML序列化錯誤: {0}")]
    Yaml(#[from] serde_yaml_bw::Error),
}

/// 輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Redis 連接設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedisConnectionSettings {
    pub interface: String,
    pub host: String,
    pub port: u16,
    pub persistent: bool,
}

/// 快取後端設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheSettings {
    /// 後端服務 ID
    pub default: String,
    pub bins: BTreeMap<CacheBin, String>,
}

/// 快取鍵前綴
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachePrefix {
    pub default: String,
}

/// Redis 模組讀取的調校鍵
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TuningSettings {
    pub redis_compress_length: u32,
    pub redis_compress_level: u8,
    pub redis_ttl_offset: u32,
    pub redis_invalidate_all_as_delete: bool,
}

impl From<TuningParameters> for TuningSettings {
    fn from(tuning: TuningParameters) -> Self {
        Self {
            redis_compress_length: tuning.compression_threshold,
            redis_compress_level: tuning.compression_level,
            redis_ttl_offset: tuning.ttl_offset_secs,
            redis_invalidate_all_as_delete: tuning.invalidate_all_as_delete,
        }
    }
}

/// 宿主設定映射
///
/// 未設定的鍵不輸出，宿主保留自己的預設值。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteSettings {
    #[serde(rename = "redis.connection", skip_serializing_if = "Option::is_none")]
    pub redis_connection: Option<RedisConnectionSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_prefix: Option<CachePrefix>,
    #[serde(flatten)]
    pub tuning: Option<TuningSettings>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub container_yamls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap_container_definition: Option<ContainerDefinition>,
}

impl SiteSettings {
    /// 根據選擇結果建立設定
    pub fn build(selection: &Selection, capabilities: &Capabilities, config: &SelectorConfig) -> Self {
        let mut settings = SiteSettings {
            cache_prefix: config.cache_prefix.clone().map(|default| CachePrefix { default }),
            ..SiteSettings::default()
        };

        let endpoint = match (&selection.endpoint, selection.probe_succeeded()) {
            (Some(endpoint), true) => endpoint,
            _ => return settings,
        };

        settings.redis_connection = Some(connection_settings(endpoint, config));
        settings.tuning = Some(selection.tuning.into());

        if selection.is_selected() {
            settings.cache = Some(cache_settings(selection));
        }

        if capabilities.module_services {
            settings
                .container_yamls
                .push(descriptor_path(&config.module_dir, MODULE_SERVICES_FILE));
        }
        if capabilities.example_services {
            settings
                .container_yamls
                .push(descriptor_path(&config.module_dir, EXAMPLE_SERVICES_FILE));
        }

        if capabilities.module_source {
            settings.bootstrap_container_definition = Some(ContainerDefinition::redis_bootstrap());
        }

        settings
    }

    /// 是否沒有任何設定
    pub fn is_empty(&self) -> bool {
        *self == SiteSettings::default()
    }

    /// 以指定格式輸出
    pub fn render(&self, format: OutputFormat) -> Result<String, SettingsError> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Yaml => Ok(serde_yaml_bw::to_string(self)?),
        }
    }
}

fn connection_settings(endpoint: &RedisEndpoint, config: &SelectorConfig) -> RedisConnectionSettings {
    RedisConnectionSettings {
        interface: config.connection_interface.clone(),
        host: endpoint.host.clone(),
        port: endpoint.port,
        persistent: config.persistent,
    }
}

/// default 分區寫入 `cache.default`，其他分區寫入 `cache.bins`
fn cache_settings(selection: &Selection) -> CacheSettings {
    CacheSettings {
        default: selection
            .registry
            .backend_for(CacheBin::Default)
            .service_id()
            .to_string(),
        bins: selection
            .registry
            .iter()
            .filter(|(bin, _)| *bin != CacheBin::Default)
            .map(|(bin, backend)| (bin, backend.service_id().to_string()))
            .collect(),
    }
}
