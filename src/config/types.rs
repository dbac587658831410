use crate::config::validation::{ValidationError, ValidationUtils, Validator};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 應用程序配置結構
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub log: LogConfig,
    pub selector: SelectorConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證各個部分的配置
        self.log.validate()?;
        self.selector.validate()?;

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證日誌級別
        ValidationUtils::one_of(
            &self.level.to_lowercase(),
            &["trace", "debug", "info", "warn", "error"],
            "log.level",
        )?;

        // 驗證日誌格式
        ValidationUtils::one_of(&self.format.to_lowercase(), &["pretty", "json"], "log.format")?;

        Ok(())
    }
}

/// 連線探測方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMode {
    /// 僅建立 TCP 連線
    #[default]
    Tcp,
    /// 建立 Redis 連線並發送 PING
    Ping,
}

/// 快取後端選擇配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// 應用根目錄，模組路徑相對於此目錄解析
    pub app_root: String,
    /// Redis 整合模組目錄（相對於 app_root）
    pub module_dir: String,
    /// 探測超時（秒）
    pub probe_timeout_secs: u64,
    pub probe_mode: ProbeMode,
    /// 宿主框架使用的 Redis 客戶端介面名稱
    pub connection_interface: String,
    pub persistent: bool,
    /// 多站點部署時的快取鍵前綴
    pub cache_prefix: Option<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            app_root: ".".to_string(),
            module_dir: "modules/contrib/redis".to_string(),
            probe_timeout_secs: 2,
            probe_mode: ProbeMode::Tcp,
            connection_interface: "PhpRedis".to_string(),
            persistent: true,
            cache_prefix: None,
        }
    }
}

impl SelectorConfig {
    /// 獲取探測超時持續時間
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl Validator for SelectorConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.app_root, "selector.app_root")?;
        ValidationUtils::not_empty(&self.module_dir, "selector.module_dir")?;
        ValidationUtils::relative_path(&self.module_dir, "selector.module_dir")?;
        ValidationUtils::in_range(self.probe_timeout_secs, 1, 30, "selector.probe_timeout_secs")?;
        ValidationUtils::not_empty(&self.connection_interface, "selector.connection_interface")?;

        if let Some(prefix) = &self.cache_prefix {
            ValidationUtils::not_empty(prefix, "selector.cache_prefix")?;
        }

        Ok(())
    }
}
