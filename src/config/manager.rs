use crate::config::loader::{ConfigLoader, Environment};
use crate::config::types::ApplicationConfig;
use crate::config::validation::Validator;
use config::ConfigError;
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

// 全局配置實例
static CONFIG: OnceCell<ApplicationConfig> = OnceCell::new();
// 加載失敗的原因，日誌系統就緒後再輸出
static LOAD_ERROR: OnceCell<String> = OnceCell::new();

/// 獲取應用程序配置實例
///
/// 尚未初始化或加載失敗時使用預設配置。
pub fn get_config() -> &'static ApplicationConfig {
    CONFIG.get_or_init(ApplicationConfig::load_or_default)
}

/// 初始化配置（在應用程序啟動時調用）
///
/// 配置無效時退回預設值，不中止啟動。
pub fn init_config() -> &'static ApplicationConfig {
    let app_config = ApplicationConfig::load_or_default();

    // 嘗試初始化全局配置
    if CONFIG.set(app_config).is_err() {
        warn!("配置已經被初始化，跳過重複初始化");
    } else {
        debug!("配置初始化成功，環境：{:?}", Environment::from_env());
    }

    get_config()
}

/// 配置加載失敗的原因（若曾退回預設值）
pub fn config_load_error() -> Option<&'static str> {
    LOAD_ERROR.get().map(String::as_str)
}

/// ApplicationConfig 加載方法實現
impl ApplicationConfig {
    /// 加載配置，失敗時使用預設值
    pub fn load_or_default() -> Self {
        Self::load_from_env().unwrap_or_else(|err| {
            warn!("無法加載應用程序配置，使用預設值: {}", err);
            let _ = LOAD_ERROR.set(err.to_string());
            Self::default()
        })
    }

    /// 從環境變數指定的環境加載配置
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        debug!("從環境加載配置: {:?}", env);
        Self::load(env)
    }

    /// 從指定環境加載配置
    pub fn load(env: Environment) -> Result<Self, ConfigError> {
        let config_source = ConfigLoader::load(env)?;

        // 使用 serde 反序列化配置
        let app_config: ApplicationConfig = config_source.try_deserialize()?;

        // 驗證失敗不阻止啟動，只記錄警告
        if let Err(err) = app_config.validate() {
            warn!("配置驗證失敗: {}", err);
        } else {
            debug!("配置驗證通過");
        }

        Ok(app_config)
    }
}
