use config::{Config, ConfigError, Environment as ConfigEnvironment, Map};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 未設定 `REDIS_HOST` 時使用的主機名
pub const DEFAULT_REDIS_HOST: &str = "redis";
/// 未設定 `REDIS_PORT` 時使用的端口
pub const DEFAULT_REDIS_PORT: u16 = 6379;

/// Redis 端點解析錯誤
#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("無法讀取Redis環境變數: {0}")]
    Source(#[from] ConfigError),

    #[error("無效的REDIS_PORT: {0}")]
    InvalidPort(String),
}

/// 唯讀環境變數來源
///
/// 預設讀取進程環境；測試時可以注入固定的鍵值對，無需修改全局環境。
#[derive(Debug, Clone)]
pub struct ProcessEnv {
    vars: Option<Map<String, String>>,
}

impl ProcessEnv {
    /// 使用進程環境變數
    pub fn system() -> Self {
        Self { vars: None }
    }

    /// 使用給定的鍵值對
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: Some(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    fn redis_source(&self) -> ConfigEnvironment {
        ConfigEnvironment::with_prefix("REDIS")
            .ignore_empty(true)
            .source(self.vars.clone())
    }
}

#[derive(Debug, Deserialize)]
struct RawEndpoint {
    host: String,
    port: String,
}

/// 已解析的 Redis 端點
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedisEndpoint {
    pub host: String,
    pub port: u16,
}

impl RedisEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// 從環境解析 `REDIS_HOST` / `REDIS_PORT`
    ///
    /// 空值與 `"0"` 視同未設定。
    pub fn resolve(env: &ProcessEnv) -> Result<Self, EndpointError> {
        let raw: RawEndpoint = Config::builder()
            .set_default("host", DEFAULT_REDIS_HOST)?
            .set_default("port", DEFAULT_REDIS_PORT.to_string())?
            .add_source(env.redis_source())
            .build()?
            .try_deserialize()?;

        let port = match raw.port.trim().parse::<u16>() {
            Ok(0) => DEFAULT_REDIS_PORT,
            Ok(port) => port,
            Err(_) => return Err(EndpointError::InvalidPort(raw.port)),
        };

        let host = raw.host.trim();
        let host = if host.is_empty() || host == "0" {
            DEFAULT_REDIS_HOST
        } else {
            host
        };

        Ok(Self::new(host, port))
    }

    /// 連接 URL，供 Redis 客戶端使用
    pub fn url(&self) -> String {
        format!("redis://{}:{}", self.host, self.port)
    }
}

impl Default for RedisEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_REDIS_HOST, DEFAULT_REDIS_PORT)
    }
}

impl fmt::Display for RedisEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
