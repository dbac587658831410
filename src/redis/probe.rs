use super::endpoint::RedisEndpoint;
use crate::config::types::ProbeMode;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// 連線探測錯誤
#[derive(Error, Debug)]
pub enum ProbeError {
    /// 探測超時
    #[error("Redis連接超時 ({endpoint}, {timeout:?})")]
    Timeout { endpoint: String, timeout: Duration },

    /// 無法建立連接
    #[error("無法連接到Redis ({endpoint}): {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// PING 回應不是 PONG
    #[error("Redis回應異常: {0}")]
    UnexpectedReply(String),

    /// Redis客戶端錯誤
    #[error("Redis錯誤: {0}")]
    Client(String),
}

/// 連線探測接口
///
/// 探測只回答「此刻能否連上」，連接在返回前必須關閉，不會被重用。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Probe: Send + Sync {
    /// 在超時內嘗試連接端點
    async fn probe(&self, endpoint: &RedisEndpoint, timeout: Duration) -> Result<(), ProbeError>;
}

/// Box<dyn Probe> 也實現 Probe trait，便於依配置選擇探測方式
#[async_trait]
impl<P: Probe + ?Sized> Probe for Box<P> {
    async fn probe(&self, endpoint: &RedisEndpoint, timeout: Duration) -> Result<(), ProbeError> {
        (**self).probe(endpoint, timeout).await
    }
}

/// Arc<P> 也實現 Probe trait，便於共享探測器
#[async_trait]
impl<P: Probe + ?Sized> Probe for Arc<P> {
    async fn probe(&self, endpoint: &RedisEndpoint, timeout: Duration) -> Result<(), ProbeError> {
        (**self).probe(endpoint, timeout).await
    }
}

/// TCP 連線探測
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProbe;

#[async_trait]
impl Probe for TcpProbe {
    async fn probe(&self, endpoint: &RedisEndpoint, limit: Duration) -> Result<(), ProbeError> {
        let connect = TcpStream::connect((endpoint.host.as_str(), endpoint.port));

        match timeout(limit, connect).await {
            Ok(Ok(mut stream)) => {
                debug!("成功連接到Redis: {}", endpoint);
                // 關閉失敗不影響探測結果
                let _ = stream.shutdown().await;
                Ok(())
            }
            Ok(Err(err)) => Err(ProbeError::Connect {
                endpoint: endpoint.to_string(),
                source: err,
            }),
            Err(_) => Err(ProbeError::Timeout {
                endpoint: endpoint.to_string(),
                timeout: limit,
            }),
        }
    }
}

/// Redis PING 探測
#[cfg(feature = "redis-client")]
#[derive(Debug, Clone, Copy, Default)]
pub struct PingProbe;

#[cfg(feature = "redis-client")]
#[async_trait]
impl Probe for PingProbe {
    async fn probe(&self, endpoint: &RedisEndpoint, limit: Duration) -> Result<(), ProbeError> {
        let client = redis::Client::open(endpoint.url()).map_err(|e| ProbeError::Client(e.to_string()))?;

        let ping = async {
            let mut conn = client.get_multiplexed_async_connection().await?;
            // 使用 cmd 直接執行 PING 指令
            let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok::<_, redis::RedisError>(pong)
        };

        match timeout(limit, ping).await {
            Ok(Ok(pong)) if pong == "PONG" => {
                debug!("Redis PING成功: {}", endpoint);
                Ok(())
            }
            Ok(Ok(reply)) => Err(ProbeError::UnexpectedReply(reply)),
            Ok(Err(err)) => Err(ProbeError::Client(err.to_string())),
            Err(_) => Err(ProbeError::Timeout {
                endpoint: endpoint.to_string(),
                timeout: limit,
            }),
        }
    }
}

/// 依配置建立探測器
///
/// 未編譯 Redis 客戶端時，PING 模式退回 TCP 探測。
pub fn probe_for(mode: ProbeMode) -> Box<dyn Probe> {
    match mode {
        ProbeMode::Tcp => Box::new(TcpProbe),
        #[cfg(feature = "redis-client")]
        ProbeMode::Ping => Box::new(PingProbe),
        #[cfg(not(feature = "redis-client"))]
        ProbeMode::Ping => {
            tracing::warn!("未編譯Redis客戶端，PING探測改用TCP探測");
            Box::new(TcpProbe)
        }
    }
}
