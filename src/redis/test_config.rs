//! 集中化的 Redis 測試配置
//!
//! 提供一致的測試環境配置，支援不同部署環境（本地開發、Docker 容器）

use crate::redis::endpoint::RedisEndpoint;
use crate::redis::probe::{PingProbe, Probe};
use std::time::Duration;

/// Redis 測試配置建構器
pub struct RedisTestConfig;

impl RedisTestConfig {
    /// 獲取測試用 Redis 端點
    ///
    /// 優先級：
    /// 1. REDIS_TEST_HOST / REDIS_TEST_PORT 環境變數
    /// 2. 檢測 Docker 環境使用 redis:6379
    /// 3. 預設 localhost:6379
    pub fn get_test_endpoint() -> RedisEndpoint {
        let port = std::env::var("REDIS_TEST_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(6379);

        if let Ok(host) = std::env::var("REDIS_TEST_HOST") {
            return RedisEndpoint::new(host, port);
        }

        if Self::is_docker_environment() {
            RedisEndpoint::new("redis", port)
        } else {
            RedisEndpoint::new("localhost", port)
        }
    }

    /// 檢測是否在 Docker 環境中執行
    fn is_docker_environment() -> bool {
        std::env::var("DOCKER_CONTAINER").is_ok() || std::path::Path::new("/.dockerenv").exists()
    }

    /// 檢查 Redis 是否可用於測試
    pub async fn is_redis_available() -> bool {
        PingProbe
            .probe(&Self::get_test_endpoint(), Duration::from_secs(1))
            .await
            .is_ok()
    }

    /// Redis 不可用時跳過測試
    ///
    /// 可用時返回 Some(端點)，否則印出提示並返回 None。
    pub async fn skip_if_redis_unavailable(test_name: &str) -> Option<RedisEndpoint> {
        if Self::is_redis_available().await {
            Some(Self::get_test_endpoint())
        } else {
            eprintln!("跳過 Redis 測試 '{}' - Redis 環境不可用", test_name);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_get_test_endpoint_with_env_var() {
        std::env::set_var("REDIS_TEST_HOST", "custom");
        std::env::set_var("REDIS_TEST_PORT", "1234");

        let endpoint = RedisTestConfig::get_test_endpoint();
        assert_eq!(endpoint, RedisEndpoint::new("custom", 1234));

        // 清理
        std::env::remove_var("REDIS_TEST_HOST");
        std::env::remove_var("REDIS_TEST_PORT");
    }

    #[tokio::test]
    async fn test_ping_probe_live() {
        let Some(endpoint) = RedisTestConfig::skip_if_redis_unavailable("test_ping_probe_live").await
        else {
            return;
        };

        assert!(PingProbe.probe(&endpoint, Duration::from_secs(2)).await.is_ok());
    }

    #[tokio::test]
    async fn test_ping_probe_against_silent_listener_times_out() {
        // 接受連接但不回應的監聽者，PING 必須在超時內失敗
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let accept = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(3)).await;
            drop(socket);
        });

        let result = PingProbe
            .probe(&RedisEndpoint::new("127.0.0.1", port), Duration::from_millis(300))
            .await;
        assert!(result.is_err());
        accept.abort();
    }
}
