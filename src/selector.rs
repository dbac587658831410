//! 快取後端選擇模組
//!
//! 在啟動時執行一次：探測 Redis，決定每個快取分區的後端與調校參數。
//! 任何失敗都退回資料庫後端，不會阻止宿主啟動。

pub mod capability;
pub mod outcome;

pub use capability::Capabilities;
pub use outcome::{DegradeReason, Selection, SelectionOutcome};

use crate::cache::{BackendRegistry, TuningParameters};
use crate::config::types::SelectorConfig;
use crate::redis::{probe_for, ProcessEnv, Probe, RedisEndpoint};
use std::time::Duration;
use tracing::{debug, info, warn};

/// 預設探測超時
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// 快取後端選擇器
pub struct BackendSelector<P: Probe = Box<dyn Probe>> {
    probe: P,
    timeout: Duration,
}

impl BackendSelector<Box<dyn Probe>> {
    /// 依配置建立選擇器
    pub fn from_config(config: &SelectorConfig) -> Self {
        Self::with_timeout(probe_for(config.probe_mode), config.probe_timeout())
    }
}

impl<P: Probe> BackendSelector<P> {
    pub fn new(probe: P) -> Self {
        Self::with_timeout(probe, DEFAULT_PROBE_TIMEOUT)
    }

    pub fn with_timeout(probe: P, timeout: Duration) -> Self {
        Self { probe, timeout }
    }

    /// 選擇快取後端
    ///
    /// 不重試，也不返回錯誤；失敗原因記錄在 `Selection::outcome`。
    pub async fn select(&self, env: &ProcessEnv, capabilities: &Capabilities) -> Selection {
        if !capabilities.redis_client {
            debug!("Redis客戶端不可用，使用資料庫快取後端");
            return Selection::database_only(None, DegradeReason::ClientUnavailable);
        }

        let endpoint = match RedisEndpoint::resolve(env) {
            Ok(endpoint) => endpoint,
            Err(err) => {
                warn!("Redis配置無效，使用資料庫快取後端: {}", err);
                return Selection::database_only(None, DegradeReason::Misconfigured(err.to_string()));
            }
        };

        if let Err(err) = self.probe.probe(&endpoint, self.timeout).await {
            warn!("Redis連接失敗: {}", err);
            let reason = DegradeReason::Unreachable {
                endpoint: endpoint.to_string(),
                reason: err.to_string(),
            };
            return Selection::database_only(Some(endpoint), reason);
        }

        if !capabilities.module_services {
            info!("Redis可連接 ({})，但整合模組不存在，快取分區維持資料庫後端", endpoint);
            return Selection {
                registry: BackendRegistry::all_database(),
                tuning: TuningParameters::redis_optimized(),
                outcome: SelectionOutcome::Degraded(DegradeReason::ModuleMissing),
                endpoint: Some(endpoint),
            };
        }

        info!("使用Redis快取後端: {}", endpoint);
        Selection {
            registry: BackendRegistry::redis_preferred(),
            tuning: TuningParameters::redis_optimized(),
            outcome: SelectionOutcome::Selected,
            endpoint: Some(endpoint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Backend, CacheBin};
    use crate::redis::{MockProbe, ProbeError};
    use assert_matches::assert_matches;

    fn env(pairs: &[(&str, &str)]) -> ProcessEnv {
        ProcessEnv::from_pairs(pairs.iter().copied())
    }

    #[tokio::test]
    async fn test_client_unavailable_skips_probe() {
        let mut probe = MockProbe::new();
        probe.expect_probe().times(0);

        let caps = Capabilities {
            redis_client: false,
            ..Capabilities::full()
        };
        let selection = BackendSelector::new(probe).select(&env(&[]), &caps).await;

        assert_eq!(selection.registry, BackendRegistry::all_database());
        assert_eq!(selection.tuning, TuningParameters::default());
        assert_eq!(selection.degrade_reason(), Some(&DegradeReason::ClientUnavailable));
        assert_eq!(selection.endpoint, None);
    }

    #[tokio::test]
    async fn test_probe_failure_degrades() {
        let mut probe = MockProbe::new();
        probe
            .expect_probe()
            .withf(|endpoint, limit| {
                endpoint.host == "redis" && endpoint.port == 6379 && *limit == DEFAULT_PROBE_TIMEOUT
            })
            .times(1)
            .returning(|endpoint, limit| {
                Err(ProbeError::Timeout {
                    endpoint: endpoint.to_string(),
                    timeout: limit,
                })
            });

        let selection = BackendSelector::new(probe)
            .select(&env(&[]), &Capabilities::full())
            .await;

        assert_eq!(selection.registry, BackendRegistry::all_database());
        assert_eq!(selection.tuning, TuningParameters::default());
        assert_matches!(
            selection.degrade_reason(),
            Some(DegradeReason::Unreachable { endpoint, .. }) if endpoint == "redis:6379"
        );
    }

    #[tokio::test]
    async fn test_misconfigured_port_skips_probe() {
        let mut probe = MockProbe::new();
        probe.expect_probe().times(0);

        let selection = BackendSelector::new(probe)
            .select(&env(&[("REDIS_PORT", "not-a-port")]), &Capabilities::full())
            .await;

        assert_matches!(selection.degrade_reason(), Some(DegradeReason::Misconfigured(_)));
        assert!(!selection.registry.uses_redis());
    }

    #[tokio::test]
    async fn test_module_missing_keeps_database_with_redis_tuning() {
        let mut probe = MockProbe::new();
        probe.expect_probe().times(1).returning(|_, _| Ok(()));

        let caps = Capabilities {
            module_services: false,
            ..Capabilities::full()
        };
        let selection = BackendSelector::new(probe).select(&env(&[]), &caps).await;

        assert_eq!(selection.registry, BackendRegistry::all_database());
        assert_eq!(selection.tuning, TuningParameters::redis_optimized());
        assert_eq!(selection.degrade_reason(), Some(&DegradeReason::ModuleMissing));
        assert!(selection.probe_succeeded());
    }

    #[tokio::test]
    async fn test_selected_uses_env_endpoint() {
        let mut probe = MockProbe::new();
        probe
            .expect_probe()
            .withf(|endpoint, _| endpoint.host == "cache1" && endpoint.port == 6379)
            .times(1)
            .returning(|_, _| Ok(()));

        let selection = BackendSelector::new(probe)
            .select(&env(&[("REDIS_HOST", "cache1")]), &Capabilities::full())
            .await;

        assert!(selection.is_selected());
        assert_eq!(selection.registry.backend_for(CacheBin::Form), Backend::Database);
        assert_eq!(selection.registry.backend_for(CacheBin::Default), Backend::Redis);
        assert_eq!(selection.tuning, TuningParameters::redis_optimized());
        assert_eq!(selection.endpoint, Some(RedisEndpoint::new("cache1", 6379)));
    }

    #[tokio::test]
    async fn test_configured_timeout_is_used() {
        let mut probe = MockProbe::new();
        probe
            .expect_probe()
            .withf(|_, limit| *limit == Duration::from_secs(5))
            .times(1)
            .returning(|_, _| Ok(()));

        let selector = BackendSelector::with_timeout(probe, Duration::from_secs(5));
        assert!(selector.select(&env(&[]), &Capabilities::full()).await.is_selected());
    }

    #[test]
    fn test_from_config() {
        let config = SelectorConfig {
            probe_timeout_secs: 3,
            ..SelectorConfig::default()
        };
        let selector = BackendSelector::from_config(&config);
        assert_eq!(selector.timeout, Duration::from_secs(3));
    }
}
