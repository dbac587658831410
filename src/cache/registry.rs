use super::bins::{Backend, CacheBin};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// 後端註冊表錯誤
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("快取分區 {bin} 必須使用持久化後端，不能指定為 {backend}")]
    NonDurableBackend { bin: CacheBin, backend: Backend },
}

/// 分區到後端的映射
///
/// 每個已知分區都有對應的後端；需要持久化的分區（form）永遠是資料庫後端。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BackendRegistry {
    assignments: BTreeMap<CacheBin, Backend>,
}

impl BackendRegistry {
    /// 所有分區使用資料庫後端
    pub fn all_database() -> Self {
        Self {
            assignments: CacheBin::ALL
                .iter()
                .map(|bin| (*bin, Backend::Database))
                .collect(),
        }
    }

    /// Redis 可用時的映射：除需要持久化的分區外全部使用 Redis
    pub fn redis_preferred() -> Self {
        let mut registry = Self::all_database();
        for bin in CacheBin::ALL {
            if !bin.requires_durable() {
                registry.assignments.insert(bin, Backend::Redis);
            }
        }
        registry
    }

    /// 指定分區的後端
    pub fn assign(&mut self, bin: CacheBin, backend: Backend) -> Result<(), RegistryError> {
        if bin.requires_durable() && !backend.is_durable() {
            return Err(RegistryError::NonDurableBackend { bin, backend });
        }
        self.assignments.insert(bin, backend);
        Ok(())
    }

    pub fn backend_for(&self, bin: CacheBin) -> Backend {
        // 所有分區在建構時都已填入
        self.assignments
            .get(&bin)
            .copied()
            .unwrap_or(Backend::Database)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CacheBin, Backend)> + '_ {
        self.assignments.iter().map(|(bin, backend)| (*bin, *backend))
    }

    /// 是否有任何分區使用 Redis
    pub fn uses_redis(&self) -> bool {
        self.assignments.values().any(|b| *b == Backend::Redis)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::all_database()
    }
}
