use serde::{Deserialize, Serialize};
use std::fmt;

/// 快取分區（bin）
///
/// 每個分區可以獨立指定後端。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBin {
    Default,
    Form,
    Bootstrap,
    Render,
    Data,
    Discovery,
}

impl CacheBin {
    /// 所有已知分區
    pub const ALL: [CacheBin; 6] = [
        CacheBin::Default,
        CacheBin::Form,
        CacheBin::Bootstrap,
        CacheBin::Render,
        CacheBin::Data,
        CacheBin::Discovery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheBin::Default => "default",
            CacheBin::Form => "form",
            CacheBin::Bootstrap => "bootstrap",
            CacheBin::Render => "render",
            CacheBin::Data => "data",
            CacheBin::Discovery => "discovery",
        }
    }

    /// 是否必須使用持久化後端
    ///
    /// 表單狀態必須在快取淘汰與重啟後保留。
    pub fn requires_durable(&self) -> bool {
        matches!(self, CacheBin::Form)
    }
}

impl fmt::Display for CacheBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 快取後端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Database,
    Redis,
}

impl Backend {
    /// 宿主容器中的服務 ID
    pub fn service_id(&self) -> &'static str {
        match self {
            Backend::Database => "cache.backend.database",
            Backend::Redis => "cache.backend.redis",
        }
    }

    pub fn is_durable(&self) -> bool {
        matches!(self, Backend::Database)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service_id())
    }
}
