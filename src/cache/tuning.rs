use serde::{Deserialize, Serialize};

/// Redis 後端調校參數
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuningParameters {
    /// 超過此位元組數才壓縮，0 表示不壓縮
    pub compression_threshold: u32,
    /// 壓縮等級（0-9）
    pub compression_level: u8,
    /// 過期項目仍可讀取的秒數
    pub ttl_offset_secs: u32,
    /// invalidateAll 直接視為 deleteAll
    pub invalidate_all_as_delete: bool,
}

impl Default for TuningParameters {
    /// 宿主框架的預設值
    fn default() -> Self {
        Self {
            compression_threshold: 0,
            compression_level: 1,
            ttl_offset_secs: 0,
            invalidate_all_as_delete: false,
        }
    }
}

impl TuningParameters {
    /// Redis 可用時套用的參數
    ///
    /// 壓縮大於 100 位元組的資料（等級 1），過期項目保留一小時。
    pub fn redis_optimized() -> Self {
        Self {
            compression_threshold: 100,
            compression_level: 1,
            ttl_offset_secs: 3600,
            invalidate_all_as_delete: true,
        }
    }
}
