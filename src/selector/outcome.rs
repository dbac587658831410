use crate::cache::{BackendRegistry, TuningParameters};
use crate::redis::RedisEndpoint;
use thiserror::Error;

/// 退回資料庫後端的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    /// 執行環境沒有 Redis 客戶端，未進行探測
    #[error("Redis客戶端不可用")]
    ClientUnavailable,

    /// Redis 端點配置無效
    #[error("Redis配置無效: {0}")]
    Misconfigured(String),

    /// 探測失敗（拒絕連接、超時或其他錯誤）
    #[error("Redis連接失敗: {reason}")]
    Unreachable { endpoint: String, reason: String },

    /// Redis 可連接，但整合模組未安裝
    #[error("Redis整合模組不存在")]
    ModuleMissing,
}

/// 選擇結果類型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Selected,
    Degraded(DegradeReason),
}

/// 一次選擇的完整結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub registry: BackendRegistry,
    pub tuning: TuningParameters,
    pub outcome: SelectionOutcome,
    /// 已解析的端點；配置無效或未探測時為 None
    pub endpoint: Option<RedisEndpoint>,
}

impl Selection {
    /// 全部使用資料庫後端與預設參數
    pub(crate) fn database_only(endpoint: Option<RedisEndpoint>, reason: DegradeReason) -> Self {
        Self {
            registry: BackendRegistry::all_database(),
            tuning: TuningParameters::default(),
            outcome: SelectionOutcome::Degraded(reason),
            endpoint,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.outcome == SelectionOutcome::Selected
    }

    /// 探測是否成功
    pub fn probe_succeeded(&self) -> bool {
        matches!(
            self.outcome,
            SelectionOutcome::Selected | SelectionOutcome::Degraded(DegradeReason::ModuleMissing)
        )
    }

    pub fn degrade_reason(&self) -> Option<&DegradeReason> {
        match &self.outcome {
            SelectionOutcome::Selected => None,
            SelectionOutcome::Degraded(reason) => Some(reason),
        }
    }
}
