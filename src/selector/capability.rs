use std::path::{Path, PathBuf};
use tracing::debug;

/// 整合模組的服務描述檔
pub const MODULE_SERVICES_FILE: &str = "redis.services.yml";
/// 鎖、flood 控制與佇列的範例服務描述檔
pub const EXAMPLE_SERVICES_FILE: &str = "example.services.yml";
/// 整合模組的原始碼目錄
pub const MODULE_SOURCE_DIR: &str = "src";

/// 選擇時使用的能力旗標
///
/// 由呼叫端明確傳入，測試時可以直接建構，不需要檔案系統。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// 執行環境是否具備 Redis 客戶端
    pub redis_client: bool,
    /// 整合模組的服務描述檔是否存在
    pub module_services: bool,
    /// 範例服務描述檔是否存在
    pub example_services: bool,
    /// 整合模組的原始碼目錄是否存在
    pub module_source: bool,
}

impl Capabilities {
    /// 完整可用的能力組合
    pub fn full() -> Self {
        Self {
            redis_client: true,
            module_services: true,
            example_services: true,
            module_source: true,
        }
    }

    /// 從檔案系統偵測能力
    ///
    /// `module_dir` 相對於 `app_root` 解析。
    pub fn detect(app_root: impl AsRef<Path>, module_dir: impl AsRef<Path>) -> Self {
        let module_path = app_root.as_ref().join(module_dir);

        let capabilities = Self {
            redis_client: cfg!(feature = "redis-client"),
            module_services: module_path.join(MODULE_SERVICES_FILE).is_file(),
            example_services: module_path.join(EXAMPLE_SERVICES_FILE).is_file(),
            module_source: module_path.join(MODULE_SOURCE_DIR).is_dir(),
        };

        debug!("偵測到的能力 ({}): {:?}", module_path.display(), capabilities);
        capabilities
    }
}

/// 服務描述檔在宿主中的相對路徑
pub fn descriptor_path(module_dir: &str, file: &str) -> String {
    let mut path = PathBuf::from(module_dir);
    path.push(file);
    path.to_string_lossy().into_owned()
}
