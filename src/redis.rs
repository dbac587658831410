//! Redis連線模組
//!
//! 此模組負責解析Redis端點並探測其可達性。探測連接只用於判斷可用性，
//! 實際的快取流量由宿主框架自行建立的持久連接承擔。

pub mod endpoint;
pub mod probe;

#[cfg(all(test, feature = "redis-client"))]
pub mod test_config;

pub use endpoint::*;
pub use probe::*;
