// 模組定義
pub mod cache;
pub mod config;
pub mod redis;
pub mod selector;
pub mod settings;
