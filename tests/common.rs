#![allow(dead_code)]

use async_trait::async_trait;
use cache_selector::redis::{Probe, ProbeError, RedisEndpoint};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::subscriber::DefaultGuard;

/// 在本機隨機端口啟動監聽者
pub async fn spawn_listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

/// 取得一個沒有監聽者的端口
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    listener.local_addr().unwrap().port()
}

/// 記錄被探測的端點並返回固定結果
pub struct RecordingProbe {
    reachable: bool,
    pub calls: Mutex<Vec<RedisEndpoint>>,
}

impl RecordingProbe {
    pub fn reachable() -> Self {
        Self {
            reachable: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn probed(&self) -> Vec<RedisEndpoint> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Probe for RecordingProbe {
    async fn probe(&self, endpoint: &RedisEndpoint, _timeout: Duration) -> Result<(), ProbeError> {
        self.calls.lock().unwrap().push(endpoint.clone());
        if self.reachable {
            Ok(())
        } else {
            Err(ProbeError::Connect {
                endpoint: endpoint.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
            })
        }
    }
}

/// 收集日誌輸出的緩衝區
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// 在當前線程安裝寫入此緩衝區的訂閱者
    pub fn install(&self) -> DefaultGuard {
        let buffer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || buffer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
