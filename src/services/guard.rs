//! 存储调用守卫
//!
//! 每次存储调用都受单次超时约束；只对幂等读在存储故障时重试，写操作从不重试。

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::config::EngineConfig;
use crate::errors::{RatingError, Result};
use crate::storage::Storage;

#[derive(Clone)]
pub struct StoreGuard {
    storage: Arc<dyn Storage>,
    timeout: Duration,
    read_retries: u32,
}

impl StoreGuard {
    pub fn new(storage: Arc<dyn Storage>, config: &EngineConfig) -> Self {
        Self {
            storage,
            timeout: config.store_timeout(),
            read_retries: config.read_retries,
        }
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// 幂等读：超时受限，存储故障时按配置重试
    pub async fn read<T, F, Fut>(&self, op: &'static str, call: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            match self.bounded(op, call()).await {
                Err(e) if e.is_storage_failure() && attempt < self.read_retries => {
                    attempt += 1;
                    warn!("存储读取失败，第 {} 次重试 {}: {}", attempt, op, e);
                    tokio::time::sleep(Duration::from_millis(50 * u64::from(attempt))).await;
                }
                other => return other,
            }
        }
    }

    /// 写操作：只做超时约束
    pub async fn write<T, Fut>(&self, op: &'static str, fut: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        self.bounded(op, fut).await
    }

    async fn bounded<T, Fut>(&self, op: &'static str, fut: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| {
                RatingError::storage_timeout(format!(
                    "{op} 超过 {}ms 未完成",
                    self.timeout.as_millis()
                ))
            })?
    }
}
