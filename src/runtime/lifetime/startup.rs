use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::RatingEngine;
use crate::services::notifications::{Notifier, create_notifier};
use crate::storage::{Storage, create_storage};
use std::sync::Arc;
use tracing::{info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub notifier: Arc<dyn Notifier>,
    pub engine: RatingEngine,
}

/// 连接存储（含迁移）、创建通知器并组装引擎
pub async fn prepare_startup(config: &AppConfig) -> Result<StartupContext> {
    // 已安装时返回 Err，忽略即可
    let _ = rustls::crypto::ring::default_provider().install_default();

    warn!("Connecting to database: {}", config.database.url);
    let storage = create_storage(&config.database).await?;

    let notifier = create_notifier(&config.notifier).await?;
    info!("Using {} notifier", notifier.name());

    let engine = RatingEngine::new(storage.clone(), notifier.clone(), &config.engine);
    info!(
        "Rating engine ready (store timeout {}ms, read retries {})",
        config.engine.store_timeout_ms, config.engine.read_retries
    );

    Ok(StartupContext {
        storage,
        notifier,
        engine,
    })
}
