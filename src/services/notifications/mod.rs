//! 提交后的外部通知
//!
//! 通知在请求之外异步执行，失败只记录日志，不影响提交结果。

pub mod log;
pub mod redis;
pub mod register;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::NotifierConfig;
use crate::errors::{RatingError, Result};
use register::get_notifier_plugin;

/// 提交成功后产生的事件
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SubmissionEvent {
    /// 通知外部清理本次提交上传的临时媒体
    MediaCleanup {
        source_trans_id: String,
        media: Vec<String>,
    },
    /// 通知外部系统同步评分标记
    RatingFlag {
        rating_id: String,
        submission_id: String,
        source_trans_id: String,
        value: String,
    },
}

impl SubmissionEvent {
    /// 事件对应的频道名（不含前缀）
    pub fn channel(&self) -> &'static str {
        match self {
            SubmissionEvent::MediaCleanup { .. } => "media-cleanup",
            SubmissionEvent::RatingFlag { .. } => "rating-flag",
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;
    async fn publish(&self, event: &SubmissionEvent) -> Result<()>;
}

#[macro_export]
macro_rules! declare_notifier_plugin {
    ($name:literal, $ty:ty) => {
        #[::ctor::ctor]
        unsafe fn __register_notifier_plugin() {
            $crate::services::notifications::register::register_notifier_plugin(
                $name,
                ::std::sync::Arc::new(
                    |config: &$crate::config::NotifierConfig|
                     -> $crate::services::notifications::register::BoxedNotifierFuture {
                        let config = config.clone();
                        Box::pin(async move {
                            <$ty>::new(&config).await.map(|notifier| {
                                Box::new(notifier)
                                    as Box<dyn $crate::services::notifications::Notifier>
                            })
                        })
                    },
                ),
            );
        }
    };
}

/// 按配置创建通知器，配置的插件不可用时回退到日志通知
pub async fn create_notifier(config: &NotifierConfig) -> Result<Arc<dyn Notifier>> {
    register::debug_notifier_registry();

    let err = match get_notifier_plugin(&config.notifier_type) {
        Some(constructor) => match constructor(config).await {
            Ok(notifier) => return Ok(Arc::from(notifier)),
            Err(e) => e,
        },
        None => RatingError::notifier_plugin_not_found(config.notifier_type.clone()),
    };

    warn!(
        "通知器 {} 不可用，回退到日志通知器: {}",
        config.notifier_type, err
    );
    Ok(Arc::new(log::LogNotifier))
}

/// 脱离请求的取消范围异步投递事件
pub fn dispatch_detached(
    notifier: Arc<dyn Notifier>,
    events: Vec<SubmissionEvent>,
) -> Option<JoinHandle<()>> {
    if events.is_empty() {
        return None;
    }

    Some(tokio::spawn(async move {
        for event in &events {
            match notifier.publish(event).await {
                Ok(()) => debug!("{} 通知已投递: {}", notifier.name(), event.channel()),
                Err(e) => warn!(
                    "{} 通知投递失败 ({}): {}",
                    notifier.name(),
                    event.channel(),
                    e
                ),
            }
        }
    }))
}
