use async_trait::async_trait;
use tracing::info;

use super::{Notifier, SubmissionEvent};
use crate::config::NotifierConfig;
use crate::declare_notifier_plugin;
use crate::errors::Result;

declare_notifier_plugin!("log", LogNotifier);

/// 只写日志的通知器（默认）
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl LogNotifier {
    pub const NAME: &'static str = "log";

    pub async fn new(_config: &NotifierConfig) -> Result<Self> {
        Ok(Self)
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn publish(&self, event: &SubmissionEvent) -> Result<()> {
        let payload = serde_json::to_string(event)?;
        info!(target: "rating_engine::notifications", channel = event.channel(), "{}", payload);
        Ok(())
    }
}
