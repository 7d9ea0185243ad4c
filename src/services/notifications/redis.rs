use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error};

use super::{Notifier, SubmissionEvent};
use crate::config::NotifierConfig;
use crate::declare_notifier_plugin;
use crate::errors::{RatingError, Result};

declare_notifier_plugin!("redis", RedisNotifier);

/// 通过 Redis PUBLISH 投递事件，频道为 `{prefix}{channel}`
pub struct RedisNotifier {
    client: redis::Client,
    channel_prefix: String,
}

impl RedisNotifier {
    pub async fn new(config: &NotifierConfig) -> Result<Self> {
        let redis_config = &config.redis;
        let client = redis::Client::open(redis_config.url.clone()).map_err(|e| {
            RatingError::notification(format!("Failed to create Redis client: {e}"))
        })?;

        // 测试 Redis 连接
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| RatingError::notification(format!("Redis connection failed: {e}")))?;
        match redis::cmd("PING").query_async::<String>(&mut conn).await {
            Ok(response) => debug!("Redis connection test successful: {}", response),
            Err(e) => {
                error!(
                    "Failed to ping Redis server: {}. Check Redis server status and URL: {}",
                    e, redis_config.url
                );
                return Err(RatingError::notification(format!("Redis ping failed: {e}")));
            }
        }

        Ok(Self {
            client,
            channel_prefix: redis_config.channel_prefix.clone(),
        })
    }

    async fn get_connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| RatingError::notification(format!("Redis connection failed: {e}")))
    }

    fn make_channel(&self, event: &SubmissionEvent) -> String {
        format!("{}{}", self.channel_prefix, event.channel())
    }
}

#[async_trait]
impl Notifier for RedisNotifier {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn publish(&self, event: &SubmissionEvent) -> Result<()> {
        let payload = serde_json::to_string(event)?;
        let channel = self.make_channel(event);

        let mut conn = self.get_connection().await?;
        let receivers: i64 = conn
            .publish(&channel, payload)
            .await
            .map_err(|e| RatingError::notification(format!("PUBLISH {channel} failed: {e}")))?;

        debug!("Published to {} ({} receivers)", channel, receivers);
        Ok(())
    }
}
