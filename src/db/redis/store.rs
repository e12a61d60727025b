use redis::AsyncCommands;
use redis::Client;

use crate::db::storage::{KeyValueStore, StorageKey};
use crate::error::AppResult;

const DEFAULT_NAMESPACE: &str = "moviebox";

/// Creates a Redis client for persisted storage
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Key-value store backed by Redis
///
/// Entries have no TTL. Every key is prefixed with a namespace so several
/// deployments can share one server.
#[derive(Clone)]
pub struct RedisStore {
    redis_client: Client,
    namespace: String,
}

impl RedisStore {
    pub fn new(redis_client: Client) -> Self {
        Self::with_namespace(redis_client, DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(redis_client: Client, namespace: impl Into<String>) -> Self {
        Self {
            redis_client,
            namespace: namespace.into(),
        }
    }

    fn redis_key(&self, key: &StorageKey) -> String {
        format!("{}:{}", self.namespace, key)
    }
}

#[async_trait::async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &StorageKey) -> AppResult<Option<String>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(self.redis_key(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &StorageKey, value: String) -> AppResult<()> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(self.redis_key(key), value).await?;
        tracing::debug!(key = %key, "Storage entry written to Redis");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
