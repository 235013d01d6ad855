use crate::abstract_trait::CacheStoreTrait;
use async_trait::async_trait;
use chrono::Duration;
use deadpool_redis::{Connection, Pool};
use std::sync::Arc;
use tracing::error;

#[derive(Clone)]
pub struct CacheStore {
    redis_pool: Arc<Pool>,
}

impl CacheStore {
    pub fn new(redis_pool: Pool) -> Self {
        Self {
            redis_pool: Arc::new(redis_pool),
        }
    }

    async fn get_conn(&self) -> Option<Connection> {
        match self.redis_pool.get().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Failed to get Redis pooled connection: {:?}", e);
                None
            }
        }
    }
}

#[async_trait]
impl CacheStoreTrait for CacheStore {
    async fn delete_from_cache(&self, key: &str) {
        if let Some(mut conn) = self.get_conn().await
            && let Err(e) = redis::cmd("DEL")
                .arg(key)
                .query_async::<()>(&mut conn)
                .await
        {
            error!("Failed to delete key '{}': {:?}", key, e);
        }
    }

    async fn incr_with_ttl(&self, key: &str, ttl: Duration) -> Option<i64> {
        let mut conn = self.get_conn().await?;

        // EXPIRE ... NX needs Redis 7+
        let result: redis::RedisResult<(i64,)> = redis::pipe()
            .atomic()
            .cmd("INCR")
            .arg(key)
            .cmd("EXPIRE")
            .arg(key)
            .arg(ttl.num_seconds().max(1))
            .arg("NX")
            .ignore()
            .query_async(&mut conn)
            .await;

        match result {
            Ok((count,)) => Some(count),
            Err(e) => {
                error!("Failed to increment key '{}': {:?}", key, e);
                None
            }
        }
    }
}
