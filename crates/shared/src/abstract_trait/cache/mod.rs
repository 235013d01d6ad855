use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;

pub type DynCacheStore = Arc<dyn CacheStoreTrait + Send + Sync>;

/// Counters with a TTL, kept outside the database.
///
/// Failures are logged and swallowed: a cache that is down behaves like an empty one
/// and `incr_with_ttl` yields `None`.
#[async_trait]
pub trait CacheStoreTrait {
    async fn delete_from_cache(&self, key: &str);

    /// Atomically increments the counter at `key` and returns the new value.
    /// The TTL is set by the first increment only, so the window does not slide.
    async fn incr_with_ttl(&self, key: &str, ttl: Duration) -> Option<i64>;
}
