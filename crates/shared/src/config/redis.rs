use anyhow::{Context, Result};
use deadpool_redis::{Config as RedisPoolConfig, Pool, PoolConfig, Runtime, Timeouts};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub db: u8,
    pub password: Option<String>,
}

impl RedisConfig {
    pub fn new(host: String, port: u16, db: u8, password: Option<String>) -> Self {
        Self {
            host,
            port,
            db,
            password,
        }
    }

    pub fn url(&self) -> String {
        match &self.password {
            Some(pw) => format!("redis://:{}@{}:{}/{}", pw, self.host, self.port, self.db),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.db),
        }
    }
}

pub struct RedisPool;

impl RedisPool {
    pub fn create(config: &RedisConfig) -> Result<Pool> {
        info!(
            "Creating redis pool for {}:{}/{}",
            config.host, config.port, config.db
        );

        let mut timeouts = Timeouts::default();
        timeouts.wait = Some(Duration::from_secs(2));
        timeouts.create = Some(Duration::from_secs(2));
        timeouts.recycle = Some(Duration::from_secs(2));

        let mut pool = PoolConfig::default();
        pool.timeouts = timeouts;

        let mut pool_config = RedisPoolConfig::from_url(config.url());
        pool_config.pool = Some(pool);

        pool_config
            .create_pool(Some(Runtime::Tokio1))
            .context("Failed to create Redis pool")
    }

    pub async fn ping(pool: &Pool) -> Result<()> {
        let mut conn = pool
            .get()
            .await
            .context("Failed to get Redis connection")?;

        info!("Pinging redis");

        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("Failed to ping Redis server")?;

        info!("Pinged redis");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_includes_password_only_when_set() {
        let open = RedisConfig::new("redis".into(), 6379, 0, None);
        assert_eq!(open.url(), "redis://redis:6379/0");

        let locked = RedisConfig::new("cache".into(), 6380, 2, Some("pw".into()));
        assert_eq!(locked.url(), "redis://:pw@cache:6380/2");
    }
}
