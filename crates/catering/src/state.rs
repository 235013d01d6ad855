use crate::di::{DependenciesInject, DependenciesInjectDeps, Repositories};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynCacheStore, DynHashing, DynJwtService},
    cache::CacheStore,
    config::{Config, ConnectionPool, Hashing, JwtConfig, RedisPool},
    utils::{SystemMetrics, run_metrics_collector},
};
use std::{fmt, sync::Arc};
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_config: DynJwtService,
    pub registry: Arc<Registry>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("deps", &self.di_container)
            .field("jwt_config", &self.jwt_config)
            .field("registry", &self.registry)
            .field("system_metrics", &self.system_metrics)
            .finish()
    }
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let redis_pool = RedisPool::create(&config.redis).context("Failed to create Redis pool")?;

        match RedisPool::ping(&redis_pool).await {
            Ok(()) => info!("✅ Redis reachable, login throttling enabled"),
            Err(e) => warn!("⚠️ Redis unreachable, login attempts are not throttled: {e:#}"),
        }

        let cache = Arc::new(CacheStore::new(redis_pool)) as DynCacheStore;
        let hash = Arc::new(Hashing::new(config.bcrypt_cost)) as DynHashing;
        let jwt = Arc::new(JwtConfig::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        )) as DynJwtService;

        let state = Self::from_deps(DependenciesInjectDeps {
            repositories: Repositories::postgres(pool),
            hash,
            jwt,
            cache,
        });

        tokio::spawn(run_metrics_collector(state.system_metrics.clone()));

        Ok(state)
    }

    /// Wires services over the given dependencies without starting background tasks.
    pub fn from_deps(deps: DependenciesInjectDeps) -> Self {
        let mut registry = Registry::default();
        let system_metrics = Arc::new(SystemMetrics::new());
        let jwt_config = deps.jwt.clone();

        let di_container = DependenciesInject::new(deps, &mut registry);

        registry.register_metrics(&system_metrics);

        Self {
            di_container,
            jwt_config,
            registry: Arc::new(registry),
            system_metrics,
        }
    }
}

trait MetricsRegister {
    fn register_metrics(&mut self, metrics: &SystemMetrics);
}

impl MetricsRegister for Registry {
    fn register_metrics(&mut self, metrics: &SystemMetrics) {
        metrics.register(self);
    }
}
