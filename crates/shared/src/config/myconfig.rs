use anyhow::{Context, Result, anyhow};
use std::str::FromStr;

use crate::config::RedisConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub bcrypt_cost: u32,
    pub run_migrations: bool,
    pub port: u16,
    pub db_max_conn: u32,
    pub db_min_conn: u32,
    pub redis: RedisConfig,
    pub otel_endpoint: String,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;
        let run_migrations_str = std::env::var("RUN_MIGRATIONS")
            .context("Missing environment variable: RUN_MIGRATIONS")?;
        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;

        let run_migrations = parse_bool("RUN_MIGRATIONS", &run_migrations_str)?;

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let jwt_expiration_hours: i64 = env_or("JWT_EXPIRATION_HOURS", "24")?;
        if jwt_expiration_hours <= 0 {
            return Err(anyhow!("JWT_EXPIRATION_HOURS must be positive"));
        }

        let bcrypt_cost: u32 = env_or("BCRYPT_COST", "10")?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(anyhow!("BCRYPT_COST must be between 4 and 31"));
        }

        let db_max_conn: u32 = env_or("DB_MAX_CONNECTION", "5")?;
        let db_min_conn: u32 = env_or("DB_MIN_CONNECTION", "1")?;

        // redis
        let redis_host = std::env::var("REDIS_HOST").unwrap_or_else(|_| "redis".to_string());
        let redis_port: u16 = env_or("REDIS_PORT", "6379")?;
        let redis_db: u8 = env_or("REDIS_DB", "0")?;
        let redis_password = std::env::var("REDIS_PASSWORD")
            .ok()
            .filter(|pw| !pw.is_empty());

        let otel_endpoint = std::env::var("OTEL_ENDPOINT")
            .unwrap_or_else(|_| "http://otel-collector:4317".to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            bcrypt_cost,
            run_migrations,
            port,
            db_max_conn,
            db_min_conn,
            redis: RedisConfig::new(redis_host, redis_port, redis_db, redis_password),
            otel_endpoint,
        })
    }
}

pub fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(anyhow!("{name} must be 'true' or 'false', got '{other}'")),
    }
}

fn env_or<T>(name: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse::<T>()
        .with_context(|| format!("Unable to parse {name}"))
}
