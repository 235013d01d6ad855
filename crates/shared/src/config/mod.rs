mod database;
mod hashing;
mod jwt;
mod myconfig;
mod redis;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::hashing::Hashing;
pub use self::jwt::{ACCESS_TOKEN, Claims, JwtConfig};
pub use self::myconfig::{Config, parse_bool};
pub use self::redis::{RedisConfig, RedisPool};
