mod cache;
mod hashing;
mod jwt;

pub use self::cache::{CacheStoreTrait, DynCacheStore};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
