//! Cache implementations - Redis and in-memory fallback.

mod memory;

pub use memory::InMemoryCache;

#[cfg(feature = "redis")]
mod redis_cache;
#[cfg(feature = "redis")]
pub use redis_cache::{RedisCache, RedisConfig};
