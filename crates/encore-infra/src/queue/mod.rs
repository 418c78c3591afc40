//! Export queue implementations - Redis and in-memory fallback.

mod memory;

pub use memory::InMemoryExportQueue;

#[cfg(feature = "redis")]
mod redis_queue;
#[cfg(feature = "redis")]
pub use redis_queue::{RedisExportQueue, RedisQueueConfig};
