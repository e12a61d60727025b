pub mod redis;
pub mod storage;

pub use redis::create_redis_client;
pub use redis::RedisStore;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageKey};
