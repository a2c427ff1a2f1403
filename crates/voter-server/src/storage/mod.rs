//! Storage layer
//!
//! Document backends behind the `DocumentStore` port: DashMap (in-memory)
//! for tests and local runs, RedisJSON for deployments.

pub mod memory;
pub mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;
