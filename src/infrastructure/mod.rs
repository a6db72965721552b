//! Adapters behind the domain ports: clocks, stores and the rate limiter.

pub mod clock;
pub mod in_memory;
pub mod rate_limiter;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
