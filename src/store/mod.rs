//! # Upstream Store
//!
//! Backends that hold the upstream sets. The registrar only ever performs a
//! set-add, so the seam is a single operation:
//!
//! - `redis.rs`: the shared Redis server used in deployment
//! - `memory.rs`: an in-process set store for tests
//!
//! Deduplication is whatever the backend's set type provides. Both backends
//! compare members byte for byte.

pub mod memory;
pub mod redis;

pub use memory::MemoryStore;
pub use self::redis::RedisStore;

/// Errors raised by a store backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot connect to redis at {addr}")]
    Connect {
        addr: String,
        #[source]
        source: ::redis::RedisError,
    },

    #[error("redis at {addr} rejected authentication")]
    Auth {
        addr: String,
        #[source]
        source: ::redis::RedisError,
    },

    #[error("failed to add member to set '{key}'")]
    Write {
        key: String,
        #[source]
        source: ::redis::RedisError,
    },
}

/// A backend that can add members to named sets
pub trait UpstreamStore {
    /// Add `member` to the set `key`.
    ///
    /// Returns `true` when the member was new and `false` when the set
    /// already held it.
    fn add_member(&mut self, key: &str, member: &str) -> Result<bool, StoreError>;
}

impl<S: UpstreamStore + ?Sized> UpstreamStore for &mut S {
    fn add_member(&mut self, key: &str, member: &str) -> Result<bool, StoreError> {
        (**self).add_member(key, member)
    }
}
