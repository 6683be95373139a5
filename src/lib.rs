//! # rps-upstream - upstream registration for the rps proxy pool
//!
//! This library backs the `add-upstream` command, which registers an
//! upstream proxy endpoint (host, port, protocol, optional credentials) in
//! the shared Redis set the rps proxy pool reads its upstreams from.
//!
//! ## Storage Layout
//!
//! Upstreams are grouped by protocol. Each protocol has one Redis set:
//!
//! ```text
//! rps:upstream:socks5   {"host":"10.0.0.1","port":1080,"proto":"socks5","username":null,"password":null}
//! rps:upstream:http     {"host":"10.0.0.2","port":3128,"proto":"http","username":"u","password":"p"}
//! ```
//!
//! Identical records collapse to one member. Records that differ in any
//! field are distinct members.
//!
//! ## Architecture
//!
//! - `upstream`: address parsing, `UpstreamRecord` and its JSON encoding
//! - `config`: Redis connection settings
//! - `store`: the `UpstreamStore` seam with Redis and in-memory backends
//! - `registrar`: adds a record to its protocol set
//! - `cli`: command-line arguments and the registration pipeline
//! - `error`: failure categories and exit codes
//! - `utils`: duration parsing for timeouts
//!
//! ## Example Usage
//!
//! ```rust
//! use rps_upstream::registrar::Registrar;
//! use rps_upstream::store::MemoryStore;
//! use rps_upstream::upstream::{Address, UpstreamRecord};
//!
//! let address: Address = "10.0.0.1:1080".parse()?;
//! let record = UpstreamRecord::new(address, None);
//!
//! let mut registrar = Registrar::new(MemoryStore::new());
//! let registration = registrar.register(&record)?;
//! assert_eq!(registration.key, "rps:upstream:socks5");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Library functions return typed errors built with `thiserror`. The binary
//! renders them through `color_eyre` and exits with a code per category.

pub mod cli;
pub mod config;
pub mod error;
pub mod registrar;
pub mod store;
pub mod upstream;
pub mod utils;

pub use cli::{run, Args};
pub use config::StoreConfig;
pub use error::RegistrarError;
pub use registrar::{Registrar, Registration};
pub use store::{MemoryStore, RedisStore, StoreError, UpstreamStore};
pub use upstream::{Address, UpstreamRecord};
