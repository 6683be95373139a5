//! Upstream proxy records and their storage encoding.
//!
//! An upstream is registered as one member of the Redis set
//! `rps:upstream:<proto>`. The member is a compact JSON object with the keys
//! `host`, `port`, `proto`, `username` and `password`, in that order:
//!
//! ```json
//! {"host":"10.0.0.1","port":1080,"proto":"socks5","username":null,"password":null}
//! ```
//!
//! Consumers of the set parse this exact shape, and Redis deduplicates
//! members by byte equality, so the field order must never change.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Prefix of every upstream set key
pub const KEY_PREFIX: &str = "rps:upstream:";

/// Protocol used when none is given
pub const DEFAULT_PROTO: &str = "socks5";

/// Protocols the rps proxy pool knows how to speak to
pub const KNOWN_PROTOS: &[&str] = &["socks5", "socks4", "http", "private"];

/// Errors produced while parsing a `host:port` address
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address '{address}' is not of the form host:port")]
    MissingSeparator { address: String },

    #[error("address '{address}' has an empty host")]
    EmptyHost { address: String },

    #[error("address '{address}' has unbalanced brackets around the host")]
    UnbalancedBrackets { address: String },

    #[error("address '{address}' has an empty port")]
    EmptyPort { address: String },

    #[error("invalid port '{port}' in address '{address}'")]
    InvalidPort {
        address: String,
        port: String,
        #[source]
        source: ParseIntError,
    },
}

/// A parsed `host:port` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub host: String,
    pub port: u16,
}

impl FromStr for Address {
    type Err = AddressError;

    /// Split on the last colon so unbracketed IPv6 literals keep their host
    /// part intact. Brackets around the host (`[::1]:1080`) are removed.
    fn from_str(address: &str) -> Result<Self, Self::Err> {
        let (host, port) = address
            .rsplit_once(':')
            .ok_or_else(|| AddressError::MissingSeparator {
                address: address.to_string(),
            })?;

        let host = match host.strip_prefix('[') {
            Some(inner) => inner.strip_suffix(']').unwrap_or(host),
            None => host,
        };
        if host.contains(['[', ']']) {
            return Err(AddressError::UnbalancedBrackets {
                address: address.to_string(),
            });
        }

        if host.is_empty() {
            return Err(AddressError::EmptyHost {
                address: address.to_string(),
            });
        }
        if port.is_empty() {
            return Err(AddressError::EmptyPort {
                address: address.to_string(),
            });
        }

        let port = port.parse::<u16>().map_err(|source| AddressError::InvalidPort {
            address: address.to_string(),
            port: port.to_string(),
            source,
        })?;

        Ok(Address {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// One upstream proxy endpoint as stored in the upstream set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamRecord {
    pub host: String,
    pub port: u16,
    pub proto: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl UpstreamRecord {
    /// Build a record for `address`, falling back to [`DEFAULT_PROTO`]
    pub fn new(address: Address, proto: Option<&str>) -> Self {
        let proto = proto.unwrap_or(DEFAULT_PROTO).to_string();
        if !KNOWN_PROTOS.contains(&proto.as_str()) {
            warn!(
                "Protocol '{}' is not one of {:?}; registering it anyway",
                proto, KNOWN_PROTOS
            );
        }

        UpstreamRecord {
            host: address.host,
            port: address.port,
            proto,
            username: None,
            password: None,
        }
    }

    /// Attach proxy credentials
    pub fn with_credentials(mut self, username: Option<String>, password: Option<String>) -> Self {
        self.username = username;
        self.password = password;
        self
    }

    /// Endpoint of the upstream proxy
    pub fn address(&self) -> Address {
        Address {
            host: self.host.clone(),
            port: self.port,
        }
    }

    /// Name of the set this record belongs to
    pub fn storage_key(&self) -> String {
        format!("{}{}", KEY_PREFIX, self.proto)
    }

    /// Encode the record as the set member
    pub fn to_member(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
