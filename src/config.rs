use crate::upstream::Address;
use std::fmt;
use std::time::Duration;

/// Default Redis host when none is configured
pub const DEFAULT_REDIS_HOST: &str = "127.0.0.1";
/// Default Redis port
pub const DEFAULT_REDIS_PORT: u16 = 6379;
/// Default bound on connecting to and talking with Redis
pub const DEFAULT_REDIS_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the Redis server holding the upstream sets
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Redis host name or IP address
    pub host: String,
    /// Redis port
    pub port: u16,
    /// (Optional) Password sent with AUTH on connect
    pub password: Option<String>,
    /// Logical database index
    pub db: i64,
    /// Bound on connect, read and write
    pub timeout: Duration,
}

impl StoreConfig {
    /// `host:port` of the Redis server, for logs and error messages
    pub fn address(&self) -> String {
        Address {
            host: self.host.clone(),
            port: self.port,
        }
        .to_string()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            host: DEFAULT_REDIS_HOST.to_string(),
            port: DEFAULT_REDIS_PORT,
            password: None,
            db: 0,
            timeout: DEFAULT_REDIS_TIMEOUT,
        }
    }
}

// Password is never printed.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("db", &self.db)
            .field("timeout", &self.timeout)
            .finish()
    }
}
