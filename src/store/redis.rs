use super::{StoreError, UpstreamStore};
use crate::config::StoreConfig;
use ::redis::{
    Client, Commands, Connection, ConnectionAddr, ConnectionInfo, ErrorKind, RedisConnectionInfo,
};
use log::{debug, info};

/// Upstream store backed by a Redis server
pub struct RedisStore {
    addr: String,
    conn: Connection,
}

impl RedisStore {
    /// Open a connection to the server described by `config`.
    ///
    /// AUTH and SELECT happen during the handshake, so a wrong password is
    /// reported here rather than on the first write.
    pub fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let addr = config.address();
        info!("Connecting to redis at {} (db {})", addr, config.db);

        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(config.host.clone(), config.port),
            redis: RedisConnectionInfo {
                db: config.db,
                password: config.password.clone(),
                ..Default::default()
            },
        };

        let client = Client::open(info).map_err(|source| StoreError::Connect {
            addr: addr.clone(),
            source,
        })?;

        let conn = client
            .get_connection_with_timeout(config.timeout)
            .map_err(|source| classify_connect_error(&addr, source))?;

        for result in [
            conn.set_read_timeout(Some(config.timeout)),
            conn.set_write_timeout(Some(config.timeout)),
        ] {
            result.map_err(|source| StoreError::Connect {
                addr: addr.clone(),
                source,
            })?;
        }

        debug!("Connected to redis at {}", addr);
        Ok(RedisStore { addr, conn })
    }
}

fn classify_connect_error(addr: &str, source: ::redis::RedisError) -> StoreError {
    let addr = addr.to_string();
    match source.kind() {
        ErrorKind::AuthenticationFailed => StoreError::Auth { addr, source },
        _ => StoreError::Connect { addr, source },
    }
}

impl UpstreamStore for RedisStore {
    fn add_member(&mut self, key: &str, member: &str) -> Result<bool, StoreError> {
        debug!("SADD {} {} on {}", key, member, self.addr);
        let added: i64 = self
            .conn
            .sadd(key, member)
            .map_err(|source| StoreError::Write {
                key: key.to_string(),
                source,
            })?;
        Ok(added > 0)
    }
}
