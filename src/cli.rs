//! Command-line surface and the registration pipeline.

use crate::config::{StoreConfig, DEFAULT_REDIS_HOST, DEFAULT_REDIS_PORT};
use crate::error::RegistrarError;
use crate::registrar::{Registrar, Registration};
use crate::store::{StoreError, UpstreamStore};
use crate::upstream::{Address, UpstreamRecord, DEFAULT_PROTO};
use crate::utils::duration::parse_duration;
use clap::Parser;
use log::info;
use std::io::Write;
use std::time::Duration;

/// Register an upstream proxy in the rps upstream set for its protocol
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example:\n  add-upstream dev1:1221 --proto socks5")]
pub struct Args {
    /// Upstream proxy address as host:port
    #[arg(value_name = "HOST:PORT")]
    pub address: String,

    /// Username for the upstream proxy
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password for the upstream proxy
    #[arg(short, long)]
    pub password: Option<String>,

    /// Upstream protocol; also selects the set rps:upstream:<PROTO>
    #[arg(long, default_value = DEFAULT_PROTO)]
    pub proto: String,

    /// Redis host holding the upstream sets
    #[arg(long, env = "RPS_REDIS_HOST", default_value = DEFAULT_REDIS_HOST)]
    pub redis_host: String,

    /// Redis port
    #[arg(long, env = "RPS_REDIS_PORT", default_value_t = DEFAULT_REDIS_PORT)]
    pub redis_port: u16,

    /// Redis password
    #[arg(long, env = "RPS_REDIS_PASSWORD", hide_env_values = true)]
    pub redis_password: Option<String>,

    /// Redis database index
    #[arg(long, env = "RPS_REDIS_DB", default_value_t = 0)]
    pub redis_db: i64,

    /// Timeout for connecting to and talking with Redis (e.g. 5s, 500ms)
    #[arg(long, env = "RPS_REDIS_TIMEOUT", default_value = "5s", value_parser = parse_timeout)]
    pub redis_timeout: Duration,
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
    let timeout = parse_duration(value)?;
    if timeout.is_zero() {
        return Err("timeout must be greater than zero".to_string());
    }
    Ok(timeout)
}

impl Args {
    /// Build the record described by the arguments
    pub fn record(&self) -> Result<UpstreamRecord, RegistrarError> {
        let address: Address = self.address.parse()?;
        Ok(UpstreamRecord::new(address, Some(self.proto.as_str()))
            .with_credentials(self.username.clone(), self.password.clone()))
    }

    /// Redis connection settings
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            host: self.redis_host.clone(),
            port: self.redis_port,
            password: self.redis_password.clone(),
            db: self.redis_db,
            timeout: self.redis_timeout,
        }
    }
}

/// Register the upstream described by `args`.
///
/// The address is parsed before `connect` is called, so a malformed address
/// never reaches the store. On success the stored member and a confirmation
/// line are written to `out`. Nothing is written to `out` on failure.
pub fn run<S, F, W>(args: &Args, connect: F, out: &mut W) -> Result<Registration, RegistrarError>
where
    S: UpstreamStore,
    F: FnOnce(&StoreConfig) -> Result<S, StoreError>,
    W: Write,
{
    let record = args.record()?;
    let config = args.store_config();
    info!("Registering {} ({})", record.address(), record.proto);

    let store = connect(&config)?;
    let registration = Registrar::new(store).register(&record)?;

    writeln!(out, "{}", registration.member)?;
    writeln!(out, "success")?;
    out.flush()?;

    Ok(registration)
}
