//! Service Configuration
//!
//! Defaults keep the established deployment values (port 8080, `hashStore.db`,
//! `time.db`, 5 s job delay, 10 s shutdown grace). Every knob can be overridden from
//! command-line flags, with environment variables as a fallback for paths and address.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STORE_PATH: &str = "hashStore.db";
pub const DEFAULT_LEDGER_PATH: &str = "time.db";
pub const DEFAULT_JOB_DELAY: Duration = Duration::from_secs(5);
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(10);

pub const ENV_BIND: &str = "HASH_SERVICE_BIND";
pub const ENV_STORE: &str = "HASH_SERVICE_STORE";
pub const ENV_LEDGER: &str = "HASH_SERVICE_LEDGER";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    /// Append-only `"<id> <digest>"` record log.
    pub store_path: PathBuf,
    /// Single-integer file with cumulative processing microseconds.
    pub ledger_path: PathBuf,
    /// Simulated latency before each digest is computed.
    pub job_delay: Duration,
    /// Upper bound on how long shutdown waits for in-flight jobs.
    pub grace_period: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            job_delay: DEFAULT_JOB_DELAY,
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }
}

impl ServiceConfig {
    /// Builds a config from environment fallbacks, then applies command-line flags.
    ///
    /// `args` is expected to include the program name at index 0, as returned by
    /// `std::env::args()`.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut config = Self::from_env()?;

        let mut i = 1;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = || {
                args.get(i + 1)
                    .with_context(|| format!("missing value for {}", flag))
            };

            match flag {
                "--bind" => {
                    config.bind_addr = value()?
                        .parse()
                        .with_context(|| format!("invalid address for {}", flag))?;
                    i += 2;
                }
                "--store" => {
                    config.store_path = PathBuf::from(value()?);
                    i += 2;
                }
                "--ledger" => {
                    config.ledger_path = PathBuf::from(value()?);
                    i += 2;
                }
                "--delay-ms" => {
                    config.job_delay = parse_millis(flag, value()?)?;
                    i += 2;
                }
                "--grace-ms" => {
                    config.grace_period = parse_millis(flag, value()?)?;
                    i += 2;
                }
                _ => {
                    tracing::warn!("Ignoring unknown argument: {}", flag);
                    i += 1;
                }
            }
        }

        Ok(config)
    }

    fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(bind) = std::env::var(ENV_BIND) {
            config.bind_addr = bind
                .parse()
                .with_context(|| format!("invalid address in {}", ENV_BIND))?;
        }
        if let Ok(store) = std::env::var(ENV_STORE) {
            config.store_path = PathBuf::from(store);
        }
        if let Ok(ledger) = std::env::var(ENV_LEDGER) {
            config.ledger_path = PathBuf::from(ledger);
        }

        Ok(config)
    }
}

fn parse_millis(flag: &str, raw: &str) -> Result<Duration> {
    let millis: u64 = raw
        .parse()
        .with_context(|| format!("invalid milliseconds for {}: {}", flag, raw))?;
    Ok(Duration::from_millis(millis))
}
