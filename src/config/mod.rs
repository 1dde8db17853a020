//! Exporter configuration.
//!
//! The library takes a [`Config`] value; [`Config::from_env`] is the glue the binary uses
//! to build one from environment variables.
mod error;

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub use error::{Error, Result};

pub const LISTEN_ADDR_VAR: &str = "LISTEN_ADDR";
pub const RESTART_WINDOW_VAR: &str = "RESTART_WINDOW_SECS";
pub const RUNTIME_TIMEOUT_VAR: &str = "RUNTIME_TIMEOUT_SECS";
pub const INCLUDE_STOPPED_VAR: &str = "INCLUDE_STOPPED";
pub const DOCKER_SOCKET_VAR: &str = "DOCKER_SOCKET";

/// Default port of the metrics endpoint.
pub const DEFAULT_PORT: u16 = 1624;
/// Default window in which an exit counts as a recent restart.
pub const DEFAULT_RESTART_WINDOW: Duration = Duration::from_secs(60);
/// Default bound on a single runtime query.
pub const DEFAULT_RUNTIME_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,
    /// A container whose last exit is younger than this reports `container_restart_flag` 1.
    pub restart_window: Duration,
    /// Upper bound for listing and inspecting containers during one scrape.
    pub runtime_timeout: Duration,
    /// List stopped containers too, instead of running ones only.
    pub include_stopped: bool,
    /// Docker unix socket; `None` uses the client's local defaults.
    pub runtime_socket: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            restart_window: DEFAULT_RESTART_WINDOW,
            runtime_timeout: DEFAULT_RUNTIME_TIMEOUT,
            include_stopped: false,
            runtime_socket: None,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment, falling back to the
    /// defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] naming the offending variable if a value cannot be
    /// parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| match std::env::var(var) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(Error::NotUnicode(var)),
        })
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Result<Option<String>>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(LISTEN_ADDR_VAR)? {
            config.listen_addr = parse_var(LISTEN_ADDR_VAR, &value)?;
        }
        if let Some(value) = lookup(RESTART_WINDOW_VAR)? {
            config.restart_window = Duration::from_secs(parse_var(RESTART_WINDOW_VAR, &value)?);
        }
        if let Some(value) = lookup(RUNTIME_TIMEOUT_VAR)? {
            let secs: u64 = parse_var(RUNTIME_TIMEOUT_VAR, &value)?;
            if secs == 0 {
                return Err(Error::InvalidValue {
                    var: RUNTIME_TIMEOUT_VAR,
                    value,
                    reason: "timeout must be at least one second".to_owned(),
                });
            }
            config.runtime_timeout = Duration::from_secs(secs);
        }
        if let Some(value) = lookup(INCLUDE_STOPPED_VAR)? {
            config.include_stopped = parse_flag(INCLUDE_STOPPED_VAR, &value)?;
        }
        if let Some(value) = lookup(DOCKER_SOCKET_VAR)? {
            let value = value.trim();
            if !value.is_empty() {
                let path = value.strip_prefix("unix://").unwrap_or(value);
                config.runtime_socket = Some(PathBuf::from(path));
            }
        }

        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|err| Error::InvalidValue {
        var,
        value: value.to_owned(),
        reason: err.to_string(),
    })
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::InvalidValue {
            var,
            value: value.to_owned(),
            reason: "expected a boolean".to_owned(),
        }),
    }
}
