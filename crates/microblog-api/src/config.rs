//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

/// Settings for one server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Buffered likes before `like_post` callers block.
    pub like_queue_capacity: usize,
    /// Buffered log records before loggers block.
    pub log_queue_capacity: usize,
    /// Upper bound on serving one request.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            like_queue_capacity: 100,
            log_queue_capacity: 1024,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Loads `.env` if one exists, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`; unset keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value does not parse, or if the
    /// request timeout is zero.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_secs = parse_or(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        )?;
        if timeout_secs == 0 {
            return Err(AppError::Config(
                "REQUEST_TIMEOUT_SECS must be greater than zero".into(),
            ));
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            like_queue_capacity: parse_or(
                &lookup,
                "LIKE_QUEUE_CAPACITY",
                defaults.like_queue_capacity,
            )?,
            log_queue_capacity: parse_or(
                &lookup,
                "LOG_QUEUE_CAPACITY",
                defaults.log_queue_capacity,
            )?,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// The socket address the server binds.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn listen_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be valid: {e}"))),
    }
}
