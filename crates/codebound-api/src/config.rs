//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default bind port.
pub const DEFAULT_PORT: u16 = 3000;
/// Default directory for the file save store.
pub const DEFAULT_SAVE_DIR: &str = "saves";

/// Everything the binary needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// When set, saves go to `PostgreSQL` instead of the file store.
    pub database_url: Option<String>,
    /// Directory of the file save store.
    pub save_dir: PathBuf,
    /// Fixed RNG seed for reproducible runs.
    pub rng_seed: Option<u64>,
}

impl AppConfig {
    /// Reads `HOST`, `PORT`, `DATABASE_URL`, `SAVE_DIR`, and `RNG_SEED`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` or `RNG_SEED` does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` or `RNG_SEED` does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let rng_seed = lookup("RNG_SEED")
            .map(|raw| raw.parse())
            .transpose()
            .map_err(|e| AppError::Config(format!("RNG_SEED must be a valid u64: {e}")))?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            save_dir: lookup("SAVE_DIR").map_or_else(|| PathBuf::from(DEFAULT_SAVE_DIR), PathBuf::from),
            rng_seed,
        })
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
